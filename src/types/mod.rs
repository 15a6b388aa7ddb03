mod client;
mod detection;
mod device;
mod os;

pub use client::*;
pub use detection::*;
pub use device::*;
pub use os::*;
