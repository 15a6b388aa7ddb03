mod cache;
mod config;
mod db;
mod error;
mod extract;
mod helpers;
mod parser;
mod rule;
mod substitution;
mod types;
mod ua_parser;

pub use config::{CacheConfig, ParserConfig, DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_CAPACITY};
pub use db::{RuleDescriptor, RuleSet, BUNDLED_RULES};
pub use error::{Error, Result};
pub use types::*;
pub use ua_parser::UaParser;
