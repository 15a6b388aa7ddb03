use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::helpers::Quoted;

static OTHER: Lazy<Device> = Lazy::new(|| Device::new("Other", None, None));

/// Device facet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Device {
    pub family: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    /// Set from the mobile family lists using the resolved client and OS.
    pub is_mobile: bool,
}

impl Device {
    pub fn new(family: impl Into<String>, brand: Option<&str>, model: Option<&str>) -> Self {
        Self {
            family: family.into(),
            brand: brand.map(str::to_owned),
            model: model.map(str::to_owned),
            is_mobile: false,
        }
    }

    /// The facet returned when no rule matches.
    pub fn other() -> Self {
        OTHER.clone()
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{family: {}, brand: {}, model: {}, is_mobile: {}}}",
            Quoted(Some(&self.family)),
            Quoted(self.brand.as_deref()),
            Quoted(self.model.as_deref()),
            self.is_mobile,
        )
    }
}
