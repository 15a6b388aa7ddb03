use std::borrow::Cow;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::helpers::{join_version, Quoted, UNKNOWN};

static OTHER: Lazy<Os> = Lazy::new(|| Os::new("Other", [None; 4]));

/// Operating system facet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Os {
    pub family: String,
    pub major: Option<String>,
    pub minor: Option<String>,
    pub patch: Option<String>,
    pub patch_minor: Option<String>,
}

impl Os {
    /// `versions` is `[major, minor, patch, patch_minor]`.
    pub fn new(family: impl Into<String>, versions: [Option<&str>; 4]) -> Self {
        let [major, minor, patch, patch_minor] = versions.map(|v| v.map(str::to_owned));
        Self {
            family: family.into(),
            major,
            minor,
            patch,
            patch_minor,
        }
    }

    /// The facet returned when no rule matches.
    pub fn other() -> Self {
        OTHER.clone()
    }

    pub fn display_family(&self) -> Cow<'_, str> {
        if self.family.is_empty() {
            Cow::Borrowed(UNKNOWN)
        } else {
            Cow::Borrowed(&self.family)
        }
    }

    pub fn full_version(&self) -> String {
        self.version(true, true, true)
    }

    pub fn short_version(&self) -> String {
        self.version(true, false, false)
    }

    /// Dotted version down to the deepest requested level; stops at the
    /// first missing component.
    pub fn version(&self, include_minor: bool, include_patch: bool, include_patch_minor: bool) -> String {
        let depth = 1
            + include_minor as usize
            + (include_minor && include_patch) as usize
            + (include_minor && include_patch && include_patch_minor) as usize;
        let components = [
            self.major.as_deref(),
            self.minor.as_deref(),
            self.patch.as_deref(),
            self.patch_minor.as_deref(),
        ];
        join_version(&components[..depth]).unwrap_or_else(|| UNKNOWN.to_owned())
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{family: {}, major: {}, minor: {}, patch: {}, patch_minor: {}}}",
            Quoted(Some(&self.family)),
            Quoted(self.major.as_deref()),
            Quoted(self.minor.as_deref()),
            Quoted(self.patch.as_deref()),
            Quoted(self.patch_minor.as_deref()),
        )
    }
}
