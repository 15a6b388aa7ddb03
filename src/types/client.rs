use std::borrow::Cow;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::helpers::{join_version, Quoted, UNKNOWN};
use crate::rule::SPIDER;

static OTHER: Lazy<Client> = Lazy::new(|| Client::new("Other", None, None, None));

/// Browser / client facet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Client {
    pub family: String,
    pub major: Option<String>,
    pub minor: Option<String>,
    pub patch: Option<String>,
}

impl Client {
    pub fn new(
        family: impl Into<String>,
        major: Option<&str>,
        minor: Option<&str>,
        patch: Option<&str>,
    ) -> Self {
        Self {
            family: family.into(),
            major: major.map(str::to_owned),
            minor: minor.map(str::to_owned),
            patch: patch.map(str::to_owned),
        }
    }

    /// The facet returned when no rule matches.
    pub fn other() -> Self {
        OTHER.clone()
    }

    /// The facet for an empty User-Agent.
    pub fn spider() -> Self {
        Self::new(SPIDER, None, None, None)
    }

    pub fn is_spider(&self) -> bool {
        self.family.eq_ignore_ascii_case(SPIDER)
    }

    /// Family for display. A spider carries its name in the version slots.
    pub fn display_family(&self) -> Cow<'_, str> {
        if self.is_spider() {
            Cow::Owned(self.version_components(2))
        } else if self.family.is_empty() {
            Cow::Borrowed(UNKNOWN)
        } else {
            Cow::Borrowed(&self.family)
        }
    }

    /// `major.minor.patch`, empty for spiders.
    pub fn full_version(&self) -> String {
        if self.is_spider() {
            String::new()
        } else {
            self.version_components(3)
        }
    }

    /// `major.minor`, empty for spiders.
    pub fn short_version(&self) -> String {
        if self.is_spider() {
            String::new()
        } else {
            self.version_components(2)
        }
    }

    fn version_components(&self, depth: usize) -> String {
        let components = [
            self.major.as_deref(),
            self.minor.as_deref(),
            self.patch.as_deref(),
        ];
        join_version(&components[..depth]).unwrap_or_else(|| UNKNOWN.to_owned())
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{family: {}, is_spider: {}, major: {}, minor: {}, patch: {}}}",
            Quoted(Some(&self.family)),
            self.is_spider(),
            Quoted(self.major.as_deref()),
            Quoted(self.minor.as_deref()),
            Quoted(self.patch.as_deref()),
        )
    }
}
