use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Rule file shipped with the crate, used by [`RuleSet::bundled`].
pub const BUNDLED_RULES: &str = include_str!("../regexes/regexes.yaml");

// ---------------------------------------------------------------------------
// Rule set  (ua-parser `regexes.yaml` layout)
// ---------------------------------------------------------------------------

/// Parsed rule source: three ordered rule lists plus the mobile family sets.
///
/// Sections are optional at this level so that a missing section can be
/// reported by name when the parser is built.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleSet {
    pub user_agent_parsers: Option<Vec<RuleDescriptor>>,
    pub os_parsers: Option<Vec<RuleDescriptor>>,
    pub device_parsers: Option<Vec<RuleDescriptor>>,
    #[serde(default)]
    pub mobile_user_agent_families: Vec<String>,
    #[serde(default)]
    pub mobile_os_families: Vec<String>,
}

impl RuleSet {
    pub fn bundled() -> Result<Self> {
        Self::from_yaml_str(BUNDLED_RULES)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }
}

// ---------------------------------------------------------------------------
// Rule descriptor  (one entry of any section)
// ---------------------------------------------------------------------------

/// One declarative matching directive, as supplied by the rule source.
///
/// A descriptor with a `regex` is a pattern rule; otherwise a `name` list makes
/// it a literal rule. OS and device sections spell the replacement keys
/// differently (`os_replacement`, `device_replacement`, ...); they all land in
/// the same fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RuleDescriptor {
    #[serde(default)]
    pub regex: Option<String>,
    /// `"i"` makes the regex case-insensitive.
    #[serde(default)]
    pub regex_flag: Option<String>,
    /// Pipe-delimited literal names.
    #[serde(default)]
    pub name: Option<String>,
    /// Comma-delimited literals that must all be present.
    #[serde(default)]
    pub require: Option<String>,
    /// Comma-delimited literals that must all be absent.
    #[serde(default)]
    pub exclude: Option<String>,
    #[serde(default)]
    pub version_sep: Option<String>,
    #[serde(default, alias = "os_replacement", alias = "device_replacement")]
    pub family_replacement: Option<String>,
    #[serde(default, alias = "os_v1_replacement")]
    pub v1_replacement: Option<String>,
    #[serde(default, alias = "os_v2_replacement")]
    pub v2_replacement: Option<String>,
    #[serde(default, alias = "os_v3_replacement")]
    pub v3_replacement: Option<String>,
    #[serde(default, alias = "os_v4_replacement")]
    pub v4_replacement: Option<String>,
    #[serde(default)]
    pub brand_replacement: Option<String>,
    #[serde(default)]
    pub model_replacement: Option<String>,
}

impl RuleDescriptor {
    pub fn pattern(regex: impl Into<String>) -> Self {
        Self {
            regex: Some(regex.into()),
            ..Self::default()
        }
    }

    pub fn literal(names: impl Into<String>) -> Self {
        Self {
            name: Some(names.into()),
            ..Self::default()
        }
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family_replacement = Some(family.into());
        self
    }

    pub fn with_versions(mut self, v1: Option<&str>, v2: Option<&str>) -> Self {
        self.v1_replacement = v1.map(str::to_owned);
        self.v2_replacement = v2.map(str::to_owned);
        self
    }

    pub fn with_require(mut self, require: impl Into<String>) -> Self {
        self.require = Some(require.into());
        self
    }

    pub fn with_exclude(mut self, exclude: impl Into<String>) -> Self {
        self.exclude = Some(exclude.into());
        self
    }

    pub fn with_version_sep(mut self, sep: impl Into<String>) -> Self {
        self.version_sep = Some(sep.into());
        self
    }
}
