use serde::Deserialize;

pub const DEFAULT_INITIAL_CAPACITY: usize = 1_000;
pub const DEFAULT_MAX_CAPACITY: u64 = 150_000;

/// Sizing of the per-parser result cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub initial_capacity: usize,
    /// Hard upper bound on the number of cached detections.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }
}

/// Construction-time options for [`crate::UaParser`].
///
/// `cache: None` disables memoization entirely; every call then runs all
/// three engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub cache: Option<CacheConfig>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            cache: Some(CacheConfig::default()),
        }
    }
}

impl ParserConfig {
    pub fn without_cache() -> Self {
        Self { cache: None }
    }

    pub fn with_cache(cache: CacheConfig) -> Self {
        Self { cache: Some(cache) }
    }
}
