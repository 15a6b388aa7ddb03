use std::sync::Arc;

use moka::sync::Cache;

use crate::config::CacheConfig;
use crate::types::Detection;

/// Bounded, thread-safe memo of raw User-Agent → detection.
///
/// Entries are complete `Arc<Detection>` values, so readers never see a
/// partially built result. Eviction order is moka's business; only the
/// capacity bound is guaranteed.
pub(crate) struct ResultCache {
    inner: Cache<String, Arc<Detection>>,
}

impl ResultCache {
    pub fn new(config: &CacheConfig) -> Self {
        let inner = Cache::builder()
            .initial_capacity(config.initial_capacity)
            .max_capacity(config.max_capacity)
            .build();
        Self { inner }
    }

    pub fn get(&self, ua: &str) -> Option<Arc<Detection>> {
        self.inner.get(ua)
    }

    pub fn insert(&self, ua: &str, detection: Arc<Detection>) {
        self.inner.insert(ua.to_owned(), detection);
    }

    /// Entry count after flushing pending maintenance.
    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }
}
