use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexSet;

use crate::cache::ResultCache;
use crate::config::ParserConfig;
use crate::db::RuleSet;
use crate::error::Result;
use crate::parser::{require_section, Engine};
use crate::types::*;

pub struct UaParser {
    client_engine: Engine<Client>,
    os_engine: Engine<Os>,
    device_engine: Engine<Device>,
    mobile_client_families: IndexSet<String>,
    mobile_os_families: IndexSet<String>,
    cache: Option<ResultCache>,
}

impl UaParser {
    /// Build from the bundled rule file with the default cache.
    pub fn new() -> Result<Self> {
        Self::from_rules(RuleSet::bundled()?, ParserConfig::default())
    }

    /// Build from a `regexes.yaml` stream with the default cache.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Self::from_reader_with_config(reader, ParserConfig::default())
    }

    pub fn from_reader_with_config(reader: impl Read, config: ParserConfig) -> Result<Self> {
        Self::from_rules(RuleSet::from_reader(reader)?, config)
    }

    pub fn from_path(path: impl AsRef<Path>, config: ParserConfig) -> Result<Self> {
        Self::from_rules(RuleSet::from_path(path)?, config)
    }

    /// Compile all three sections. Fails on a missing section or on any
    /// invalid rule; nothing is built partially.
    pub fn from_rules(rules: RuleSet, config: ParserConfig) -> Result<Self> {
        let client_rules = require_section("user_agent_parsers", &rules.user_agent_parsers)?;
        let os_rules = require_section("os_parsers", &rules.os_parsers)?;
        let device_rules = require_section("device_parsers", &rules.device_parsers)?;

        let (client_engine, (os_engine, device_engine)) = rayon::join(
            || Engine::build("user_agent_parsers", client_rules),
            || {
                rayon::join(
                    || Engine::build("os_parsers", os_rules),
                    || Engine::build("device_parsers", device_rules),
                )
            },
        );
        let (client_engine, os_engine, device_engine) = (client_engine?, os_engine?, device_engine?);

        tracing::debug!(
            client_rules = client_engine.len(),
            os_rules = os_engine.len(),
            device_rules = device_engine.len(),
            cache = config.cache.is_some(),
            "user-agent parser ready"
        );

        Ok(Self {
            client_engine,
            os_engine,
            device_engine,
            mobile_client_families: rules.mobile_user_agent_families.into_iter().collect(),
            mobile_os_families: rules.mobile_os_families.into_iter().collect(),
            cache: config.cache.as_ref().map(ResultCache::new),
        })
    }

    /// Classify a User-Agent string into client, OS and device.
    ///
    /// Repeated inputs are answered from the cache (when enabled) with the
    /// very same `Arc`.
    pub fn classify(&self, ua: &str) -> Arc<Detection> {
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(ua) {
                tracing::trace!(ua, "cache hit");
                return hit;
            }
        }

        let client = self.client_engine.classify(ua);
        let os = self.os_engine.classify(ua);
        let device = self.device_for(ua, &client.family, &os.family);
        let detection = Arc::new(Detection { client, os, device });

        if let Some(cache) = &self.cache {
            cache.insert(ua, detection.clone());
        }
        detection
    }

    /// Client facet only; bypasses the cache.
    pub fn classify_client(&self, ua: &str) -> Client {
        self.client_engine.classify(ua)
    }

    /// OS facet only; bypasses the cache.
    pub fn classify_os(&self, ua: &str) -> Os {
        self.os_engine.classify(ua)
    }

    /// Device facet only; bypasses the cache. Runs the client and OS engines
    /// for the mobile flag.
    pub fn classify_device(&self, ua: &str) -> Device {
        let client = self.client_engine.classify(ua);
        let os = self.os_engine.classify(ua);
        self.device_for(ua, &client.family, &os.family)
    }

    /// Device facet for already-resolved client and OS families.
    pub fn device_for(&self, ua: &str, client_family: &str, os_family: &str) -> Device {
        let mut device = self.device_engine.classify(ua);
        device.is_mobile = self.mobile_client_families.contains(client_family)
            || self.mobile_os_families.contains(os_family);
        device
    }

    /// Number of cached detections, `None` when caching is disabled.
    pub fn cache_entry_count(&self) -> Option<u64> {
        self.cache.as_ref().map(ResultCache::entry_count)
    }
}
