use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use nl_core::Result;
use reqwest::Client;

use crate::adapters::{BbcAdapter, GuardianAdapter, ReutersAdapter, SourceAdapter, USER_AGENT};

/// Name → adapter mapping, built once at startup. The HTTP surface picks
/// publishers by these names.
pub struct SourceRegistry {
    adapters: HashMap<String, Arc<dyn SourceAdapter>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self {
            adapters: HashMap::new(),
        }
    }

    /// Registry with every built-in publisher. All adapters share one
    /// client with a bounded request timeout.
    pub fn with_default_sources() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        let mut registry = Self::new();
        registry.insert("bbc", Arc::new(BbcAdapter::new(client.clone())));
        registry.insert("guardian", Arc::new(GuardianAdapter::new(client.clone())));
        registry.insert("reuters", Arc::new(ReutersAdapter::new(client)));
        Ok(registry)
    }

    pub fn insert(&mut self, name: &str, adapter: Arc<dyn SourceAdapter>) {
        self.adapters.insert(name.to_string(), adapter);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn SourceAdapter>> {
        self.adapters.get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.adapters.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
