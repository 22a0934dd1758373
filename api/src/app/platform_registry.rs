//! Platform adapter registry
//!
//! Maps each platform to its adapter so the sync pipeline never switches on
//! platform names itself.

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::Client;

use crate::adapters::{CodeforcesAdapter, HackerRankAdapter, LeetCodeAdapter};
use crate::config::Config;
use crate::domain::entities::Platform;
use crate::domain::ports::PlatformAdapter;

/// Lookup table of platform adapters
#[derive(Default, Clone)]
pub struct PlatformRegistry {
    adapters: HashMap<Platform, Arc<dyn PlatformAdapter>>,
}

impl PlatformRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in judge adapters sharing one HTTP client
    pub fn with_defaults(http: Client, config: &Config) -> Self {
        Self::new()
            .register(Arc::new(LeetCodeAdapter::new(
                http.clone(),
                config.leetcode_url.clone(),
            )))
            .register(Arc::new(CodeforcesAdapter::new(
                http.clone(),
                config.codeforces_url.clone(),
            )))
            .register(Arc::new(HackerRankAdapter::new(
                http,
                config.hackerrank_url.clone(),
            )))
    }

    /// Register an adapter under the platform it reports, replacing any previous one
    pub fn register(mut self, adapter: Arc<dyn PlatformAdapter>) -> Self {
        self.adapters.insert(adapter.platform(), adapter);
        self
    }

    pub fn get(&self, platform: Platform) -> Option<Arc<dyn PlatformAdapter>> {
        self.adapters.get(&platform).cloned()
    }

    pub fn platforms(&self) -> Vec<Platform> {
        let mut platforms: Vec<_> = self.adapters.keys().copied().collect();
        platforms.sort();
        platforms
    }
}
