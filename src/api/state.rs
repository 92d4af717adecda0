//! Application state for the KPI engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::reward::RewardRuleEngine;
use crate::store::InMemoryStore;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded configuration, the reward engine built from its catalog and the
/// store. Everything is constructed once at process start and passed by
/// reference; there is no ambient mutable state.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    engine: Arc<RewardRuleEngine>,
    store: Arc<InMemoryStore>,
}

impl AppState {
    /// Creates a new application state from a loaded configuration and a
    /// store.
    pub fn new(config: ConfigLoader, store: InMemoryStore) -> Self {
        let engine = RewardRuleEngine::new(config.catalog().clone());
        Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
            store: Arc::new(store),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns a reference to the reward engine.
    pub fn engine(&self) -> &RewardRuleEngine {
        &self.engine
    }

    /// Returns a reference to the store.
    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
