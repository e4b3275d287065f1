//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor. Cloning is cheap: the policy store and the
//! metrics counters are both handles onto shared data.

use pms_core::NameUniqueness;
use pms_store::PolicyStore;

use crate::middleware::metrics::ApiMetrics;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Which policy types require unique names.
    pub name_uniqueness: NameUniqueness,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            name_uniqueness: NameUniqueness::default(),
        }
    }
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The policy store backing every `/v1/policies` route.
    pub policies: PolicyStore,
    /// Request counters updated by the metrics middleware.
    pub metrics: ApiMetrics,
    /// Configuration the state was built from.
    pub config: AppConfig,
}

impl AppState {
    /// State with default configuration and an empty store.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// State with the given configuration and an empty store.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            policies: PolicyStore::new(config.name_uniqueness.clone()),
            metrics: ApiMetrics::new(),
            config,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pms_core::{Policy, PolicyType};

    #[test]
    fn default_config() {
        let config = AppConfig::default();
        assert_eq!(config.port, 8080);
        assert!(config.name_uniqueness.is_enforced(PolicyType::Arupa));
        assert!(!config.name_uniqueness.is_enforced(PolicyType::Frisco));
    }

    #[test]
    fn store_follows_configured_uniqueness() {
        let state = AppState::with_config(AppConfig {
            port: 0,
            name_uniqueness: NameUniqueness::none(),
        });
        assert!(state.policies.is_empty());
        for _ in 0..2 {
            state
                .policies
                .create(Policy::new("p1", "", PolicyType::Arupa).unwrap())
                .unwrap();
        }
        assert_eq!(state.policies.len(), 2);
    }

    #[test]
    fn clones_share_the_store() {
        let state = AppState::new();
        let clone = state.clone();
        clone
            .policies
            .create(Policy::new("p1", "", PolicyType::Frisco).unwrap())
            .unwrap();
        assert_eq!(state.policies.len(), 1);
    }
}
