//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! metadata and the reward rule catalog from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, EngineMetadata, RuleCatalog};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/kpi/
/// ├── engine.yaml        # Catalog metadata (name, version, currency)
/// └── reward_rules.yaml  # Role-keyed reward rule sets
/// ```
///
/// # Example
///
/// ```no_run
/// use kpi_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/kpi").unwrap();
/// println!("Loaded catalog: {}", loader.metadata().name);
/// assert!(loader.catalog().has_role("IT_STAFF"));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/kpi")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The rule catalog fails validation (negative amount, blank rule
    ///   field, or duplicate rule id within a role)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine_path = path.join("engine.yaml");
        let metadata = Self::load_yaml::<EngineMetadata>(&engine_path)?;

        let rules_path = path.join("reward_rules.yaml");
        let catalog = Self::load_yaml::<RuleCatalog>(&rules_path)?;
        Self::validate_catalog(&catalog, &rules_path)?;

        Ok(Self {
            config: EngineConfig::new(metadata, catalog),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Checks structural invariants the YAML schema cannot express.
    fn validate_catalog(catalog: &RuleCatalog, path: &Path) -> EngineResult<()> {
        let named_sets = catalog
            .roles
            .iter()
            .map(|(role, set)| (role.as_str(), set))
            .chain(std::iter::once(("default", &catalog.default)));

        for (role, set) in named_sets {
            let mut seen = std::collections::HashSet::new();
            for rule in set.all_rules() {
                let fail = |message: String| EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message,
                };

                if rule.id.trim().is_empty() || rule.metric.trim().is_empty() {
                    return Err(fail(format!(
                        "rule set '{}' contains a rule with a blank id or metric",
                        role
                    )));
                }
                if rule.amount.is_sign_negative() {
                    return Err(fail(format!(
                        "rule '{}' in set '{}' has a negative amount",
                        rule.id, role
                    )));
                }
                if !seen.insert(rule.id.as_str()) {
                    return Err(fail(format!(
                        "rule set '{}' declares rule id '{}' more than once",
                        role, rule.id
                    )));
                }
            }
        }

        Ok(())
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the engine metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        self.config.metadata()
    }

    /// Returns the reward rule catalog.
    pub fn catalog(&self) -> &RuleCatalog {
        self.config.catalog()
    }
}
