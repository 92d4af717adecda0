//! Configuration loading and management for the KPI engine.
//!
//! This module provides functionality to load the engine metadata and the
//! reward rule catalog from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use kpi_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/kpi").unwrap();
//! println!("Loaded catalog: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{Comparator, EngineConfig, EngineMetadata, RewardRule, RoleRuleSet, RuleCatalog};
