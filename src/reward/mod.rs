//! Reward computation for the KPI engine.
//!
//! This module contains the metrics bundle input type and the rule engine
//! that converts role-keyed declarative rules plus a bundle into a
//! [`crate::models::BonusCalculationResult`].

mod engine;
mod metrics;

pub use engine::RewardRuleEngine;
pub use metrics::{MetricValue, PerformanceMetricsBundle};
