//! Performance metrics bundles.
//!
//! A [`PerformanceMetricsBundle`] is the transient, caller-supplied input
//! to reward computation: a map of named measurements for one employee and
//! period. The engine never persists bundles.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single measurement: either a numeric reading or a yes/no flag.
///
/// Serialized untagged, so JSON/YAML numbers become [`MetricValue::Number`]
/// and booleans become [`MetricValue::Flag`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// A yes/no measurement (e.g., "backup completed").
    Flag(bool),
    /// A numeric measurement (e.g., uptime percentage, job count).
    Number(Decimal),
}

impl std::fmt::Display for MetricValue {
    /// Numbers render normalized (no trailing zeros), flags as
    /// `yes`/`no`. Used when rendering rule reasons.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag(true) => write!(f, "yes"),
            Self::Flag(false) => write!(f, "no"),
            Self::Number(value) => write!(f, "{}", value.normalize()),
        }
    }
}

impl From<bool> for MetricValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<Decimal> for MetricValue {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        Self::Number(Decimal::from(value))
    }
}

/// Named measurements for one employee and period.
///
/// Bundles may be partial: rules over missing fields simply do not fire,
/// they never error.
///
/// # Example
///
/// ```
/// use kpi_engine::reward::{MetricValue, PerformanceMetricsBundle};
/// use rust_decimal::Decimal;
///
/// let bundle: PerformanceMetricsBundle = [
///     ("systemUptime".to_string(), MetricValue::Number(Decimal::new(996, 1))),
///     ("backupCompleted".to_string(), MetricValue::Flag(true)),
/// ]
/// .into_iter()
/// .collect();
///
/// assert!(bundle.get("systemUptime").is_some());
/// assert!(bundle.get("systemDowntime").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PerformanceMetricsBundle {
    metrics: HashMap<String, MetricValue>,
}

impl PerformanceMetricsBundle {
    /// Creates an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a measurement by field name.
    pub fn get(&self, name: &str) -> Option<MetricValue> {
        self.metrics.get(name).copied()
    }

    /// Adds or replaces a measurement.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<MetricValue>) {
        self.metrics.insert(name.into(), value.into());
    }

    /// Returns the number of measurements in the bundle.
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Returns true if the bundle carries no measurements.
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

impl FromIterator<(String, MetricValue)> for PerformanceMetricsBundle {
    fn from_iter<T: IntoIterator<Item = (String, MetricValue)>>(iter: T) -> Self {
        Self {
            metrics: iter.into_iter().collect(),
        }
    }
}
