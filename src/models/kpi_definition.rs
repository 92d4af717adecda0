//! KPI definition model and related types.
//!
//! A [`KpiDefinition`] is the immutable-per-version description of a goal
//! that can be assigned to employees. Definitions are created by an
//! administrator, mutated only by explicit edit, and never deleted, only
//! archived.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How often a KPI is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Measured every day.
    Daily,
    /// Measured every week.
    Weekly,
    /// Measured every month.
    Monthly,
    /// Measured every quarter.
    Quarterly,
    /// Measured every year.
    Yearly,
}

/// The lifecycle status of a KPI definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefinitionStatus {
    /// The definition may be assigned to employees.
    Active,
    /// The definition is temporarily suspended from new assignments.
    Paused,
    /// The definition is retired. Archiving is the soft deactivation;
    /// existing records keep their copied targets.
    Archived,
}

/// The description of a performance goal.
///
/// # Example
///
/// ```
/// use kpi_engine::models::{DefinitionStatus, Frequency, KpiDefinition};
/// use chrono::Utc;
/// use rust_decimal::Decimal;
///
/// let definition = KpiDefinition {
///     id: "kpi_uptime".to_string(),
///     name: "System uptime".to_string(),
///     description: "Monthly availability of production systems".to_string(),
///     department_id: "dept_it".to_string(),
///     target: Decimal::new(995, 1),
///     unit: "percent".to_string(),
///     frequency: Frequency::Quarterly,
///     status: DefinitionStatus::Active,
///     reward_note: None,
///     penalty_note: None,
///     created_by: "admin_001".to_string(),
///     created_at: Utc::now(),
///     updated_at: Utc::now(),
/// };
/// assert!(definition.is_assignable());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiDefinition {
    /// Unique identifier for the definition.
    pub id: String,
    /// The human-readable name of the goal.
    pub name: String,
    /// A description of what the goal measures.
    pub description: String,
    /// The department that owns the goal.
    pub department_id: String,
    /// The numeric target to measure actuals against.
    pub target: Decimal,
    /// The unit label for the target (e.g., "percent", "patients").
    pub unit: String,
    /// How often the KPI is measured.
    pub frequency: Frequency,
    /// The lifecycle status of the definition.
    pub status: DefinitionStatus,
    /// Free-form description of the reward configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_note: Option<String>,
    /// Free-form description of the penalty configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalty_note: Option<String>,
    /// The administrator who created the definition.
    pub created_by: String,
    /// When the definition was created.
    pub created_at: DateTime<Utc>,
    /// When the definition was last edited.
    pub updated_at: DateTime<Utc>,
}

impl KpiDefinition {
    /// Returns true if the definition may be assigned to employees.
    pub fn is_assignable(&self) -> bool {
        self.status == DefinitionStatus::Active
    }

    /// Archives the definition, retiring it from new assignments.
    pub fn archive(&mut self, now: DateTime<Utc>) {
        self.status = DefinitionStatus::Archived;
        self.updated_at = now;
    }
}
