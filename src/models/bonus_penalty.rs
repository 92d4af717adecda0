//! Bonus/penalty adjustment records.
//!
//! A [`BonusPenaltyRecord`] is a standalone monetary adjustment with a
//! lifecycle independent from KPI records: it is created directly by an
//! administrator action or materialized from reward engine output, and
//! updated or soft-deleted on its own.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Period;

/// Whether an adjustment adds to or subtracts from an employee's pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentType {
    /// A positive adjustment.
    Bonus,
    /// A negative adjustment.
    Penalty,
}

/// A monetary bonus or penalty for one employee and period.
///
/// # Example
///
/// ```
/// use kpi_engine::models::{AdjustmentType, BonusPenaltyRecord, Period};
/// use chrono::Utc;
/// use rust_decimal::Decimal;
///
/// let record = BonusPenaltyRecord::new(
///     "emp_001",
///     None,
///     AdjustmentType::Penalty,
///     Decimal::from(500_000),
///     "Unplanned downtime exceeded the quarterly allowance",
///     "Q3-2026".parse::<Period>().unwrap(),
///     "admin_001",
///     Utc::now(),
/// );
/// assert_eq!(record.signed_amount(), Decimal::from(-500_000));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusPenaltyRecord {
    /// Surrogate identifier for the adjustment.
    pub id: Uuid,
    /// The employee the adjustment applies to.
    pub employee_id: String,
    /// The KPI definition that motivated the adjustment, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kpi_definition_id: Option<String>,
    /// Whether this is a bonus or a penalty.
    pub adjustment_type: AdjustmentType,
    /// The adjustment amount. Always non-negative; the sign is carried by
    /// the adjustment type.
    pub amount: Decimal,
    /// Free-text reason for the adjustment.
    pub reason: String,
    /// The reporting period the adjustment belongs to.
    pub period: Period,
    /// Who created the adjustment (an administrator or the reward engine's
    /// caller).
    pub created_by: String,
    /// Soft-delete flag.
    pub active: bool,
    /// When the adjustment was created.
    pub created_at: DateTime<Utc>,
    /// When the adjustment was last mutated.
    pub updated_at: DateTime<Utc>,
}

impl BonusPenaltyRecord {
    /// Creates a new active adjustment.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        employee_id: impl Into<String>,
        kpi_definition_id: Option<String>,
        adjustment_type: AdjustmentType,
        amount: Decimal,
        reason: impl Into<String>,
        period: Period,
        created_by: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id: employee_id.into(),
            kpi_definition_id,
            adjustment_type,
            amount,
            reason: reason.into(),
            period,
            created_by: created_by.into(),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the amount with its sign: positive for bonuses, negative
    /// for penalties.
    pub fn signed_amount(&self) -> Decimal {
        match self.adjustment_type {
            AdjustmentType::Bonus => self.amount,
            AdjustmentType::Penalty => -self.amount,
        }
    }

    /// Soft-deletes the adjustment, keeping it for history.
    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        self.active = false;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_adjustment(adjustment_type: AdjustmentType) -> BonusPenaltyRecord {
        BonusPenaltyRecord::new(
            "emp_001",
            Some("kpi_uptime".to_string()),
            adjustment_type,
            Decimal::from(2_000_000),
            "Quarterly uptime target met",
            "Q3-2026".parse().unwrap(),
            "admin_001",
            Utc::now(),
        )
    }

    #[test]
    fn test_bonus_signed_amount_is_positive() {
        let record = create_test_adjustment(AdjustmentType::Bonus);
        assert_eq!(record.signed_amount(), Decimal::from(2_000_000));
    }

    #[test]
    fn test_penalty_signed_amount_is_negative() {
        let record = create_test_adjustment(AdjustmentType::Penalty);
        assert_eq!(record.signed_amount(), Decimal::from(-2_000_000));
    }

    #[test]
    fn test_new_adjustment_is_active() {
        let record = create_test_adjustment(AdjustmentType::Bonus);
        assert!(record.active);
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn test_deactivate_clears_active_flag() {
        let mut record = create_test_adjustment(AdjustmentType::Bonus);
        let now = record.created_at + chrono::Duration::minutes(1);
        record.deactivate(now);
        assert!(!record.active);
        assert_eq!(record.updated_at, now);
    }

    #[test]
    fn test_adjustment_type_serialization() {
        assert_eq!(
            serde_json::to_string(&AdjustmentType::Bonus).unwrap(),
            "\"bonus\""
        );
        assert_eq!(
            serde_json::to_string(&AdjustmentType::Penalty).unwrap(),
            "\"penalty\""
        );
    }

    #[test]
    fn test_serialize_round_trip() {
        let record = create_test_adjustment(AdjustmentType::Penalty);
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: BonusPenaltyRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }
}
