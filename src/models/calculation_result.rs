//! Reward calculation result models.
//!
//! This module contains the [`BonusCalculationResult`] type and its
//! associated structures that capture all outputs of a reward computation:
//! the quarterly, annual and penalty breakdowns plus the aggregated net
//! figure.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AdjustmentType, BonusPenaltyRecord, Period};

/// One named, amount-bearing entry in a bonus or penalty breakdown.
///
/// # Example
///
/// ```
/// use kpi_engine::models::BonusLineItem;
/// use rust_decimal::Decimal;
///
/// let item = BonusLineItem {
///     id: "system_uptime".to_string(),
///     name: "System uptime".to_string(),
///     amount: Decimal::from(2_000_000),
///     achieved: true,
///     reason: "System uptime 99.6% met the 99.5% floor".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusLineItem {
    /// The identifier of the rule that produced the item.
    pub id: String,
    /// The human-readable name of the rule.
    pub name: String,
    /// The monetary amount of the item.
    pub amount: Decimal,
    /// Whether the rule's condition held over the metrics bundle.
    /// Breakdowns only carry fired rules, so this is always true; the flag
    /// is preserved because persisted adjustments downstream carry it.
    pub achieved: bool,
    /// Human-readable explanation of why the rule fired.
    pub reason: String,
}

/// The complete result of a reward computation for one employee's
/// role and period.
///
/// The net figure is `quarterly_total + annual_total - penalty_total +
/// supplemental_salary`. The engine never persists this result; callers
/// may materialize line items into [`BonusPenaltyRecord`]s via
/// [`BonusCalculationResult::into_adjustments`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusCalculationResult {
    /// The role code the rules were selected for.
    pub role_code: String,
    /// The reporting period the computation covers.
    pub period: Period,
    /// Quarterly bonus line items that fired.
    pub quarterly: Vec<BonusLineItem>,
    /// Annual bonus line items that fired.
    pub annual: Vec<BonusLineItem>,
    /// Penalty line items that fired.
    pub penalties: Vec<BonusLineItem>,
    /// Sum of the quarterly line items.
    pub quarterly_total: Decimal,
    /// Sum of the annual line items.
    pub annual_total: Decimal,
    /// Sum of the penalty line items.
    pub penalty_total: Decimal,
    /// The supplemental salary figure supplied by the caller (zero when
    /// omitted).
    pub supplemental_salary: Decimal,
    /// The net figure.
    pub net_amount: Decimal,
}

impl BonusCalculationResult {
    /// Materializes the fired line items into persistable adjustments.
    ///
    /// Bonus breakdowns (quarterly and annual) map to
    /// [`AdjustmentType::Bonus`], penalties to [`AdjustmentType::Penalty`].
    /// The supplemental salary figure is not an adjustment and is skipped.
    pub fn into_adjustments(
        self,
        employee_id: &str,
        created_by: &str,
        now: DateTime<Utc>,
    ) -> Vec<BonusPenaltyRecord> {
        let period = self.period;
        let bonuses = self
            .quarterly
            .into_iter()
            .chain(self.annual)
            .map(|item| (AdjustmentType::Bonus, item));
        let penalties = self
            .penalties
            .into_iter()
            .map(|item| (AdjustmentType::Penalty, item));

        bonuses
            .chain(penalties)
            .map(|(adjustment_type, item)| {
                BonusPenaltyRecord::new(
                    employee_id,
                    None,
                    adjustment_type,
                    item.amount,
                    item.reason,
                    period,
                    created_by,
                    now,
                )
            })
            .collect()
    }
}
