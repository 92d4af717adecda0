//! Progress percentage calculation.
//!
//! This module provides the pure progress arithmetic used by the record
//! lifecycle: converting a raw actual measurement and a target into a
//! percentage, and deriving the lifecycle phase warranted by a new
//! percentage. Both functions are stateless and callable independently.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::RecordStatus;

/// The percentage at which a record counts as completed.
pub const COMPLETION_THRESHOLD: Decimal = Decimal::ONE_HUNDRED;

/// Computes the progress percentage for an actual value against a target.
///
/// The result is `actual / target * 100`, rounded to two decimal places,
/// uncapped above 100 and never negative. A zero target is undefined and
/// fails with [`EngineError::DivisionByZero`] rather than silently
/// producing 0 or infinity.
///
/// # Examples
///
/// ```
/// use kpi_engine::lifecycle::compute_progress;
/// use rust_decimal::Decimal;
///
/// let progress = compute_progress(Decimal::from(75), Decimal::from(50)).unwrap();
/// assert_eq!(progress, Decimal::new(15000, 2)); // 150.00
///
/// assert!(compute_progress(Decimal::from(75), Decimal::ZERO).is_err());
/// ```
pub fn compute_progress(actual: Decimal, target: Decimal) -> EngineResult<Decimal> {
    if target.is_zero() {
        return Err(EngineError::DivisionByZero);
    }

    let percent = (actual / target * Decimal::ONE_HUNDRED).round_dp(2);
    Ok(percent.max(Decimal::ZERO))
}

/// Derives the lifecycle phase warranted by a freshly computed percentage.
///
/// A `not_started` record advances to `in_progress` on its first update,
/// and a record in progress whose percentage reaches
/// [`COMPLETION_THRESHOLD`] advances to `completed`. The phase is sticky:
/// a later update that drops below the threshold does not regress it. All
/// other statuses are returned unchanged; in particular a rejected record
/// keeps its rejected status until it is resubmitted.
pub fn advance_status(current: RecordStatus, progress: Decimal) -> RecordStatus {
    let status = match current {
        RecordStatus::NotStarted => RecordStatus::InProgress,
        other => other,
    };

    if status == RecordStatus::InProgress && progress >= COMPLETION_THRESHOLD {
        RecordStatus::Completed
    } else {
        status
    }
}
