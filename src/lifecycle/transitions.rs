//! KPI record state transitions.
//!
//! This module owns the record's status field and enforces the legal
//! transitions triggered by progress updates, submissions and approval
//! decisions. All functions validate before mutating: on error the record
//! is left exactly as it was. Timestamps are passed in by the caller so
//! the transitions stay deterministic and testable.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{KpiRecord, RecordStatus};

use super::progress::{advance_status, compute_progress};

/// An approver's verdict on a submitted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Accept the submission. Terminal.
    Approve,
    /// Send the submission back for revision and resubmission.
    Reject,
}

/// Records a new actual value on an employee-editable record.
///
/// Recomputes the progress percentage and advances the lifecycle phase
/// (`not_started` to `in_progress`, and to `completed` once the target is
/// reached). No other field mutates and no notification is emitted here;
/// notifications belong to submission and decision events, which are a
/// collaborator concern.
///
/// # Errors
///
/// - [`EngineError::Validation`] if `actual` is negative.
/// - [`EngineError::InvalidStateTransition`] if the record is pending
///   approval or approved.
/// - [`EngineError::DivisionByZero`] if the record's target is zero.
pub fn record_progress(
    record: &mut KpiRecord,
    actual: Decimal,
    now: DateTime<Utc>,
) -> EngineResult<()> {
    if !record.status.is_employee_editable() {
        return Err(EngineError::invalid_transition(
            "record progress on",
            record.status.label(),
        ));
    }
    if actual.is_sign_negative() && !actual.is_zero() {
        return Err(EngineError::validation("actual", "must not be negative"));
    }

    let progress = compute_progress(actual, record.target)?;
    record.actual = actual;
    record.progress = progress;
    record.status = advance_status(record.status, progress);
    record.updated_at = now;
    Ok(())
}

/// Submits a record for approval with its final actual value.
///
/// This is the single entry point that moves a record out of
/// employee-editable territory. A rejected record may be resubmitted,
/// looping back to `pending_approval`.
///
/// # Errors
///
/// - [`EngineError::Validation`] if the submission details are empty or
///   whitespace-only, or if `actual` is negative. The record is left
///   unchanged.
/// - [`EngineError::InvalidStateTransition`] if the record is already
///   pending approval or approved.
/// - [`EngineError::DivisionByZero`] if the record's target is zero.
pub fn submit(
    record: &mut KpiRecord,
    actual: Decimal,
    details: &str,
    attachment_ref: Option<String>,
    now: DateTime<Utc>,
) -> EngineResult<()> {
    if !record.status.is_employee_editable() {
        return Err(EngineError::invalid_transition(
            "submit",
            record.status.label(),
        ));
    }

    let details = details.trim();
    if details.is_empty() {
        return Err(EngineError::validation(
            "submission_details",
            "must not be empty",
        ));
    }
    if actual.is_sign_negative() && !actual.is_zero() {
        return Err(EngineError::validation("actual", "must not be negative"));
    }

    let progress = compute_progress(actual, record.target)?;
    record.actual = actual;
    record.progress = progress;
    record.status = RecordStatus::PendingApproval;
    record.submitted_at = Some(now);
    record.submission_details = Some(details.to_string());
    record.attachment_ref = attachment_ref;
    record.updated_at = now;
    Ok(())
}

/// Applies an approver's decision to a submitted record.
///
/// Only records in `pending_approval` accept a decision. Rejection keeps
/// the actual and progress so the employee can revise and resubmit.
///
/// # Errors
///
/// - [`EngineError::InvalidStateTransition`] if the record is in any
///   status other than `pending_approval`.
pub fn decide(
    record: &mut KpiRecord,
    decision: Decision,
    approver_id: &str,
    feedback: Option<String>,
    now: DateTime<Utc>,
) -> EngineResult<()> {
    if record.status != RecordStatus::PendingApproval {
        return Err(EngineError::invalid_transition(
            "decide on",
            record.status.label(),
        ));
    }

    record.status = match decision {
        Decision::Approve => RecordStatus::Approved,
        Decision::Reject => RecordStatus::Rejected,
    };
    record.decided_at = Some(now);
    record.approver_id = Some(approver_id.to_string());
    record.approval_feedback = feedback;
    record.updated_at = now;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Period;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn decimal(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_record() -> KpiRecord {
        KpiRecord::assign(
            "kpi_uptime",
            "emp_001",
            "dept_it",
            "Q1-2026".parse::<Period>().unwrap(),
            decimal("50"),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            Utc::now(),
        )
    }

    fn submitted_record() -> KpiRecord {
        let mut record = create_test_record();
        submit(&mut record, decimal("40"), "interim report", None, Utc::now()).unwrap();
        record
    }

    #[test]
    fn test_record_progress_formula() {
        let mut record = create_test_record();
        record_progress(&mut record, decimal("75"), Utc::now()).unwrap();

        assert_eq!(record.progress, decimal("150.00"));
        assert_eq!(record.actual, decimal("75"));
        assert_eq!(record.status, RecordStatus::Completed);
    }

    #[test]
    fn test_record_progress_advances_not_started() {
        let mut record = create_test_record();
        record_progress(&mut record, decimal("10"), Utc::now()).unwrap();
        assert_eq!(record.status, RecordStatus::InProgress);
        assert_eq!(record.progress, decimal("20.00"));
    }

    #[test]
    fn test_record_progress_keeps_rejected_status() {
        let mut record = submitted_record();
        decide(&mut record, Decision::Reject, "mgr_001", None, Utc::now()).unwrap();

        record_progress(&mut record, decimal("45"), Utc::now()).unwrap();
        assert_eq!(record.status, RecordStatus::Rejected);
        assert_eq!(record.actual, decimal("45"));
    }

    #[test]
    fn test_record_progress_refused_while_pending() {
        let mut record = submitted_record();
        let before = record.clone();

        let result = record_progress(&mut record, decimal("45"), Utc::now());
        assert!(matches!(
            result,
            Err(EngineError::InvalidStateTransition { .. })
        ));
        assert_eq!(record, before);
    }

    #[test]
    fn test_record_progress_refused_when_approved() {
        let mut record = submitted_record();
        decide(&mut record, Decision::Approve, "mgr_001", None, Utc::now()).unwrap();

        let result = record_progress(&mut record, decimal("45"), Utc::now());
        assert!(matches!(
            result,
            Err(EngineError::InvalidStateTransition { .. })
        ));
    }

    #[test]
    fn test_record_progress_rejects_negative_actual() {
        let mut record = create_test_record();
        let before = record.clone();

        let result = record_progress(&mut record, decimal("-1"), Utc::now());
        assert!(matches!(result, Err(EngineError::Validation { .. })));
        assert_eq!(record, before);
    }

    #[test]
    fn test_record_progress_zero_target_fails() {
        let mut record = create_test_record();
        record.target = Decimal::ZERO;
        let before = record.clone();

        let result = record_progress(&mut record, decimal("10"), Utc::now());
        assert!(matches!(result, Err(EngineError::DivisionByZero)));
        assert_eq!(record, before);
    }

    #[test]
    fn test_submit_moves_to_pending_approval() {
        let mut record = create_test_record();
        let now = Utc::now();
        submit(
            &mut record,
            decimal("48"),
            "  Q1 final report  ",
            Some("att_001".to_string()),
            now,
        )
        .unwrap();

        assert_eq!(record.status, RecordStatus::PendingApproval);
        assert_eq!(record.submitted_at, Some(now));
        assert_eq!(record.submission_details.as_deref(), Some("Q1 final report"));
        assert_eq!(record.attachment_ref.as_deref(), Some("att_001"));
        assert_eq!(record.progress, decimal("96.00"));
    }

    #[test]
    fn test_submit_requires_details() {
        let mut record = create_test_record();
        record_progress(&mut record, decimal("40"), Utc::now()).unwrap();
        let before = record.clone();

        for details in ["", "   ", "\t\n"] {
            let result = submit(&mut record, decimal("48"), details, None, Utc::now());
            assert!(matches!(result, Err(EngineError::Validation { .. })));
            assert_eq!(record, before, "record mutated for details {:?}", details);
        }
    }

    #[test]
    fn test_submit_rejects_negative_actual() {
        let mut record = create_test_record();
        let before = record.clone();

        let result = submit(&mut record, decimal("-3"), "report", None, Utc::now());
        assert!(matches!(result, Err(EngineError::Validation { .. })));
        assert_eq!(record, before);
    }

    #[test]
    fn test_submit_refused_while_pending() {
        let mut record = submitted_record();
        let result = submit(&mut record, decimal("50"), "again", None, Utc::now());
        assert!(matches!(
            result,
            Err(EngineError::InvalidStateTransition { .. })
        ));
    }

    #[test]
    fn test_decide_approve() {
        let mut record = submitted_record();
        let now = Utc::now();
        decide(
            &mut record,
            Decision::Approve,
            "mgr_001",
            Some("good work".to_string()),
            now,
        )
        .unwrap();

        assert_eq!(record.status, RecordStatus::Approved);
        assert_eq!(record.decided_at, Some(now));
        assert_eq!(record.approver_id.as_deref(), Some("mgr_001"));
        assert_eq!(record.approval_feedback.as_deref(), Some("good work"));
    }

    #[test]
    fn test_decide_reject_keeps_actual_and_progress() {
        let mut record = submitted_record();
        let actual = record.actual;
        let progress = record.progress;

        decide(&mut record, Decision::Reject, "mgr_001", None, Utc::now()).unwrap();

        assert_eq!(record.status, RecordStatus::Rejected);
        assert_eq!(record.actual, actual);
        assert_eq!(record.progress, progress);
    }

    #[test]
    fn test_decide_requires_pending_approval() {
        for status in [
            RecordStatus::NotStarted,
            RecordStatus::InProgress,
            RecordStatus::Completed,
            RecordStatus::Approved,
            RecordStatus::Rejected,
        ] {
            let mut record = create_test_record();
            record.status = status;
            let result = decide(&mut record, Decision::Approve, "mgr_001", None, Utc::now());
            assert!(
                matches!(result, Err(EngineError::InvalidStateTransition { .. })),
                "decide allowed from {:?}",
                status
            );
        }
    }

    #[test]
    fn test_rejected_record_can_be_resubmitted() {
        let mut record = submitted_record();
        decide(&mut record, Decision::Reject, "mgr_001", None, Utc::now()).unwrap();

        record_progress(&mut record, decimal("52"), Utc::now()).unwrap();
        submit(&mut record, decimal("52"), "revised report", None, Utc::now()).unwrap();
        assert_eq!(record.status, RecordStatus::PendingApproval);

        decide(&mut record, Decision::Approve, "mgr_001", None, Utc::now()).unwrap();
        assert_eq!(record.status, RecordStatus::Approved);
    }

    #[test]
    fn test_decision_serialization() {
        assert_eq!(serde_json::to_string(&Decision::Approve).unwrap(), "\"approve\"");
        assert_eq!(serde_json::to_string(&Decision::Reject).unwrap(), "\"reject\"");
    }
}
