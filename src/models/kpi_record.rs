//! KPI record model and status enumeration.
//!
//! A [`KpiRecord`] is one employee's assignment instance of a KPI
//! definition for one reporting period. Records are created by assignment,
//! mutated by progress updates, submission and approval decisions, and
//! soft-deleted to preserve history.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Period;

/// The stored lifecycle status of a KPI record.
///
/// `overdue` is deliberately not a status: it is derived at read time from
/// the end date (see [`KpiRecord::is_overdue`]) so it can never conflict
/// with a genuine terminal state or survive a resubmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// Assigned, no progress reported yet.
    NotStarted,
    /// At least one progress update has been recorded.
    InProgress,
    /// Reported progress reached the target.
    Completed,
    /// Submitted and awaiting an approval decision.
    PendingApproval,
    /// Approved by an approver. Terminal.
    Approved,
    /// Rejected by an approver. The employee may revise and resubmit.
    Rejected,
}

impl RecordStatus {
    /// Returns the canonical snake_case label for the status.
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::PendingApproval => "pending_approval",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Returns true if the record may still be edited by the employee.
    ///
    /// Submission is the single exit from employee-editable territory;
    /// rejection re-opens the record for revision.
    pub const fn is_employee_editable(self) -> bool {
        matches!(
            self,
            Self::NotStarted | Self::InProgress | Self::Completed | Self::Rejected
        )
    }
}

/// One employee's assignment of a KPI definition for one period.
///
/// The `target` is copied from the definition (or assignment request) at
/// assignment time and must not silently track later definition edits.
/// At most one active record may exist per (definition, employee, period).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiRecord {
    /// Surrogate identifier for the record.
    pub id: Uuid,
    /// The KPI definition this record instantiates.
    pub kpi_definition_id: String,
    /// The employee the KPI is assigned to.
    pub employee_id: String,
    /// The department the assignment belongs to.
    pub department_id: String,
    /// The reporting period of the assignment.
    pub period: Period,
    /// The target, copied at assignment time.
    pub target: Decimal,
    /// The most recently reported actual value.
    pub actual: Decimal,
    /// Progress percentage, rounded to two decimal places, uncapped above
    /// 100 and never negative.
    pub progress: Decimal,
    /// The stored lifecycle status.
    pub status: RecordStatus,
    /// The first day of the assignment window.
    pub start_date: NaiveDate,
    /// The last day of the assignment window.
    pub end_date: NaiveDate,
    /// When the record was submitted for approval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    /// The employee's submission details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_details: Option<String>,
    /// Reference to an uploaded attachment, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_ref: Option<String>,
    /// When the approval decision was made.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
    /// The approver who made the decision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver_id: Option<String>,
    /// Feedback left by the approver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_feedback: Option<String>,
    /// Bonus or penalty amount attached to the record, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus_amount: Option<Decimal>,
    /// Evaluation score attached to the record, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Decimal>,
    /// Soft-delete flag. Inactive records are history and are filtered
    /// from every read query.
    pub active: bool,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last mutated.
    pub updated_at: DateTime<Utc>,
}

impl KpiRecord {
    /// Creates a freshly assigned record in `not_started`.
    #[allow(clippy::too_many_arguments)]
    pub fn assign(
        kpi_definition_id: impl Into<String>,
        employee_id: impl Into<String>,
        department_id: impl Into<String>,
        period: Period,
        target: Decimal,
        start_date: NaiveDate,
        end_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kpi_definition_id: kpi_definition_id.into(),
            employee_id: employee_id.into(),
            department_id: department_id.into(),
            period,
            target,
            actual: Decimal::ZERO,
            progress: Decimal::ZERO,
            status: RecordStatus::NotStarted,
            start_date,
            end_date,
            submitted_at: None,
            submission_details: None,
            attachment_ref: None,
            decided_at: None,
            approver_id: None,
            approval_feedback: None,
            bonus_amount: None,
            score: None,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if the record should be reported as overdue.
    ///
    /// A record is overdue when its end date has passed and no submission
    /// has been made. This is a derived condition checked at read time;
    /// the stored status never mutates on read.
    ///
    /// # Example
    ///
    /// ```
    /// use kpi_engine::models::{KpiRecord, Period};
    /// use chrono::{NaiveDate, Utc};
    /// use rust_decimal::Decimal;
    ///
    /// let record = KpiRecord::assign(
    ///     "kpi_uptime",
    ///     "emp_001",
    ///     "dept_it",
    ///     "Q1-2026".parse::<Period>().unwrap(),
    ///     Decimal::new(995, 1),
    ///     NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
    ///     Utc::now(),
    /// );
    /// assert!(record.is_overdue(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()));
    /// assert!(!record.is_overdue(NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()));
    /// ```
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        matches!(
            self.status,
            RecordStatus::NotStarted | RecordStatus::InProgress
        ) && self.end_date < today
    }

    /// Soft-deletes the record, keeping it for history.
    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        self.active = false;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn create_test_record() -> KpiRecord {
        KpiRecord::assign(
            "kpi_uptime",
            "emp_001",
            "dept_it",
            "Q1-2026".parse().unwrap(),
            Decimal::new(100, 0),
            make_date("2026-01-01"),
            make_date("2026-03-31"),
            Utc::now(),
        )
    }

    #[test]
    fn test_assign_starts_not_started_and_active() {
        let record = create_test_record();
        assert_eq!(record.status, RecordStatus::NotStarted);
        assert_eq!(record.actual, Decimal::ZERO);
        assert_eq!(record.progress, Decimal::ZERO);
        assert!(record.active);
        assert!(record.submitted_at.is_none());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(RecordStatus::NotStarted.label(), "not_started");
        assert_eq!(RecordStatus::PendingApproval.label(), "pending_approval");
        assert_eq!(RecordStatus::Rejected.label(), "rejected");
    }

    #[test]
    fn test_employee_editable_statuses() {
        assert!(RecordStatus::NotStarted.is_employee_editable());
        assert!(RecordStatus::InProgress.is_employee_editable());
        assert!(RecordStatus::Completed.is_employee_editable());
        assert!(RecordStatus::Rejected.is_employee_editable());
        assert!(!RecordStatus::PendingApproval.is_employee_editable());
        assert!(!RecordStatus::Approved.is_employee_editable());
    }

    #[test]
    fn test_overdue_requires_passed_end_date() {
        let record = create_test_record();
        assert!(!record.is_overdue(make_date("2026-02-15")));
        assert!(!record.is_overdue(make_date("2026-03-31")));
        assert!(record.is_overdue(make_date("2026-04-01")));
    }

    #[test]
    fn test_overdue_only_before_submission() {
        let mut record = create_test_record();
        let past_end = make_date("2026-04-01");

        record.status = RecordStatus::InProgress;
        assert!(record.is_overdue(past_end));

        // A rejected record is back in the employee's hands but is not
        // reported overdue; it awaits resubmission, not first progress.
        for status in [
            RecordStatus::PendingApproval,
            RecordStatus::Approved,
            RecordStatus::Rejected,
            RecordStatus::Completed,
        ] {
            record.status = status;
            assert!(!record.is_overdue(past_end), "overdue in {:?}", status);
        }
    }

    #[test]
    fn test_deactivate_clears_active_flag() {
        let mut record = create_test_record();
        let now = record.created_at + chrono::Duration::seconds(10);
        record.deactivate(now);
        assert!(!record.active);
        assert_eq!(record.updated_at, now);
    }

    #[test]
    fn test_serialize_round_trip() {
        let record = create_test_record();
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: KpiRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&RecordStatus::PendingApproval).unwrap(),
            "\"pending_approval\""
        );
    }
}
