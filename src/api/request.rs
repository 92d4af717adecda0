//! Request types for the KPI engine API.
//!
//! This module defines the JSON request structures for the engine's
//! endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assignment::BatchAssignmentRequest;
use crate::lifecycle::Decision;
use crate::models::{AdjustmentType, Period};
use crate::reward::PerformanceMetricsBundle;

/// Request body for `POST /records/:id/progress`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressRequest {
    /// The new actual value.
    pub actual: Decimal,
}

/// Request body for `POST /records/:id/submit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    /// The final actual value for the period.
    pub actual: Decimal,
    /// The submission details. Must not be empty.
    pub details: String,
    /// Reference to an uploaded attachment, if any.
    #[serde(default)]
    pub attachment_ref: Option<String>,
}

/// Request body for `POST /records/:id/decision`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRequest {
    /// The approver's verdict.
    pub decision: Decision,
    /// The approver making the decision.
    pub approver_id: String,
    /// Optional feedback for the employee.
    #[serde(default)]
    pub feedback: Option<String>,
}

/// Request body for `POST /records/assign`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchAssignRequest {
    /// The KPI definition to assign.
    pub kpi_definition_id: String,
    /// The employees to assign it to.
    pub employee_ids: Vec<String>,
    /// The reporting period (e.g., "Q3-2026").
    pub period: Period,
    /// The target copied onto every created record.
    pub target: Decimal,
    /// The first day of the assignment window.
    pub start_date: NaiveDate,
    /// The last day of the assignment window.
    pub end_date: NaiveDate,
}

impl From<BatchAssignRequest> for BatchAssignmentRequest {
    fn from(req: BatchAssignRequest) -> Self {
        BatchAssignmentRequest {
            kpi_definition_id: req.kpi_definition_id,
            employee_ids: req.employee_ids,
            period: req.period,
            target: req.target,
            start_date: req.start_date,
            end_date: req.end_date,
        }
    }
}

/// Request body for `POST /rewards/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardRequest {
    /// The role code selecting the rule set.
    pub role_code: String,
    /// The reporting period the computation covers.
    pub period: Period,
    /// The performance measurements for the employee and period.
    pub metrics: PerformanceMetricsBundle,
    /// Supplemental salary figure added to the net amount.
    #[serde(default)]
    pub supplemental_salary: Option<Decimal>,
}

/// Request body for `POST /adjustments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentRequest {
    /// The employee the adjustment applies to.
    pub employee_id: String,
    /// The KPI definition that motivated the adjustment, if any.
    #[serde(default)]
    pub kpi_definition_id: Option<String>,
    /// Whether this is a bonus or a penalty.
    pub adjustment_type: AdjustmentType,
    /// The adjustment amount (non-negative).
    pub amount: Decimal,
    /// Free-text reason for the adjustment.
    pub reason: String,
    /// The reporting period the adjustment belongs to.
    pub period: Period,
    /// Who is creating the adjustment.
    pub created_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_batch_assign_request() {
        let json = r#"{
            "kpi_definition_id": "kpi_uptime",
            "employee_ids": ["emp_001", "emp_002"],
            "period": "Q3-2026",
            "target": 100,
            "start_date": "2026-07-01",
            "end_date": "2026-09-30"
        }"#;

        let request: BatchAssignRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.employee_ids.len(), 2);
        assert_eq!(request.period, "Q3-2026".parse().unwrap());

        let domain: BatchAssignmentRequest = request.into();
        assert_eq!(domain.kpi_definition_id, "kpi_uptime");
    }

    #[test]
    fn test_deserialize_reward_request_with_mixed_metrics() {
        let json = r#"{
            "role_code": "IT_STAFF",
            "period": "Q3-2026",
            "metrics": {
                "systemUptime": 99.6,
                "backupCompleted": true
            }
        }"#;

        let request: RewardRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.role_code, "IT_STAFF");
        assert!(request.supplemental_salary.is_none());
        assert_eq!(request.metrics.len(), 2);
    }

    #[test]
    fn test_deserialize_decision_request() {
        let json = r#"{"decision": "approve", "approver_id": "mgr_001"}"#;
        let request: DecisionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.decision, Decision::Approve);
        assert!(request.feedback.is_none());
    }

    #[test]
    fn test_deserialize_submit_request_defaults_attachment() {
        let json = r#"{"actual": 48, "details": "Q3 final report"}"#;
        let request: SubmitRequest = serde_json::from_str(json).unwrap();
        assert!(request.attachment_ref.is_none());
    }
}
