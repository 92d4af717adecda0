//! Batch KPI assignment.
//!
//! Assigns one KPI definition to many employees for one period as a single
//! logical operation with validate-then-commit semantics: every candidate
//! is validated first, then the valid subset is persisted with one bulk
//! write. Partial failure is reported per employee, never rolled back,
//! because the underlying store offers no multi-row transaction the core
//! could lean on.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{KpiRecord, Period};
use crate::store::{DefinitionStore, EmployeeDirectory, RecordStore};

/// The inputs for one batch assignment wave.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchAssignmentRequest {
    /// The KPI definition to assign.
    pub kpi_definition_id: String,
    /// The employees to assign it to.
    pub employee_ids: Vec<String>,
    /// The reporting period of the assignments.
    pub period: Period,
    /// The target copied onto every created record.
    pub target: Decimal,
    /// The first day of the assignment window.
    pub start_date: NaiveDate,
    /// The last day of the assignment window.
    pub end_date: NaiveDate,
}

/// One employee's failure in a batch assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentError {
    /// The employee the failure applies to.
    pub employee_id: String,
    /// Why the candidate was excluded from the commit set.
    pub reason: String,
}

/// The structured result of a batch assignment.
///
/// Per-row problems are data here, not errors: the operation only fails
/// outright for batch-level problems such as an unknown definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchAssignmentOutcome {
    /// How many records were persisted.
    pub success_count: usize,
    /// How many candidates failed validation or the bulk write.
    pub failure_count: usize,
    /// The itemized per-employee failures.
    pub errors: Vec<AssignmentError>,
    /// The ids of the persisted records, in candidate order.
    pub record_ids: Vec<Uuid>,
}

/// Orchestrates batch assignment against the storage seams.
pub struct BatchAssignmentCoordinator<'a> {
    definitions: &'a dyn DefinitionStore,
    employees: &'a dyn EmployeeDirectory,
    records: &'a dyn RecordStore,
}

impl<'a> BatchAssignmentCoordinator<'a> {
    /// Creates a coordinator over the given storage seams.
    pub fn new(
        definitions: &'a dyn DefinitionStore,
        employees: &'a dyn EmployeeDirectory,
        records: &'a dyn RecordStore,
    ) -> Self {
        Self {
            definitions,
            employees,
            records,
        }
    }

    /// Assigns the definition to every employee in the request.
    ///
    /// Phase 1 validates every candidate (existence, active employee,
    /// positive target, duplicate check) without writing anything, so a
    /// later candidate is never judged against an earlier candidate's
    /// fresh insert. Phase 2 persists the surviving candidates with one
    /// bulk write; if that write is refused, every surviving candidate is
    /// reported failed with the store's message.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] if the definition does not exist.
    /// - [`EngineError::Validation`] if the definition is not active or
    ///   the date window is inverted.
    /// - [`EngineError::Store`] only for loss of the store itself during
    ///   validation reads.
    pub fn assign(
        &self,
        request: &BatchAssignmentRequest,
        now: DateTime<Utc>,
    ) -> EngineResult<BatchAssignmentOutcome> {
        let definition = self
            .definitions
            .get_definition(&request.kpi_definition_id)?
            .ok_or_else(|| {
                EngineError::not_found("KpiDefinition", request.kpi_definition_id.clone())
            })?;

        if !definition.is_assignable() {
            return Err(EngineError::validation(
                "kpi_definition_id",
                format!("definition '{}' is not active", definition.id),
            ));
        }
        if request.start_date > request.end_date {
            return Err(EngineError::validation(
                "end_date",
                "must not precede start_date",
            ));
        }

        let mut errors = Vec::new();
        let mut commit_set = Vec::new();
        let mut seen_ids = Vec::new();

        // Phase 1: validate every candidate, never fail-fast.
        for employee_id in &request.employee_ids {
            if seen_ids.contains(&employee_id.as_str()) {
                errors.push(AssignmentError {
                    employee_id: employee_id.clone(),
                    reason: "employee listed more than once in this batch".to_string(),
                });
                continue;
            }
            seen_ids.push(employee_id.as_str());

            if let Some(reason) = self.validate_candidate(request, employee_id)? {
                errors.push(AssignmentError {
                    employee_id: employee_id.clone(),
                    reason,
                });
                continue;
            }

            commit_set.push(KpiRecord::assign(
                request.kpi_definition_id.clone(),
                employee_id.clone(),
                definition.department_id.clone(),
                request.period,
                request.target,
                request.start_date,
                request.end_date,
                now,
            ));
        }

        if commit_set.is_empty() {
            return Ok(BatchAssignmentOutcome {
                success_count: 0,
                failure_count: errors.len(),
                errors,
                record_ids: Vec::new(),
            });
        }

        // Phase 2: one bulk write for the whole commit set. A refusal is
        // assumed to be structural, so there is no row-by-row fallback.
        match self.records.insert_records(&commit_set) {
            Ok(()) => {
                let record_ids = commit_set.iter().map(|record| record.id).collect();
                Ok(BatchAssignmentOutcome {
                    success_count: commit_set.len(),
                    failure_count: errors.len(),
                    errors,
                    record_ids,
                })
            }
            Err(store_error) => {
                let message = store_error.to_string();
                errors.extend(commit_set.iter().map(|record| AssignmentError {
                    employee_id: record.employee_id.clone(),
                    reason: message.clone(),
                }));
                Ok(BatchAssignmentOutcome {
                    success_count: 0,
                    failure_count: errors.len(),
                    errors,
                    record_ids: Vec::new(),
                })
            }
        }
    }

    /// Returns the exclusion reason for a candidate, or None if it may be
    /// committed.
    fn validate_candidate(
        &self,
        request: &BatchAssignmentRequest,
        employee_id: &str,
    ) -> EngineResult<Option<String>> {
        if employee_id.trim().is_empty() {
            return Ok(Some("employee id must not be empty".to_string()));
        }
        if request.target <= Decimal::ZERO {
            return Ok(Some("target must be greater than zero".to_string()));
        }

        match self.employees.get_employee(employee_id)? {
            None => return Ok(Some("employee not found".to_string())),
            Some(employee) if !employee.is_assignable() => {
                return Ok(Some("employee is inactive".to_string()));
            }
            Some(_) => {}
        }

        if self.records.has_active_record(
            &request.kpi_definition_id,
            employee_id,
            &request.period,
        )? {
            return Ok(Some(format!(
                "an active record already exists for this KPI in {}",
                request.period
            )));
        }

        Ok(None)
    }
}
