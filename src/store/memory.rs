//! In-memory store implementation.
//!
//! Backs all four storage traits with `RwLock`-guarded maps. Employees and
//! definitions are reference data seeded by the surrounding system; records
//! and adjustments are owned by the engine's operations.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{BonusPenaltyRecord, Employee, KpiDefinition, KpiRecord, Period};

use super::{AdjustmentStore, DefinitionStore, EmployeeDirectory, RecordStore};

/// A thread-safe, map-backed store.
///
/// # Example
///
/// ```
/// use kpi_engine::store::{InMemoryStore, EmployeeDirectory};
/// use kpi_engine::models::Employee;
///
/// let store = InMemoryStore::new();
/// store.seed_employee(Employee {
///     id: "emp_001".to_string(),
///     name: "Sari Wulandari".to_string(),
///     role_code: "IT_STAFF".to_string(),
///     department_id: "dept_it".to_string(),
///     active: true,
/// }).unwrap();
///
/// assert!(store.get_employee("emp_001").unwrap().is_some());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    definitions: RwLock<HashMap<String, KpiDefinition>>,
    employees: RwLock<HashMap<String, Employee>>,
    records: RwLock<HashMap<Uuid, KpiRecord>>,
    adjustments: RwLock<HashMap<Uuid, BonusPenaltyRecord>>,
}

fn poisoned<T>(_: T) -> EngineError {
    EngineError::Store {
        message: "store lock poisoned".to_string(),
    }
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a KPI definition (reference data owned by the surrounding
    /// system).
    pub fn seed_definition(&self, definition: KpiDefinition) -> EngineResult<()> {
        let mut definitions = self.definitions.write().map_err(poisoned)?;
        definitions.insert(definition.id.clone(), definition);
        Ok(())
    }

    /// Seeds an employee (reference data owned by the surrounding system).
    pub fn seed_employee(&self, employee: Employee) -> EngineResult<()> {
        let mut employees = self.employees.write().map_err(poisoned)?;
        employees.insert(employee.id.clone(), employee);
        Ok(())
    }
}

impl DefinitionStore for InMemoryStore {
    fn get_definition(&self, id: &str) -> EngineResult<Option<KpiDefinition>> {
        let definitions = self.definitions.read().map_err(poisoned)?;
        Ok(definitions.get(id).cloned())
    }
}

impl EmployeeDirectory for InMemoryStore {
    fn get_employee(&self, id: &str) -> EngineResult<Option<Employee>> {
        let employees = self.employees.read().map_err(poisoned)?;
        Ok(employees.get(id).cloned())
    }
}

impl RecordStore for InMemoryStore {
    fn insert_records(&self, records: &[KpiRecord]) -> EngineResult<()> {
        let mut map = self.records.write().map_err(poisoned)?;

        // Enforce storage constraints for the whole batch before touching
        // the map: id uniqueness and the one-active-record-per-triple
        // constraint, both against stored rows and within the batch.
        let mut batch_triples = Vec::with_capacity(records.len());
        for record in records {
            if map.contains_key(&record.id) {
                return Err(EngineError::Store {
                    message: format!("record id {} already exists", record.id),
                });
            }
            let triple = (
                record.kpi_definition_id.as_str(),
                record.employee_id.as_str(),
                record.period,
            );
            let stored_conflict = map.values().any(|existing| {
                existing.active
                    && existing.kpi_definition_id == record.kpi_definition_id
                    && existing.employee_id == record.employee_id
                    && existing.period == record.period
            });
            if stored_conflict || batch_triples.contains(&triple) {
                return Err(EngineError::Store {
                    message: format!(
                        "active record already exists for definition '{}', employee '{}', period {}",
                        record.kpi_definition_id, record.employee_id, record.period
                    ),
                });
            }
            batch_triples.push(triple);
        }

        for record in records {
            map.insert(record.id, record.clone());
        }
        Ok(())
    }

    fn get_record(&self, id: Uuid) -> EngineResult<Option<KpiRecord>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.get(&id).filter(|r| r.active).cloned())
    }

    fn update_record(&self, record: &KpiRecord) -> EngineResult<()> {
        let mut records = self.records.write().map_err(poisoned)?;
        if !records.contains_key(&record.id) {
            return Err(EngineError::not_found("KpiRecord", record.id.to_string()));
        }
        records.insert(record.id, record.clone());
        Ok(())
    }

    fn has_active_record(
        &self,
        definition_id: &str,
        employee_id: &str,
        period: &Period,
    ) -> EngineResult<bool> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.values().any(|record| {
            record.active
                && record.kpi_definition_id == definition_id
                && record.employee_id == employee_id
                && record.period == *period
        }))
    }

    fn list_records_for_employee(&self, employee_id: &str) -> EngineResult<Vec<KpiRecord>> {
        let records = self.records.read().map_err(poisoned)?;
        let mut result: Vec<KpiRecord> = records
            .values()
            .filter(|record| record.active && record.employee_id == employee_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(result)
    }
}

impl AdjustmentStore for InMemoryStore {
    fn insert_adjustment(&self, adjustment: &BonusPenaltyRecord) -> EngineResult<()> {
        let mut adjustments = self.adjustments.write().map_err(poisoned)?;
        if adjustments.contains_key(&adjustment.id) {
            return Err(EngineError::Store {
                message: format!("adjustment id {} already exists", adjustment.id),
            });
        }
        adjustments.insert(adjustment.id, adjustment.clone());
        Ok(())
    }

    fn get_adjustment(&self, id: Uuid) -> EngineResult<Option<BonusPenaltyRecord>> {
        let adjustments = self.adjustments.read().map_err(poisoned)?;
        Ok(adjustments.get(&id).filter(|a| a.active).cloned())
    }

    fn update_adjustment(&self, adjustment: &BonusPenaltyRecord) -> EngineResult<()> {
        let mut adjustments = self.adjustments.write().map_err(poisoned)?;
        if !adjustments.contains_key(&adjustment.id) {
            return Err(EngineError::not_found(
                "BonusPenaltyRecord",
                adjustment.id.to_string(),
            ));
        }
        adjustments.insert(adjustment.id, adjustment.clone());
        Ok(())
    }

    fn list_adjustments_for_employee(
        &self,
        employee_id: &str,
    ) -> EngineResult<Vec<BonusPenaltyRecord>> {
        let adjustments = self.adjustments.read().map_err(poisoned)?;
        let mut result: Vec<BonusPenaltyRecord> = adjustments
            .values()
            .filter(|a| a.active && a.employee_id == employee_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(result)
    }
}
