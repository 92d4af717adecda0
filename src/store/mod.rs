//! Persistence seams for the KPI engine.
//!
//! The core consumes storage through the traits in this module; the
//! surrounding system decides what actually backs them. The crate ships
//! [`InMemoryStore`], a thread-safe map-backed implementation used by the
//! API state, integration tests and benchmarks.
//!
//! Soft deletion is universal: every read query filters on the entity's
//! `active` flag, so deactivated rows are history, not results.

mod memory;

pub use memory::InMemoryStore;

use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{BonusPenaltyRecord, Employee, KpiDefinition, KpiRecord, Period};

/// Read access to KPI definitions.
pub trait DefinitionStore: Send + Sync {
    /// Looks up a definition by id.
    fn get_definition(&self, id: &str) -> EngineResult<Option<KpiDefinition>>;
}

/// Read access to employee reference data.
pub trait EmployeeDirectory: Send + Sync {
    /// Looks up an employee by id.
    fn get_employee(&self, id: &str) -> EngineResult<Option<Employee>>;
}

/// Storage for KPI records.
pub trait RecordStore: Send + Sync {
    /// Persists a batch of new records as one bulk write.
    ///
    /// The write is all-or-nothing: if any record violates a storage
    /// constraint the whole batch is refused and nothing is persisted.
    fn insert_records(&self, records: &[KpiRecord]) -> EngineResult<()>;

    /// Looks up an active record by id.
    fn get_record(&self, id: Uuid) -> EngineResult<Option<KpiRecord>>;

    /// Replaces a previously persisted record.
    fn update_record(&self, record: &KpiRecord) -> EngineResult<()>;

    /// Returns true if an active record already exists for the
    /// (definition, employee, period) triple.
    fn has_active_record(
        &self,
        definition_id: &str,
        employee_id: &str,
        period: &Period,
    ) -> EngineResult<bool>;

    /// Lists an employee's active records.
    fn list_records_for_employee(&self, employee_id: &str) -> EngineResult<Vec<KpiRecord>>;
}

/// Storage for bonus/penalty adjustments.
pub trait AdjustmentStore: Send + Sync {
    /// Persists a new adjustment.
    fn insert_adjustment(&self, adjustment: &BonusPenaltyRecord) -> EngineResult<()>;

    /// Looks up an active adjustment by id.
    fn get_adjustment(&self, id: Uuid) -> EngineResult<Option<BonusPenaltyRecord>>;

    /// Replaces a previously persisted adjustment.
    fn update_adjustment(&self, adjustment: &BonusPenaltyRecord) -> EngineResult<()>;

    /// Lists an employee's active adjustments.
    fn list_adjustments_for_employee(
        &self,
        employee_id: &str,
    ) -> EngineResult<Vec<BonusPenaltyRecord>>;
}
