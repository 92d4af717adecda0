//! Core data models for the KPI engine.
//!
//! This module contains all the domain models used throughout the engine.

mod bonus_penalty;
mod calculation_result;
mod employee;
mod kpi_definition;
mod kpi_record;
mod period;

pub use bonus_penalty::{AdjustmentType, BonusPenaltyRecord};
pub use calculation_result::{BonusCalculationResult, BonusLineItem};
pub use employee::Employee;
pub use kpi_definition::{DefinitionStatus, Frequency, KpiDefinition};
pub use kpi_record::{KpiRecord, RecordStatus};
pub use period::Period;
