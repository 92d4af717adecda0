//! Error types for the KPI engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during KPI lifecycle management
//! and reward computation.

use thiserror::Error;

/// The main error type for the KPI engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use kpi_engine::error::EngineError;
///
/// let error = EngineError::Validation {
///     field: "submission_details".to_string(),
///     message: "must not be empty".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid field 'submission_details': must not be empty");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// An operation input was missing or invalid.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An operation was attempted from a record status that does not permit it.
    #[error("Cannot {action} a record with status '{status}'")]
    InvalidStateTransition {
        /// The action that was attempted (e.g., "decide").
        action: String,
        /// The record status at the time of the attempt.
        status: String,
    },

    /// Progress was computed against a zero target.
    #[error("Progress is undefined for a zero target")]
    DivisionByZero,

    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g., "KpiRecord", "Employee").
        entity: String,
        /// The identifier that was not found.
        id: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The persistence layer reported a failure.
    #[error("Store error: {message}")]
    Store {
        /// A description of the store failure.
        message: String,
    },
}

impl EngineError {
    /// Creates a validation error for a field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid-state-transition error for an action.
    pub fn invalid_transition(action: impl Into<String>, status: impl Into<String>) -> Self {
        Self::InvalidStateTransition {
            action: action.into(),
            status: status.into(),
        }
    }

    /// Creates a not-found error for an entity reference.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
