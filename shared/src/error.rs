//! Error types for the shared crate
//!
//! Model-level validation errors, raised before anything reaches a store.

use thiserror::Error;

/// Payload validation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A required text field is empty after trimming
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// Hours is not a finite number
    #[error("hours must be a number")]
    InvalidHours,

    /// Vacation ends before it starts
    #[error("end date must not be before start date")]
    InvalidDateRange,

    /// Entry type other than `extra` / `desconto`
    #[error("unknown entry type: {0}")]
    UnknownKind(String),
}
