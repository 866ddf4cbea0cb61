//! Shared types for Gestão
//!
//! Data model, serde helpers and the list transforms used by both
//! gestao-server and gestao-client. No I/O lives here.

pub mod dates;
pub mod error;
pub mod listing;
pub mod models;
pub mod util;

// Re-exports
pub use error::ModelError;
pub use models::{Decoded, EntryCreate, EntryKind, OvertimeEntry, Vacation, VacationCreate};
pub use serde::{Deserialize, Serialize};
