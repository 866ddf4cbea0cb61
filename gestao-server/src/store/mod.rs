//! JSON document storage
//!
//! The whole dataset lives in one JSON file:
//!
//! ```json
//! {
//!   "seq": { "entries": 2, "vacations": 1 },
//!   "entries": [ ... ],
//!   "vacations": [ ... ]
//! }
//! ```

mod document;

pub use document::{Document, DocumentStore, Sequences};

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
