//! Gestão Client - data access for the overtime board
//!
//! Talks to gestao-server over HTTP and falls back to a local redb file
//! when the server cannot be reached.

pub mod board;
pub mod config;
pub mod error;
pub mod export;
pub mod store;

pub use board::{OvertimeBoard, VacationView};
pub use config::{ClientConfig, LocalStoreConfig};
pub use error::{ClientError, ClientResult};
pub use export::{TabularExport, XlsxExport};
pub use store::{DataAccess, LocalStore, RemoteStore, StorageError, Store, StoreMode};

// Re-export shared types for convenience
pub use shared::{EntryCreate, EntryKind, OvertimeEntry, Vacation, VacationCreate};
