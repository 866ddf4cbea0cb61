// gestao-client/src/store/mod.rs
// 数据存储 - Store trait 与实现

pub mod access;
pub mod local;
pub mod remote;

use async_trait::async_trait;
use shared::{EntryCreate, OvertimeEntry, Vacation, VacationCreate};

use crate::ClientResult;

pub use access::{DataAccess, StoreMode};
pub use local::{LocalStore, StorageError};
pub use remote::RemoteStore;

/// Persistence seam shared by the remote store, the local store and the
/// data access layer that routes between them.
///
/// Deleting an id that does not exist is `Ok(None)` in every implementation.
#[async_trait]
pub trait Store: Send + Sync {
    /// Reachability check
    async fn health(&self) -> ClientResult<()>;

    /// Entries, newest first
    async fn list_entries(&self) -> ClientResult<Vec<OvertimeEntry>>;
    async fn create_entry(&self, payload: EntryCreate) -> ClientResult<OvertimeEntry>;
    async fn delete_entry(&self, id: i64) -> ClientResult<Option<OvertimeEntry>>;

    /// Vacations, in insertion order
    async fn list_vacations(&self) -> ClientResult<Vec<Vacation>>;
    async fn create_vacation(&self, payload: VacationCreate) -> ClientResult<Vacation>;
    async fn delete_vacation(&self, id: i64) -> ClientResult<Option<Vacation>>;
}
