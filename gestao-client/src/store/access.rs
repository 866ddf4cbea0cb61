// gestao-client/src/store/access.rs
// 数据访问层 - 远程优先，失败时回退本地存储

use std::time::Duration;

use async_trait::async_trait;
use shared::{EntryCreate, OvertimeEntry, Vacation, VacationCreate};

use super::{LocalStore, RemoteStore, Store};
use crate::ClientResult;

/// Which store the data access layer talks to first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    /// Server answered the startup probe; local store is a per-call fallback
    Remote,
    /// Server unreachable at startup; remote is never contacted again
    Local,
}

/// Routes every operation to the remote store when it was reachable at
/// startup, falling back to the local store per call on transport failures.
///
/// The probe runs once. A server that comes back later is not noticed until
/// a new `DataAccess` is built.
pub struct DataAccess<R = RemoteStore, L = LocalStore> {
    remote: R,
    local: L,
    mode: StoreMode,
}

impl<R: Store, L: Store> DataAccess<R, L> {
    /// Probe the remote store once and pick the mode
    pub async fn initialize(remote: R, local: L, probe_timeout: Duration) -> Self {
        let mode = match tokio::time::timeout(probe_timeout, remote.health()).await {
            Ok(Ok(())) => StoreMode::Remote,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Remote store unreachable, using local store");
                StoreMode::Local
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = probe_timeout.as_millis() as u64,
                    "Remote health probe timed out, using local store"
                );
                StoreMode::Local
            }
        };
        tracing::info!(?mode, "Data access mode selected");
        Self::with_mode(remote, local, mode)
    }

    /// Skip the probe
    pub fn with_mode(remote: R, local: L, mode: StoreMode) -> Self {
        Self { remote, local, mode }
    }

    pub fn mode(&self) -> StoreMode {
        self.mode
    }

    pub fn is_remote_available(&self) -> bool {
        self.mode == StoreMode::Remote
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn local(&self) -> &L {
        &self.local
    }
}

#[async_trait]
impl<R: Store, L: Store> Store for DataAccess<R, L> {
    async fn health(&self) -> ClientResult<()> {
        match self.mode {
            StoreMode::Remote => self.remote.health().await,
            StoreMode::Local => self.local.health().await,
        }
    }

    async fn list_entries(&self) -> ClientResult<Vec<OvertimeEntry>> {
        if self.is_remote_available() {
            match self.remote.list_entries().await {
                Ok(entries) => return Ok(entries),
                Err(e) => tracing::warn!(error = %e, "Remote list of entries failed, reading local store"),
            }
        }
        self.local.list_entries().await
    }

    async fn create_entry(&self, payload: EntryCreate) -> ClientResult<OvertimeEntry> {
        if self.is_remote_available() {
            match self.remote.create_entry(payload.clone()).await {
                Ok(entry) => return Ok(entry),
                Err(e) if !e.is_transport() => return Err(e),
                Err(e) => tracing::warn!(error = %e, "Remote create of entry failed, saving locally"),
            }
        }
        self.local.create_entry(payload).await
    }

    async fn delete_entry(&self, id: i64) -> ClientResult<Option<OvertimeEntry>> {
        if self.is_remote_available() {
            match self.remote.delete_entry(id).await {
                Ok(Some(removed)) => return Ok(Some(removed)),
                // Unknown to the server, may be a record created while offline
                Ok(None) => tracing::debug!(id, "Entry not found remotely, deleting locally"),
                Err(e) if !e.is_transport() => return Err(e),
                Err(e) => tracing::warn!(id, error = %e, "Remote delete of entry failed, deleting locally"),
            }
        }
        self.local.delete_entry(id).await
    }

    async fn list_vacations(&self) -> ClientResult<Vec<Vacation>> {
        if self.is_remote_available() {
            match self.remote.list_vacations().await {
                Ok(vacations) => return Ok(vacations),
                Err(e) => tracing::warn!(error = %e, "Remote list of vacations failed, reading local store"),
            }
        }
        self.local.list_vacations().await
    }

    async fn create_vacation(&self, payload: VacationCreate) -> ClientResult<Vacation> {
        if self.is_remote_available() {
            match self.remote.create_vacation(payload.clone()).await {
                Ok(vacation) => return Ok(vacation),
                Err(e) if !e.is_transport() => return Err(e),
                Err(e) => tracing::warn!(error = %e, "Remote create of vacation failed, saving locally"),
            }
        }
        self.local.create_vacation(payload).await
    }

    async fn delete_vacation(&self, id: i64) -> ClientResult<Option<Vacation>> {
        if self.is_remote_available() {
            match self.remote.delete_vacation(id).await {
                Ok(Some(removed)) => return Ok(Some(removed)),
                Ok(None) => tracing::debug!(id, "Vacation not found remotely, deleting locally"),
                Err(e) if !e.is_transport() => return Err(e),
                Err(e) => tracing::warn!(id, error = %e, "Remote delete of vacation failed, deleting locally"),
            }
        }
        self.local.delete_vacation(id).await
    }
}
