//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ClientResult;
use crate::store::{DataAccess, LocalStore, RemoteStore};

/// Default storage key for overtime entries
pub const DEFAULT_ENTRIES_KEY: &str = "gestao_overtime_entries_v1";

/// Default storage key for vacations
pub const DEFAULT_VACATIONS_KEY: &str = "gestao_vacations_v1";

/// Local store location and slot keys
///
/// Keys are configuration so that several stores (or tests) can share one
/// file without seeing each other's collections.
#[derive(Debug, Clone)]
pub struct LocalStoreConfig {
    /// redb database file
    pub path: PathBuf,
    pub entries_key: String,
    pub vacations_key: String,
}

impl LocalStoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries_key: DEFAULT_ENTRIES_KEY.to_string(),
            vacations_key: DEFAULT_VACATIONS_KEY.to_string(),
        }
    }

    /// Override both slot keys
    pub fn with_keys(mut self, entries_key: impl Into<String>, vacations_key: impl Into<String>) -> Self {
        self.entries_key = entries_key.into();
        self.vacations_key = vacations_key.into();
        self
    }
}

impl Default for LocalStoreConfig {
    fn default() -> Self {
        Self::new("gestao-local.redb")
    }
}

/// Client configuration for connecting to the Gestão server
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:3000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Startup health probe timeout in milliseconds
    pub probe_timeout_ms: u64,

    /// Fallback store
    pub local: LocalStoreConfig,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            probe_timeout_ms: 1500,
            local: LocalStoreConfig::default(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the startup probe timeout
    pub fn with_probe_timeout_ms(mut self, millis: u64) -> Self {
        self.probe_timeout_ms = millis;
        self
    }

    /// Set the local store configuration
    pub fn with_local_store(mut self, local: LocalStoreConfig) -> Self {
        self.local = local;
        self
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    /// Open both stores and run the one-time reachability probe
    pub async fn build_data_access(&self) -> ClientResult<DataAccess> {
        let remote = RemoteStore::new(self)?;
        let local = LocalStore::open(&self.local)?;
        Ok(DataAccess::initialize(remote, local, self.probe_timeout()).await)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:3000")
    }
}
