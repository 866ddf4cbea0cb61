//! File-backed document store
//!
//! Every operation reads the full document, mutates it and rewrites it whole
//! (temp file + rename). The async mutex serializes read-modify-write cycles
//! inside one process only; two processes sharing a file still race and the
//! last full write wins.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::models::{Decoded, EntryCreate, OvertimeEntry, Vacation, VacationCreate};
use tokio::sync::Mutex;

use super::StoreResult;

/// Per-collection sequence counters (last assigned id)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequences {
    #[serde(default)]
    pub entries: i64,
    #[serde(default)]
    pub vacations: i64,
}

/// On-disk shape, records kept as raw JSON until decoded one by one
#[derive(Debug, Default, Serialize, Deserialize)]
struct RawDocument {
    #[serde(default)]
    seq: Sequences,
    #[serde(default)]
    entries: Vec<Value>,
    #[serde(default)]
    vacations: Vec<Value>,
}

/// The persisted document
///
/// Records that fail to decode (e.g. a `null` date left by an older writer)
/// are not served, but they are written back untouched and their ids stay
/// reserved.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub seq: Sequences,
    pub entries: Decoded<OvertimeEntry>,
    pub vacations: Decoded<Vacation>,
}

impl Document {
    fn from_raw(raw: RawDocument) -> Self {
        let document = Self {
            seq: raw.seq,
            entries: Decoded::from_values(raw.entries),
            vacations: Decoded::from_values(raw.vacations),
        };
        let skipped = document.entries.rejected.len() + document.vacations.rejected.len();
        if skipped > 0 {
            tracing::warn!(
                entries = document.entries.rejected.len(),
                vacations = document.vacations.rejected.len(),
                "Skipping undecodable records in document"
            );
        }
        document
    }

    fn to_raw(&self) -> serde_json::Result<RawDocument> {
        Ok(RawDocument {
            seq: self.seq.clone(),
            entries: self.entries.to_values()?,
            vacations: self.vacations.to_values()?,
        })
    }

    /// Increment, then assign. Never reuses an id, even after deletion or
    /// when the counter lags behind ids already in the document.
    fn next_entry_id(&mut self) -> i64 {
        let max_id = self
            .entries
            .records
            .iter()
            .map(|e| e.id)
            .chain(self.entries.rejected_ids())
            .max()
            .unwrap_or(0);
        self.seq.entries = self.seq.entries.max(max_id) + 1;
        self.seq.entries
    }

    fn next_vacation_id(&mut self) -> i64 {
        let max_id = self
            .vacations
            .records
            .iter()
            .map(|v| v.id)
            .chain(self.vacations.rejected_ids())
            .max()
            .unwrap_or(0);
        self.seq.vacations = self.seq.vacations.max(max_id) + 1;
        self.seq.vacations
    }
}

/// Document store backed by a single JSON file
#[derive(Debug, Clone)]
pub struct DocumentStore {
    path: Arc<PathBuf>,
    lock: Arc<Mutex<()>>,
}

impl DocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the parent directory and an empty document when missing
    pub async fn ensure(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        if !tokio::fs::try_exists(self.path.as_path()).await? {
            tracing::info!(path = %self.path.display(), "Creating empty document");
            self.write(&Document::default()).await?;
        }
        Ok(())
    }

    async fn read(&self) -> StoreResult<Document> {
        self.ensure().await?;
        let raw = tokio::fs::read_to_string(self.path.as_path()).await?;
        Ok(Document::from_raw(serde_json::from_str(&raw)?))
    }

    async fn write(&self, document: &Document) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(&document.to_raw()?)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, self.path.as_path()).await?;
        Ok(())
    }

    /// Full document snapshot
    pub async fn snapshot(&self) -> StoreResult<Document> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    // ========== Entries ==========

    pub async fn list_entries(&self) -> StoreResult<Vec<OvertimeEntry>> {
        Ok(self.snapshot().await?.entries.records)
    }

    /// Assign the next sequence id and insert at the head
    pub async fn create_entry(&self, payload: EntryCreate) -> StoreResult<OvertimeEntry> {
        let _guard = self.lock.lock().await;
        let mut document = self.read().await?;
        let id = document.next_entry_id();
        let entry = OvertimeEntry::from_create(id, payload);
        document.entries.records.insert(0, entry.clone());
        self.write(&document).await?;
        tracing::debug!(id, name = %entry.name, "Entry created");
        Ok(entry)
    }

    /// `None` when the id is absent; the document is left untouched then
    pub async fn delete_entry(&self, id: i64) -> StoreResult<Option<OvertimeEntry>> {
        let _guard = self.lock.lock().await;
        let mut document = self.read().await?;
        let Some(index) = document.entries.records.iter().position(|e| e.id == id) else {
            return Ok(None);
        };
        let removed = document.entries.records.remove(index);
        self.write(&document).await?;
        tracing::debug!(id, "Entry deleted");
        Ok(Some(removed))
    }

    // ========== Vacations ==========

    pub async fn list_vacations(&self) -> StoreResult<Vec<Vacation>> {
        Ok(self.snapshot().await?.vacations.records)
    }

    /// Assign the next sequence id and append at the tail
    pub async fn create_vacation(&self, payload: VacationCreate) -> StoreResult<Vacation> {
        let _guard = self.lock.lock().await;
        let mut document = self.read().await?;
        let id = document.next_vacation_id();
        let vacation = Vacation::from_create(id, payload);
        document.vacations.records.push(vacation.clone());
        self.write(&document).await?;
        tracing::debug!(id, name = %vacation.name, "Vacation created");
        Ok(vacation)
    }

    pub async fn delete_vacation(&self, id: i64) -> StoreResult<Option<Vacation>> {
        let _guard = self.lock.lock().await;
        let mut document = self.read().await?;
        let Some(index) = document.vacations.records.iter().position(|v| v.id == id) else {
            return Ok(None);
        };
        let removed = document.vacations.records.remove(index);
        self.write(&document).await?;
        tracing::debug!(id, "Vacation deleted");
        Ok(Some(removed))
    }
}
