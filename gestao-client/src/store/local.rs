//! redb-backed local store
//!
//! One table of string slots, each holding a JSON array:
//!
//! | Slot | Value |
//! |------|-------|
//! | `entries_key` | `[OvertimeEntry]`, newest first |
//! | `vacations_key` | `[Vacation]`, insertion order |
//!
//! Reads are lenient. A slot that is not a JSON array is treated as empty.
//! Records that do not decode are skipped on read and kept as they are on
//! every rewrite. Records stored without an `id` get one assigned and
//! written back.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::util::local_id_avoiding;
use shared::{Decoded, EntryCreate, OvertimeEntry, Vacation, VacationCreate};
use thiserror::Error;

use super::Store;
use crate::ClientResult;
use crate::config::LocalStoreConfig;

/// key = slot name, value = JSON array
const STORAGE_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("local_storage");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Local fallback store
#[derive(Clone)]
pub struct LocalStore {
    db: Arc<Database>,
    entries_key: String,
    vacations_key: String,
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore")
            .field("entries_key", &self.entries_key)
            .field("vacations_key", &self.vacations_key)
            .finish_non_exhaustive()
    }
}

impl LocalStore {
    /// Open or create the database file
    pub fn open(config: &LocalStoreConfig) -> StorageResult<Self> {
        if let Some(parent) = config.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(&config.path)?;
        Self::init(db, config)
    }

    /// In-memory database, nothing touches the disk
    pub fn open_in_memory(config: &LocalStoreConfig) -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db, config)
    }

    fn init(db: Database, config: &LocalStoreConfig) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(STORAGE_TABLE)?;
        }
        write_txn.commit()?;

        tracing::debug!(
            entries_key = %config.entries_key,
            vacations_key = %config.vacations_key,
            "Local store opened"
        );
        Ok(Self {
            db: Arc::new(db),
            entries_key: config.entries_key.clone(),
            vacations_key: config.vacations_key.clone(),
        })
    }

    // ========== Raw slots ==========

    pub fn get_item(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(STORAGE_TABLE)?;
        Ok(table.get(key)?.map(|guard| guard.value().to_vec()))
    }

    pub fn set_item(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(STORAGE_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    pub fn remove_item(&self, key: &str) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(STORAGE_TABLE)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    // ========== Collections ==========

    /// Read a collection, repairing missing ids.
    ///
    /// Never fails: read errors and corrupt data yield an empty list, records
    /// that do not decode are skipped. A failed repair write is logged and the
    /// repaired list is still returned.
    fn load<T>(&self, key: &str) -> Vec<T>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        let raw = match self.get_item(key) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read local collection");
                return Vec::new();
            }
        };
        let (slot, repaired) = decode_slot::<T>(key, raw.as_deref());
        if !repaired {
            return slot.records;
        }

        // Re-run inside one write transaction so the returned ids are the stored ones
        match self.update(key, |slot: &mut Decoded<T>| slot.records.clone()) {
            Ok(stored) => {
                tracing::info!(key, "Assigned ids to local records stored without one");
                stored
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to persist repaired local collection");
                slot.records
            }
        }
    }

    /// Read-modify-write a collection inside a single write transaction.
    ///
    /// Rejected records are written back unchanged after the decoded ones.
    fn update<T, R>(&self, key: &str, apply: impl FnOnce(&mut Decoded<T>) -> R) -> StorageResult<R>
    where
        T: Serialize + DeserializeOwned,
    {
        let write_txn = self.db.begin_write()?;
        let result = {
            let mut table = write_txn.open_table(STORAGE_TABLE)?;
            let raw = table.get(key)?.map(|guard| guard.value().to_vec());
            let (mut slot, _) = decode_slot::<T>(key, raw.as_deref());
            let result = apply(&mut slot);
            let bytes = serde_json::to_vec(&slot.to_values()?)?;
            table.insert(key, bytes.as_slice())?;
            result
        };
        write_txn.commit()?;
        Ok(result)
    }

    pub fn load_entries(&self) -> Vec<OvertimeEntry> {
        self.load(&self.entries_key)
    }

    pub fn load_vacations(&self) -> Vec<Vacation> {
        self.load(&self.vacations_key)
    }
}

/// Decode a slot record by record; the flag reports whether ids were assigned.
fn decode_slot<T: DeserializeOwned>(key: &str, raw: Option<&[u8]>) -> (Decoded<T>, bool) {
    let Some(raw) = raw else {
        return (Decoded::default(), false);
    };
    let mut items = match serde_json::from_slice::<Value>(raw) {
        Ok(Value::Array(items)) => items,
        Ok(Value::Null) => return (Decoded::default(), false),
        Ok(_) => {
            tracing::warn!(key, "Local collection is not an array, treating as empty");
            return (Decoded::default(), false);
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "Corrupted local collection, treating as empty");
            return (Decoded::default(), false);
        }
    };
    let repaired = assign_missing_ids(&mut items);
    let slot = Decoded::from_values(items);
    if !slot.rejected.is_empty() {
        tracing::warn!(
            key,
            skipped = slot.rejected.len(),
            "Skipping undecodable local records"
        );
    }
    (slot, repaired)
}

/// Ids in use by both decoded and rejected records
fn taken_ids<T>(slot: &Decoded<T>, id_of: impl Fn(&T) -> i64) -> HashSet<i64> {
    slot.records
        .iter()
        .map(id_of)
        .chain(slot.rejected_ids())
        .collect()
}

/// Give every object without a usable `id` a fresh one. Returns true if any changed.
fn assign_missing_ids(items: &mut [Value]) -> bool {
    let mut taken: HashSet<i64> = items
        .iter()
        .filter_map(|item| item.get("id").and_then(Value::as_i64))
        .collect();
    let mut changed = false;
    for item in items.iter_mut() {
        let Some(object) = item.as_object_mut() else {
            continue;
        };
        if object.get("id").and_then(Value::as_i64).is_none() {
            let id = local_id_avoiding(&taken);
            taken.insert(id);
            object.insert("id".to_string(), Value::from(id));
            changed = true;
        }
    }
    changed
}

#[async_trait]
impl Store for LocalStore {
    async fn health(&self) -> ClientResult<()> {
        Ok(())
    }

    async fn list_entries(&self) -> ClientResult<Vec<OvertimeEntry>> {
        Ok(self.load_entries())
    }

    async fn create_entry(&self, payload: EntryCreate) -> ClientResult<OvertimeEntry> {
        let entry = self.update(&self.entries_key, |slot: &mut Decoded<OvertimeEntry>| {
            let taken = taken_ids(slot, |e| e.id);
            let entry = OvertimeEntry::from_create(local_id_avoiding(&taken), payload);
            slot.records.insert(0, entry.clone());
            entry
        })?;
        tracing::debug!(id = entry.id, "Entry saved locally");
        Ok(entry)
    }

    async fn delete_entry(&self, id: i64) -> ClientResult<Option<OvertimeEntry>> {
        let removed = self.update(&self.entries_key, |slot: &mut Decoded<OvertimeEntry>| {
            let entries = &mut slot.records;
            entries
                .iter()
                .position(|e| e.id == id)
                .map(|idx| entries.remove(idx))
        })?;
        Ok(removed)
    }

    async fn list_vacations(&self) -> ClientResult<Vec<Vacation>> {
        Ok(self.load_vacations())
    }

    async fn create_vacation(&self, payload: VacationCreate) -> ClientResult<Vacation> {
        let vacation = self.update(&self.vacations_key, |slot: &mut Decoded<Vacation>| {
            let taken = taken_ids(slot, |v| v.id);
            let vacation = Vacation::from_create(local_id_avoiding(&taken), payload);
            slot.records.push(vacation.clone());
            vacation
        })?;
        tracing::debug!(id = vacation.id, "Vacation saved locally");
        Ok(vacation)
    }

    async fn delete_vacation(&self, id: i64) -> ClientResult<Option<Vacation>> {
        let removed = self.update(&self.vacations_key, |slot: &mut Decoded<Vacation>| {
            let vacations = &mut slot.records;
            vacations
                .iter()
                .position(|v| v.id == id)
                .map(|idx| vacations.remove(idx))
        })?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::EntryKind;

    fn store() -> LocalStore {
        LocalStore::open_in_memory(&LocalStoreConfig::default()).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(name: &str, kind: EntryKind, hours: f64) -> EntryCreate {
        EntryCreate::new(name, "Projeto X", kind, ymd(2024, 6, 1), hours).unwrap()
    }

    #[tokio::test]
    async fn entries_are_prepended() {
        let store = store();
        let first = store.create_entry(entry("Ana", EntryKind::Extra, 3.0)).await.unwrap();
        let second = store.create_entry(entry("Bruno", EntryKind::Desconto, 1.0)).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(second.hours, -1.0);

        let list = store.list_entries().await.unwrap();
        let ids: Vec<i64> = list.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn vacations_are_appended() {
        let store = store();
        let a = VacationCreate::new("Ana", ymd(2024, 7, 1), ymd(2024, 7, 10), None).unwrap();
        let b = VacationCreate::new("Bruno", ymd(2024, 8, 1), ymd(2024, 8, 2), Some("praia")).unwrap();
        store.create_vacation(a).await.unwrap();
        store.create_vacation(b).await.unwrap();

        let names: Vec<String> = store
            .list_vacations()
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.name)
            .collect();
        assert_eq!(names, vec!["Ana", "Bruno"]);
    }

    #[tokio::test]
    async fn delete_removes_only_the_matching_id() {
        let store = store();
        let keep = store.create_entry(entry("Ana", EntryKind::Extra, 3.0)).await.unwrap();
        let gone = store.create_entry(entry("Bruno", EntryKind::Extra, 1.0)).await.unwrap();

        let removed = store.delete_entry(gone.id).await.unwrap();
        assert_eq!(removed.map(|e| e.id), Some(gone.id));

        let list = store.list_entries().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, keep.id);
    }

    #[tokio::test]
    async fn deleting_an_absent_id_is_a_no_op() {
        let store = store();
        store.create_entry(entry("Ana", EntryKind::Extra, 3.0)).await.unwrap();

        assert!(store.delete_entry(42).await.unwrap().is_none());
        assert!(store.delete_vacation(42).await.unwrap().is_none());
        assert_eq!(store.list_entries().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn corrupt_slot_reads_as_empty() {
        let store = store();
        let config = LocalStoreConfig::default();
        store.set_item(&config.entries_key, b"{not json").unwrap();
        assert!(store.list_entries().await.unwrap().is_empty());

        store.set_item(&config.vacations_key, br#"{"id": 1}"#).unwrap();
        assert!(store.list_vacations().await.unwrap().is_empty());

        // Writing over a corrupt slot starts a fresh collection
        store.create_entry(entry("Ana", EntryKind::Extra, 1.0)).await.unwrap();
        assert_eq!(store.list_entries().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn records_without_id_are_repaired_and_persisted() {
        let store = store();
        let config = LocalStoreConfig::default();
        let raw = serde_json::json!([
            {"name": "Ana", "reason": "x", "type": "extra", "date": "2024-06-01", "hours": 2},
            {"id": 7, "name": "Bruno", "reason": "y", "type": "desconto", "date": "2024-06-02T00:00:00.000Z", "hours": -1}
        ]);
        store.set_item(&config.entries_key, raw.to_string().as_bytes()).unwrap();

        let first = store.list_entries().await.unwrap();
        assert_eq!(first.len(), 2);
        assert_ne!(first[0].id, 7);
        assert_eq!(first[1].id, 7);
        assert_eq!(first[1].date, ymd(2024, 6, 2));

        // Second read sees the same ids, so the repair was written back
        let second = store.list_entries().await.unwrap();
        assert_eq!(first, second);
        let stored: Value = serde_json::from_slice(&store.get_item(&config.entries_key).unwrap().unwrap()).unwrap();
        assert_eq!(stored[0]["id"].as_i64(), Some(first[0].id));
    }

    #[tokio::test]
    async fn undecodable_record_survives_writes() {
        let store = store();
        let config = LocalStoreConfig::default();
        let raw = serde_json::json!([
            {"id": 1, "name": "Ana", "reason": "x", "type": "extra", "date": "2024-06-01", "hours": 3},
            {"id": 2, "name": "Bruno", "reason": "y", "type": "extra", "date": null, "hours": 1},
            {"id": 3, "name": "Carla", "reason": "z", "type": "desconto", "date": "2024-06-03", "hours": -2}
        ]);
        store.set_item(&config.entries_key, raw.to_string().as_bytes()).unwrap();

        let listed = store.list_entries().await.unwrap();
        assert_eq!(listed.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 3]);

        let dora = store.create_entry(entry("Dora", EntryKind::Extra, 1.0)).await.unwrap();
        assert!(![1, 2, 3].contains(&dora.id));
        store.delete_entry(3).await.unwrap();

        let names: Vec<String> = store
            .list_entries()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Dora", "Ana"]);

        // The record that could not be read is still stored verbatim
        let stored: Value = serde_json::from_slice(&store.get_item(&config.entries_key).unwrap().unwrap()).unwrap();
        let stored = stored.as_array().unwrap();
        assert_eq!(stored.len(), 3);
        assert_eq!(stored[2]["name"], serde_json::json!("Bruno"));
        assert_eq!(stored[2]["date"], Value::Null);
    }

    #[tokio::test]
    async fn keys_isolate_collections() {
        let a = LocalStore::open_in_memory(&LocalStoreConfig::default().with_keys("a_entries", "a_vacations")).unwrap();
        a.create_entry(entry("Ana", EntryKind::Extra, 1.0)).await.unwrap();
        assert!(a.get_item(crate::config::DEFAULT_ENTRIES_KEY).unwrap().is_none());
        assert!(a.get_item("a_entries").unwrap().is_some());

        a.remove_item("a_entries").unwrap();
        assert!(a.list_entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn file_store_persists_between_opens() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = LocalStoreConfig::new(dir.path().join("nested").join("local.redb"));
        {
            let store = LocalStore::open(&config).unwrap();
            store.create_entry(entry("Ana", EntryKind::Extra, 3.0)).await.unwrap();
        }
        let store = LocalStore::open(&config).unwrap();
        assert_eq!(store.load_entries()[0].name, "Ana");
    }
}
