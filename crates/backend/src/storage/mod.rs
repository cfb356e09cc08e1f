use redb::{
    Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition,
};
use serde::{Deserialize, Serialize};
use starmap_shared::models::{Marker, MarkerId, MarkerUpdate, NewMarker};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

const MARKERS_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("markers");
const META_TABLE: TableDefinition<&str, u64> = TableDefinition::new("meta");

const NEXT_ID_KEY: &str = "next_marker_id";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] redb::DatabaseError),
    #[error("transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),
    #[error("table error: {0}")]
    Table(#[from] redb::TableError),
    #[error("storage error: {0}")]
    Storage(#[from] redb::StorageError),
    #[error("commit error: {0}")]
    Commit(#[from] redb::CommitError),
    #[error("corrupt record: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// What is persisted per marker: the wire record plus bookkeeping the API
/// does not expose.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredMarker {
    #[serde(flatten)]
    marker: Marker,
    created_at: String,
}

pub struct Storage {
    db: Database,
}

impl Storage {
    pub fn open(path: &Path) -> Result<Arc<Self>, StoreError> {
        let db = Database::create(path)?;

        // Ensure tables exist so readers never hit TableDoesNotExist
        let write_txn = db.begin_write()?;
        {
            write_txn.open_table(MARKERS_TABLE)?;
            write_txn.open_table(META_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Arc::new(Storage { db }))
    }

    /// All markers, ordered by id.
    pub fn list_markers(&self) -> Result<Vec<Marker>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(MARKERS_TABLE)?;

        let mut markers = Vec::with_capacity(table.len()? as usize);
        for entry in table.iter()? {
            let (_, value) = entry?;
            let stored: StoredMarker = serde_json::from_slice(value.value())?;
            markers.push(stored.marker);
        }
        Ok(markers)
    }

    pub fn get_marker(&self, id: MarkerId) -> Result<Option<Marker>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(MARKERS_TABLE)?;
        match table.get(id)? {
            Some(value) => {
                let stored: StoredMarker = serde_json::from_slice(value.value())?;
                Ok(Some(stored.marker))
            }
            None => Ok(None),
        }
    }

    /// Insert a marker under a fresh id. Ids come from a persisted counter
    /// and are never reused after deletion.
    pub fn create_marker(&self, new: NewMarker) -> Result<Marker, StoreError> {
        let write_txn = self.db.begin_write()?;
        let marker = {
            let mut meta = write_txn.open_table(META_TABLE)?;
            let id = meta.get(NEXT_ID_KEY)?.map(|v| v.value()).unwrap_or(1);
            meta.insert(NEXT_ID_KEY, id + 1)?;

            let stored = StoredMarker {
                marker: new.into_marker(id),
                created_at: chrono::Utc::now().to_rfc3339(),
            };
            let json = serde_json::to_vec(&stored)?;
            let mut table = write_txn.open_table(MARKERS_TABLE)?;
            table.insert(id, json.as_slice())?;
            stored.marker
        };
        write_txn.commit()?;
        Ok(marker)
    }

    /// Update name/details. Returns `None` when the id is unknown.
    pub fn update_marker(&self, update: MarkerUpdate) -> Result<Option<Marker>, StoreError> {
        let write_txn = self.db.begin_write()?;
        let updated = {
            let mut table = write_txn.open_table(MARKERS_TABLE)?;
            let existing = match table.get(update.id)? {
                Some(value) => Some(serde_json::from_slice::<StoredMarker>(value.value())?),
                None => None,
            };
            match existing {
                Some(mut stored) => {
                    let id = update.id;
                    update.apply_to(&mut stored.marker);
                    let json = serde_json::to_vec(&stored)?;
                    table.insert(id, json.as_slice())?;
                    Some(stored.marker)
                }
                None => None,
            }
        };
        write_txn.commit()?;
        Ok(updated)
    }

    pub fn delete_marker(&self, id: MarkerId) -> Result<bool, StoreError> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(MARKERS_TABLE)?;
            let result = table.remove(id)?;
            result.is_some()
        };
        write_txn.commit()?;
        Ok(removed)
    }

    pub fn count_markers(&self) -> Result<u64, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(MARKERS_TABLE)?;
        Ok(table.len()?)
    }
}
