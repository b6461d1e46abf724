use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use filedock_core::FileRecord;
use filedock_metadata::error::MetadataError;
use filedock_metadata::store::MetadataStore;

/// In-memory metadata store using `DashMap`. Suitable for development and
/// testing.
///
/// Records are keyed by object id, which makes the uniqueness check atomic.
/// Each record carries an insertion sequence number so listing is stable.
#[derive(Debug, Default)]
pub struct MemoryMetadataStore {
    /// Object id -> (insertion sequence, record).
    records: DashMap<String, (u64, FileRecord)>,
    next_seq: AtomicU64,
}

impl MemoryMetadataStore {
    /// Create a new empty in-memory metadata store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MetadataStore for MemoryMetadataStore {
    async fn insert(&self, record: &FileRecord) -> Result<(), MetadataError> {
        match self.records.entry(record.object_id.clone()) {
            Entry::Occupied(_) => Err(MetadataError::Duplicate(record.object_id.clone())),
            Entry::Vacant(vacant) => {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                vacant.insert((seq, record.clone()));
                Ok(())
            }
        }
    }

    async fn find_by_object_id(
        &self,
        object_id: &str,
    ) -> Result<Option<FileRecord>, MetadataError> {
        Ok(self.records.get(object_id).map(|entry| entry.1.clone()))
    }

    async fn list(&self) -> Result<Vec<FileRecord>, MetadataError> {
        let mut entries: Vec<(u64, FileRecord)> = self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        entries.sort_by_key(|(seq, _)| *seq);
        Ok(entries.into_iter().map(|(_, record)| record).collect())
    }

    async fn delete_by_object_id(&self, object_id: &str) -> Result<u64, MetadataError> {
        Ok(u64::from(self.records.remove(object_id).is_some()))
    }
}
