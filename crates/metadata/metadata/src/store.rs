use async_trait::async_trait;

use filedock_core::{FileRecord, StatusCheck};

use crate::error::MetadataError;

/// Storage backend for [`FileRecord`]s.
///
/// Records are keyed by their generated id and looked up by the object-store
/// id. Implementations must be `Send + Sync` to be shared across async tasks.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Persist a new record.
    ///
    /// Fails with [`MetadataError::Duplicate`] if a record with the same
    /// `object_id` already exists.
    async fn insert(&self, record: &FileRecord) -> Result<(), MetadataError>;

    /// Find the record referencing `object_id`.
    async fn find_by_object_id(&self, object_id: &str)
    -> Result<Option<FileRecord>, MetadataError>;

    /// Return every record in insertion order.
    async fn list(&self) -> Result<Vec<FileRecord>, MetadataError>;

    /// Delete records referencing `object_id`. Returns the number removed.
    async fn delete_by_object_id(&self, object_id: &str) -> Result<u64, MetadataError>;
}

/// Append-only storage for [`StatusCheck`] entries.
#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Persist a status check.
    async fn insert(&self, check: &StatusCheck) -> Result<(), MetadataError>;

    /// Return every status check in insertion order.
    async fn list(&self) -> Result<Vec<StatusCheck>, MetadataError>;
}
