use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use filedock_blob::error::BlobError;
use filedock_blob::store::{BlobStore, StoredBlob};

/// In-memory [`BlobStore`] backed by a [`DashMap`].
///
/// Content lives for the lifetime of the process. Ids are UUID v4 strings.
/// An optional size limit mirrors the per-file cap real object stores enforce.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    data: DashMap<String, Bytes>,
    max_size: Option<u64>,
}

impl MemoryBlobStore {
    /// Create a new, empty in-memory blob store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject blobs larger than `limit` bytes.
    #[must_use]
    pub fn with_max_size(mut self, limit: u64) -> Self {
        self.max_size = Some(limit);
        self
    }

    /// Number of blobs currently held.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the store holds no blobs.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if a blob with `id` is held.
    pub fn contains(&self, id: &str) -> bool {
        self.data.contains_key(id)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(
        &self,
        filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<StoredBlob, BlobError> {
        let size = data.len() as u64;
        if let Some(limit) = self.max_size
            && size > limit
        {
            return Err(BlobError::TooLarge { size, limit });
        }

        let id = Uuid::new_v4().to_string();
        self.data.insert(id.clone(), data);
        debug!(blob_id = %id, filename, content_type, size, "stored blob in memory");

        Ok(StoredBlob {
            id,
            size_bytes: size,
        })
    }

    async fn get(&self, id: &str) -> Result<Option<Bytes>, BlobError> {
        Ok(self.data.get(id).map(|entry| entry.value().clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool, BlobError> {
        Ok(self.data.remove(id).is_some())
    }
}
