use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::BlobError;

/// Result of a successful [`BlobStore::put`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredBlob {
    /// Identifier assigned by the backend. Opaque to callers.
    pub id: String,
    /// Size of the stored object as reported by the backend.
    pub size_bytes: u64,
}

/// Pluggable object storage backend holding file content.
///
/// The backend owns identifier assignment; callers never choose ids. All
/// methods must be safe to call concurrently.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store a blob and return the id and size the backend assigned.
    ///
    /// `filename` and `content_type` are hints some backends persist next to
    /// the content; they are not used as keys.
    async fn put(
        &self,
        filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<StoredBlob, BlobError>;

    /// Retrieve a blob's content by id.
    ///
    /// Returns `None` if the blob does not exist.
    async fn get(&self, id: &str) -> Result<Option<Bytes>, BlobError>;

    /// Delete a blob by id. Returns `true` if the blob existed.
    async fn delete(&self, id: &str) -> Result<bool, BlobError>;
}
