use filedock_blob::BlobError;
use filedock_metadata::MetadataError;
use thiserror::Error;

/// Errors returned by [`FileService`](crate::FileService) operations.
#[derive(Debug, Error)]
pub enum FilesError {
    /// No metadata record references this object id.
    #[error("file not found: {0}")]
    NotFound(String),

    /// A metadata record exists but the object store has no content for it.
    #[error("file content missing from object store: {0}")]
    BlobMissing(String),

    /// The object store call failed.
    #[error(transparent)]
    Blob(#[from] BlobError),

    /// The metadata store call failed.
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// The request was malformed.
    #[error("invalid request: {0}")]
    Validation(String),
}

impl FilesError {
    /// Returns `true` for errors meaning "there is nothing to serve".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::BlobMissing(_))
    }
}
