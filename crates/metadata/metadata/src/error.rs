/// Errors that can occur during metadata store operations.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// An error from the underlying storage backend.
    #[error("storage error: {0}")]
    Storage(String),

    /// A stored document could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A record for this object id already exists.
    #[error("duplicate object id: {0}")]
    Duplicate(String),
}
