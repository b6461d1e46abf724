use thiserror::Error;

/// Errors that can occur during object storage operations.
///
/// Absence is not an error: [`BlobStore::get`](crate::BlobStore::get) returns
/// `None` and [`BlobStore::delete`](crate::BlobStore::delete) returns `false`.
#[derive(Debug, Error)]
pub enum BlobError {
    /// The blob exceeds the maximum size the backend accepts.
    #[error("blob too large: {size} bytes exceeds limit of {limit} bytes")]
    TooLarge {
        /// Actual size.
        size: u64,
        /// Maximum allowed size.
        limit: u64,
    },

    /// The backend could not be reached.
    #[error("blob backend unreachable: {0}")]
    Connection(String),

    /// The backend rejected or failed the request.
    #[error("blob storage error: {0}")]
    Storage(String),

    /// The backend answered with something we could not interpret.
    #[error("invalid blob backend response: {0}")]
    InvalidResponse(String),
}
