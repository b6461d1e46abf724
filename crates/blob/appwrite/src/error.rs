use filedock_blob::BlobError;
use thiserror::Error;

/// Errors specific to the Appwrite backend.
///
/// These are converted into [`BlobError`] at the [`BlobStore`](filedock_blob::BlobStore)
/// boundary.
#[derive(Debug, Error)]
pub enum AppwriteError {
    /// An HTTP-level transport error occurred.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Appwrite returned an error response.
    #[error("Appwrite API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the error body, or the raw body if it was not JSON.
        message: String,
    },

    /// A success response could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<AppwriteError> for BlobError {
    fn from(err: AppwriteError) -> Self {
        match err {
            AppwriteError::Http(e) if e.is_timeout() || e.is_connect() => {
                BlobError::Connection(e.to_string())
            }
            AppwriteError::Http(e) => BlobError::Storage(e.to_string()),
            e @ AppwriteError::Api { .. } => BlobError::Storage(e.to_string()),
            AppwriteError::InvalidResponse(msg) => BlobError::InvalidResponse(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_maps_to_storage() {
        let err: BlobError = AppwriteError::Api {
            status: 401,
            message: "missing scope".into(),
        }
        .into();
        assert!(matches!(err, BlobError::Storage(_)));
        assert!(err.to_string().contains("missing scope"));
    }

    #[test]
    fn invalid_response_maps_through() {
        let err: BlobError = AppwriteError::InvalidResponse("no $id".into()).into();
        assert!(matches!(err, BlobError::InvalidResponse(ref m) if m == "no $id"));
    }

    #[test]
    fn error_display() {
        let err = AppwriteError::Api {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "Appwrite API error (HTTP 500): boom");
    }
}
