use filedock_core::FileRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error summary.
    #[schema(example = "File metadata not found")]
    pub error: String,
}

/// Plain message response used by the root and delete endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Message text.
    #[schema(example = "File deleted successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body of `GET /api/files/list`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileListResponse {
    /// Every stored file record, oldest first.
    pub files: Vec<FileRecord>,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    #[schema(example = "ok")]
    pub status: String,
}

/// Multipart form accepted by `POST /api/files/upload`.
#[derive(Debug, ToSchema)]
pub struct UploadForm {
    /// File content. The part's filename and content type are recorded.
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
