use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Media type recorded when the client does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Resolve a client-declared content type, substituting
/// [`DEFAULT_CONTENT_TYPE`] when it is absent or blank.
pub fn resolve_content_type(declared: Option<&str>) -> String {
    match declared.map(str::trim) {
        Some(ct) if !ct.is_empty() => ct.to_owned(),
        _ => DEFAULT_CONTENT_TYPE.to_owned(),
    }
}

/// Metadata describing a single stored file.
///
/// The binary content lives in the object store under [`object_id`](Self::object_id);
/// this record lives in the metadata store and is the only thing callers can
/// list or look up. Records are never updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", schema(example = json!({
    "id": "0b6f4d1e-5a5c-4a59-9b8e-2b3c2f0e7a11",
    "appwrite_file_id": "65f1c2d9a0b4e3f2c1d0",
    "original_name": "hello.txt",
    "file_size": 5,
    "mime_type": "text/plain",
    "uploaded_by": null,
    "upload_date": "2025-01-01T00:00:00Z",
    "tags": [],
    "description": null
})))]
pub struct FileRecord {
    /// Record identifier (UUID v4), generated when the record is created.
    pub id: String,

    /// Identifier assigned by the object store. Join key between the two
    /// backends and the key used by info, download and delete. Serialized as
    /// `appwrite_file_id`, the name existing frontends read.
    #[serde(rename = "appwrite_file_id")]
    pub object_id: String,

    /// Filename supplied by the client, stored verbatim.
    pub original_name: String,

    /// Size as reported by the object store after upload.
    #[serde(rename = "file_size")]
    pub size_bytes: u64,

    /// MIME content type served back on download.
    #[serde(rename = "mime_type")]
    pub content_type: String,

    /// Uploader identity. Always `None` while the API is unauthenticated.
    #[serde(default)]
    pub uploaded_by: Option<String>,

    /// When the record was created.
    #[serde(rename = "upload_date")]
    pub uploaded_at: DateTime<Utc>,

    /// Free-form labels.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

impl FileRecord {
    /// Create a record for a freshly stored object. Generates a UUID-v4 id and
    /// sets `uploaded_at` to now, truncated to the microsecond precision the
    /// metadata backends persist.
    #[must_use]
    pub fn new(
        object_id: impl Into<String>,
        original_name: impl Into<String>,
        size_bytes: u64,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            object_id: object_id.into(),
            original_name: original_name.into(),
            size_bytes,
            content_type: content_type.into(),
            uploaded_by: None,
            uploaded_at: Utc::now().trunc_subsecs(6),
            tags: Vec::new(),
            description: None,
        }
    }

    /// Set the uploader identity.
    #[must_use]
    pub fn with_uploaded_by(mut self, uploaded_by: impl Into<String>) -> Self {
        self.uploaded_by = Some(uploaded_by.into());
        self
    }

    /// Set the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
