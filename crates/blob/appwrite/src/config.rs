use std::time::Duration;

/// Default per-request timeout for Appwrite calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default upload chunk size. Appwrite rejects single requests above 5 MiB,
/// so larger files are sent as `Content-Range` chunks of this size.
pub const DEFAULT_CHUNK_SIZE: usize = 5 * 1024 * 1024;

/// Connection settings for an Appwrite Storage bucket.
#[derive(Clone)]
pub struct AppwriteConfig {
    /// API root, e.g. `https://cloud.appwrite.io/v1`. A trailing slash is
    /// ignored.
    pub endpoint: String,

    /// Appwrite project id, sent as `X-Appwrite-Project`.
    pub project_id: String,

    /// Server API key, sent as `X-Appwrite-Key`.
    pub api_key: String,

    /// Bucket that holds uploaded files.
    pub bucket_id: String,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Largest body sent in one upload request.
    pub chunk_size: usize,
}

impl std::fmt::Debug for AppwriteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppwriteConfig")
            .field("endpoint", &self.endpoint)
            .field("project_id", &self.project_id)
            .field("api_key", &"[REDACTED]")
            .field("bucket_id", &self.bucket_id)
            .field("timeout", &self.timeout)
            .field("chunk_size", &self.chunk_size)
            .finish()
    }
}

impl AppwriteConfig {
    /// Create a configuration with the default timeout.
    pub fn new(
        endpoint: impl Into<String>,
        project_id: impl Into<String>,
        api_key: impl Into<String>,
        bucket_id: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            project_id: project_id.into(),
            api_key: api_key.into(),
            bucket_id: bucket_id.into(),
            timeout: DEFAULT_TIMEOUT,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Set the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the upload chunk size. Zero is treated as one byte.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// URL of the bucket's file collection.
    pub(crate) fn files_url(&self) -> String {
        format!(
            "{}/storage/buckets/{}/files",
            self.endpoint.trim_end_matches('/'),
            self.bucket_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = AppwriteConfig::new("https://aw.example.com/v1", "proj", "key", "bucket");
        assert_eq!(config.endpoint, "https://aw.example.com/v1");
        assert_eq!(config.project_id, "proj");
        assert_eq!(config.bucket_id, "bucket");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.chunk_size, 5 * 1024 * 1024);
    }

    #[test]
    fn with_timeout_overrides_default() {
        let config = AppwriteConfig::new("https://aw.example.com/v1", "proj", "key", "bucket")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn zero_chunk_size_is_clamped() {
        let config = AppwriteConfig::new("https://aw.example.com/v1", "proj", "key", "bucket")
            .with_chunk_size(0);
        assert_eq!(config.chunk_size, 1);
    }

    #[test]
    fn files_url_ignores_trailing_slash() {
        let config = AppwriteConfig::new("https://aw.example.com/v1/", "proj", "key", "uploads");
        assert_eq!(
            config.files_url(),
            "https://aw.example.com/v1/storage/buckets/uploads/files"
        );
    }

    #[test]
    fn debug_redacts_api_key() {
        let config =
            AppwriteConfig::new("https://aw.example.com/v1", "proj", "secret-key-123", "b");
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"), "api_key must be redacted");
        assert!(
            !debug.contains("secret-key-123"),
            "api_key must not appear in debug output"
        );
    }
}
