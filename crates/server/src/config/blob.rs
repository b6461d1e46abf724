use serde::Deserialize;

/// Object store backend configuration.
#[derive(Deserialize)]
pub struct BlobConfig {
    /// Backend name: `"memory"`, `"appwrite"` or `"s3"`.
    #[serde(default = "default_blob_backend")]
    pub backend: String,

    /// Largest object the memory backend accepts, in bytes. Unlimited when
    /// unset.
    pub max_object_bytes: Option<u64>,

    /// Appwrite API endpoint including the version segment
    /// (e.g. `https://cloud.appwrite.io/v1`).
    pub endpoint: Option<String>,
    /// Appwrite project id.
    pub project_id: Option<String>,
    /// Appwrite API key. Falls back to `FILEDOCK_APPWRITE_API_KEY`.
    pub api_key: Option<String>,
    /// Appwrite storage bucket id.
    pub bucket_id: Option<String>,
    /// Appwrite request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// S3 region.
    pub region: Option<String>,
    /// S3 bucket name.
    pub bucket: Option<String>,
    /// S3 key prefix.
    pub prefix: Option<String>,
    /// Endpoint override for S3-compatible services (`MinIO`, `LocalStack`).
    pub endpoint_url: Option<String>,
}

impl std::fmt::Debug for BlobConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobConfig")
            .field("backend", &self.backend)
            .field("max_object_bytes", &self.max_object_bytes)
            .field("endpoint", &self.endpoint)
            .field("project_id", &self.project_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("bucket_id", &self.bucket_id)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .field("prefix", &self.prefix)
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            backend: default_blob_backend(),
            max_object_bytes: None,
            endpoint: None,
            project_id: None,
            api_key: None,
            bucket_id: None,
            timeout_seconds: default_timeout_seconds(),
            region: None,
            bucket: None,
            prefix: None,
            endpoint_url: None,
        }
    }
}

fn default_blob_backend() -> String {
    "memory".to_owned()
}

fn default_timeout_seconds() -> u64 {
    30
}
