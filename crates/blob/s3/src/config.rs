use serde::{Deserialize, Serialize};

/// Configuration for the S3 blob store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3BlobConfig {
    /// AWS region (e.g. `"us-east-1"`).
    pub region: String,

    /// Bucket that holds uploaded files.
    pub bucket: String,

    /// Key prefix prepended to every object (e.g. `"filedock/"`).
    #[serde(default)]
    pub prefix: Option<String>,

    /// Endpoint URL override for S3-compatible services.
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

impl S3BlobConfig {
    /// Create a new configuration for `bucket` in `region`.
    pub fn new(region: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            bucket: bucket.into(),
            prefix: None,
            endpoint_url: None,
        }
    }

    /// Set the key prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set the endpoint URL override.
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Full object key for a blob id.
    pub fn object_key(&self, id: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}{id}"),
            None => id.to_owned(),
        }
    }
}
