use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use filedock_blob::{BlobError, BlobStore, StoredBlob};

use crate::auth::build_client;
use crate::config::S3BlobConfig;
use crate::error::classify_sdk_error;

/// [`BlobStore`] backed by an S3 bucket.
pub struct S3BlobStore {
    config: S3BlobConfig,
    client: aws_sdk_s3::Client,
}

impl std::fmt::Debug for S3BlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3BlobStore")
            .field("config", &self.config)
            .field("client", &"<S3Client>")
            .finish()
    }
}

impl S3BlobStore {
    /// Create a store, building an S3 client from the environment.
    pub async fn new(config: S3BlobConfig) -> Self {
        let client = build_client(&config).await;
        Self { config, client }
    }

    /// Create a store with a pre-built client.
    pub fn with_client(config: S3BlobConfig, client: aws_sdk_s3::Client) -> Self {
        Self { config, client }
    }

    /// The bucket this store writes to.
    pub fn bucket(&self) -> &str {
        &self.config.bucket
    }
}

fn sdk_failure(op: &str, err: &impl std::error::Error) -> BlobError {
    let err_str = DisplayErrorContext(err).to_string();
    error!(error = %err_str, "S3 {op} failed");
    classify_sdk_error(&err_str)
}

#[async_trait]
impl BlobStore for S3BlobStore {
    #[instrument(skip(self, data), fields(bucket = %self.config.bucket, size = data.len()))]
    async fn put(
        &self,
        filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<StoredBlob, BlobError> {
        let id = Uuid::new_v4().to_string();
        let key = self.config.object_key(&id);
        let size_bytes = data.len() as u64;

        debug!(key = %key, filename, "uploading object to S3");

        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(&key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| sdk_failure("put_object", &e))?;

        info!(key = %key, "S3 object uploaded");
        Ok(StoredBlob { id, size_bytes })
    }

    #[instrument(skip(self), fields(bucket = %self.config.bucket))]
    async fn get(&self, id: &str) -> Result<Option<Bytes>, BlobError> {
        let key = self.config.object_key(id);

        let output = match self
            .client
            .get_object()
            .bucket(&self.config.bucket)
            .key(&key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(e) if e.as_service_error().is_some_and(|se| se.is_no_such_key()) => {
                debug!(key = %key, "S3 object not found");
                return Ok(None);
            }
            Err(e) => return Err(sdk_failure("get_object", &e)),
        };

        let data = output
            .body
            .collect()
            .await
            .map_err(|e| BlobError::Storage(format!("failed to read S3 body: {e}")))?
            .into_bytes();

        debug!(key = %key, size = data.len(), "S3 object downloaded");
        Ok(Some(data))
    }

    #[instrument(skip(self), fields(bucket = %self.config.bucket))]
    async fn delete(&self, id: &str) -> Result<bool, BlobError> {
        let key = self.config.object_key(id);

        // DeleteObject succeeds for missing keys, so probe first.
        match self
            .client
            .head_object()
            .bucket(&self.config.bucket)
            .key(&key)
            .send()
            .await
        {
            Ok(_) => {}
            Err(e) if e.as_service_error().is_some_and(|se| se.is_not_found()) => {
                debug!(key = %key, "S3 object already absent");
                return Ok(false);
            }
            Err(e) => return Err(sdk_failure("head_object", &e)),
        }

        self.client
            .delete_object()
            .bucket(&self.config.bucket)
            .key(&key)
            .send()
            .await
            .map_err(|e| sdk_failure("delete_object", &e))?;

        info!(key = %key, "S3 object deleted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};

    use super::*;

    fn offline_client() -> aws_sdk_s3::Client {
        let conf = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("test", "test", None, None, "static"))
            .build();
        aws_sdk_s3::Client::from_conf(conf)
    }

    #[test]
    fn with_client_keeps_config() {
        let config = S3BlobConfig::new("us-east-1", "files").with_prefix("p/");
        let store = S3BlobStore::with_client(config, offline_client());
        assert_eq!(store.bucket(), "files");
        let debug = format!("{store:?}");
        assert!(debug.contains("S3BlobStore"));
        assert!(debug.contains("<S3Client>"));
    }
}

#[cfg(all(test, feature = "integration"))]
mod integration_tests {
    use filedock_blob::testing::run_store_conformance_tests;

    use super::*;

    // Requires an S3-compatible endpoint (e.g. MinIO) with an existing bucket.
    // Configure with S3_ENDPOINT_URL, S3_BUCKET and the usual AWS_* variables.
    async fn store() -> S3BlobStore {
        let endpoint =
            std::env::var("S3_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:9000".into());
        let bucket = std::env::var("S3_BUCKET").unwrap_or_else(|_| "filedock-test".into());
        let config = S3BlobConfig::new("us-east-1", bucket)
            .with_endpoint_url(endpoint)
            .with_prefix(format!("test-{}/", Uuid::new_v4()));
        S3BlobStore::new(config).await
    }

    #[tokio::test]
    async fn conformance() {
        let store = store().await;
        run_store_conformance_tests(&store)
            .await
            .expect("conformance tests should pass");
    }
}
