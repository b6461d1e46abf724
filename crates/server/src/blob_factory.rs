use std::sync::Arc;

use filedock_blob::BlobStore;

use crate::config::BlobConfig;
use crate::error::ServerError;

/// Create an object store from the server configuration.
///
/// Backends not compiled into this binary are reported as configuration errors.
#[allow(clippy::unused_async)]
pub async fn create_blob_store(config: &BlobConfig) -> Result<Arc<dyn BlobStore>, ServerError> {
    match config.backend.as_str() {
        "memory" => {
            let mut store = filedock_blob_memory::MemoryBlobStore::new();
            if let Some(limit) = config.max_object_bytes {
                store = store.with_max_size(limit);
            }
            Ok(Arc::new(store))
        }

        #[cfg(feature = "appwrite")]
        "appwrite" => {
            let appwrite_config = appwrite_config(config)?;
            let store = filedock_blob_appwrite::AppwriteBlobStore::new(appwrite_config)?;
            Ok(Arc::new(store))
        }

        #[cfg(feature = "s3")]
        "s3" => {
            let s3_config = s3_config(config)?;
            let store = filedock_blob_s3::S3BlobStore::new(s3_config).await;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "appwrite"))]
        "appwrite" => Err(ServerError::Config(
            "appwrite blob backend requires the 'appwrite' feature".into(),
        )),

        #[cfg(not(feature = "s3"))]
        "s3" => Err(ServerError::Config(
            "s3 blob backend requires the 's3' feature".into(),
        )),

        other => Err(ServerError::Config(format!(
            "unknown blob backend: {other}"
        ))),
    }
}

#[cfg(any(feature = "appwrite", feature = "s3"))]
fn required<'a>(value: Option<&'a String>, field: &str) -> Result<&'a str, ServerError> {
    value
        .map(String::as_str)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ServerError::Config(format!("[blob] {field} is required")))
}

#[cfg(feature = "appwrite")]
fn appwrite_config(
    config: &BlobConfig,
) -> Result<filedock_blob_appwrite::AppwriteConfig, ServerError> {
    let endpoint = required(config.endpoint.as_ref(), "endpoint")?;
    let project_id = required(config.project_id.as_ref(), "project_id")?;
    let api_key = required(config.api_key.as_ref(), "api_key").map_err(|_| {
        ServerError::Config(format!(
            "[blob] api_key is required (or set {})",
            crate::config::APPWRITE_API_KEY_ENV
        ))
    })?;
    let bucket_id = required(config.bucket_id.as_ref(), "bucket_id")?;
    if config.timeout_seconds == 0 {
        return Err(ServerError::Config(
            "[blob] timeout_seconds must be greater than zero".into(),
        ));
    }

    Ok(
        filedock_blob_appwrite::AppwriteConfig::new(endpoint, project_id, api_key, bucket_id)
            .with_timeout(std::time::Duration::from_secs(config.timeout_seconds)),
    )
}

#[cfg(feature = "s3")]
fn s3_config(config: &BlobConfig) -> Result<filedock_blob_s3::S3BlobConfig, ServerError> {
    let bucket = required(config.bucket.as_ref(), "bucket")?;
    let region = config.region.as_deref().unwrap_or("us-east-1");

    let mut s3_config = filedock_blob_s3::S3BlobConfig::new(region, bucket);
    if let Some(prefix) = config.prefix.as_deref().filter(|p| !p.is_empty()) {
        s3_config = s3_config.with_prefix(prefix);
    }
    if let Some(endpoint_url) = config.endpoint_url.as_deref() {
        s3_config = s3_config.with_endpoint_url(endpoint_url);
    }
    Ok(s3_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob_config(toml: &str) -> BlobConfig {
        toml::from_str(toml).unwrap()
    }

    #[tokio::test]
    async fn memory_backend() {
        let store = create_blob_store(&BlobConfig::default()).await.unwrap();
        let stored = store
            .put("a.txt", "text/plain", bytes_of("abc"))
            .await
            .unwrap();
        assert_eq!(stored.size_bytes, 3);
    }

    #[tokio::test]
    async fn memory_backend_applies_size_limit() {
        let config = blob_config("max_object_bytes = 4");
        let store = create_blob_store(&config).await.unwrap();

        let err = store
            .put("big.txt", "text/plain", bytes_of("hello"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            filedock_blob::BlobError::TooLarge { size: 5, limit: 4 }
        ));
        assert!(store.put("ok.txt", "text/plain", bytes_of("abcd")).await.is_ok());
    }

    #[tokio::test]
    async fn unknown_backend_is_config_error() {
        let config = blob_config(r#"backend = "ftp""#);
        let err = create_blob_store(&config).await.err().unwrap();
        assert!(matches!(err, ServerError::Config(ref msg) if msg.contains("ftp")));
    }

    #[cfg(feature = "appwrite")]
    #[tokio::test]
    async fn appwrite_requires_credentials() {
        let config = blob_config(
            r#"
            backend = "appwrite"
            endpoint = "https://cloud.appwrite.io/v1"
            project_id = "proj"
            bucket_id = "uploads"
            "#,
        );
        let err = create_blob_store(&config).await.err().unwrap();
        assert!(
            matches!(err, ServerError::Config(ref msg) if msg.contains("api_key")),
            "unexpected error: {err}"
        );
    }

    #[cfg(feature = "appwrite")]
    #[tokio::test]
    async fn appwrite_backend_builds() {
        let config = blob_config(
            r#"
            backend = "appwrite"
            endpoint = "https://cloud.appwrite.io/v1"
            project_id = "proj"
            api_key = "key"
            bucket_id = "uploads"
            "#,
        );
        assert!(create_blob_store(&config).await.is_ok());
    }

    #[cfg(feature = "appwrite")]
    #[test]
    fn appwrite_rejects_zero_timeout() {
        let config = blob_config(
            r#"
            backend = "appwrite"
            endpoint = "https://cloud.appwrite.io/v1"
            project_id = "proj"
            api_key = "key"
            bucket_id = "uploads"
            timeout_seconds = 0
            "#,
        );
        let err = appwrite_config(&config).unwrap_err();
        assert!(
            matches!(err, ServerError::Config(ref msg) if msg.contains("timeout_seconds")),
            "unexpected error: {err}"
        );
    }

    #[cfg(feature = "s3")]
    #[test]
    fn s3_config_defaults_region() {
        let config = blob_config(
            r#"
            backend = "s3"
            bucket = "uploads"
            prefix = "files/"
            "#,
        );
        let s3 = s3_config(&config).unwrap();
        assert_eq!(s3.region, "us-east-1");
        assert_eq!(s3.bucket, "uploads");
        assert_eq!(s3.object_key("abc"), "files/abc");
    }

    #[cfg(feature = "s3")]
    #[test]
    fn s3_requires_bucket() {
        let config = blob_config(r#"backend = "s3""#);
        assert!(matches!(s3_config(&config), Err(ServerError::Config(_))));
    }

    fn bytes_of(s: &str) -> axum::body::Bytes {
        axum::body::Bytes::copy_from_slice(s.as_bytes())
    }
}
