use async_trait::async_trait;
use bytes::Bytes;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Client, RequestBuilder, StatusCode};
use tracing::{debug, info, instrument, warn};

use filedock_blob::{BlobError, BlobStore, StoredBlob};

use crate::config::AppwriteConfig;
use crate::error::AppwriteError;
use crate::types::{AppwriteErrorBody, AppwriteFile};

/// Characters escaped when a file id is placed in a path segment. Appwrite ids
/// are limited to alphanumerics, `-`, `_` and `.`, which pass through.
const ID_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// File id placeholder that asks Appwrite to generate the id.
const UNIQUE_ID: &str = "unique()";

/// [`BlobStore`] backed by an Appwrite Storage bucket.
pub struct AppwriteBlobStore {
    config: AppwriteConfig,
    client: Client,
}

impl AppwriteBlobStore {
    /// Create a store with an HTTP client using the configured timeout.
    pub fn new(config: AppwriteConfig) -> Result<Self, BlobError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BlobError::Connection(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    /// Create a store with a custom HTTP client.
    pub fn with_client(config: AppwriteConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// The bucket this store writes to.
    pub fn bucket_id(&self) -> &str {
        &self.config.bucket_id
    }

    fn file_url(&self, id: &str) -> String {
        format!(
            "{}/{}",
            self.config.files_url(),
            utf8_percent_encode(id, ID_SEGMENT)
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("X-Appwrite-Project", &self.config.project_id)
            .header("X-Appwrite-Key", &self.config.api_key)
    }

    /// Turn a non-success response into an [`AppwriteError::Api`].
    async fn api_error(response: reqwest::Response) -> AppwriteError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<AppwriteErrorBody>(&body) {
            Ok(parsed) => match parsed.kind {
                Some(kind) => format!("{kind}: {}", parsed.message),
                None => parsed.message,
            },
            Err(_) => body,
        };
        AppwriteError::Api { status, message }
    }

    /// Upload `data`, splitting it into `Content-Range` chunks when it is
    /// larger than the configured chunk size. Every chunk after the first
    /// names the file id Appwrite assigned to the first one.
    async fn create_file(
        &self,
        filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<AppwriteFile, AppwriteError> {
        let total = data.len();
        if total <= self.config.chunk_size {
            return self
                .send_chunk(filename, content_type, data, None, None)
                .await;
        }

        let mut file_id: Option<String> = None;
        let mut start = 0;
        loop {
            let end = (start + self.config.chunk_size).min(total);
            let range = format!("bytes {start}-{}/{total}", end - 1);
            debug!(%range, "uploading chunk");
            let file = self
                .send_chunk(
                    filename,
                    content_type,
                    data.slice(start..end),
                    Some(&range),
                    file_id.as_deref(),
                )
                .await?;
            if end == total {
                return Ok(file);
            }
            if file_id.is_none() {
                file_id = Some(file.id);
            }
            start = end;
        }
    }

    async fn send_chunk(
        &self,
        filename: &str,
        content_type: &str,
        chunk: Bytes,
        range: Option<&str>,
        file_id: Option<&str>,
    ) -> Result<AppwriteFile, AppwriteError> {
        let len = chunk.len() as u64;
        let part = reqwest::multipart::Part::stream_with_length(chunk.clone(), len)
            .file_name(filename.to_owned())
            .mime_str(content_type)
            .unwrap_or_else(|_| {
                reqwest::multipart::Part::stream_with_length(chunk, len)
                    .file_name(filename.to_owned())
            });
        let form = reqwest::multipart::Form::new()
            .text("fileId", file_id.unwrap_or(UNIQUE_ID).to_owned())
            .part("file", part);

        let mut request = self.authorize(self.client.post(self.config.files_url()));
        if let Some(range) = range {
            request = request.header("Content-Range", range);
        }
        if let Some(id) = file_id {
            request = request.header("x-appwrite-id", id);
        }
        let response = request.multipart(form).send().await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        response
            .json::<AppwriteFile>()
            .await
            .map_err(|e| AppwriteError::InvalidResponse(format!("create file: {e}")))
    }

    async fn download_file(&self, id: &str) -> Result<Option<Bytes>, AppwriteError> {
        let url = format!("{}/download", self.file_url(id));
        let response = self.authorize(self.client.get(&url)).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            s if s.is_success() => Ok(Some(response.bytes().await?)),
            _ => Err(Self::api_error(response).await),
        }
    }

    async fn delete_file(&self, id: &str) -> Result<bool, AppwriteError> {
        let response = self
            .authorize(self.client.delete(self.file_url(id)))
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            s if s.is_success() => Ok(true),
            _ => Err(Self::api_error(response).await),
        }
    }
}

#[async_trait]
impl BlobStore for AppwriteBlobStore {
    #[instrument(skip(self, data), fields(bucket = %self.config.bucket_id, size = data.len()))]
    async fn put(
        &self,
        filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<StoredBlob, BlobError> {
        debug!("uploading file to Appwrite");
        let file = self.create_file(filename, content_type, data).await?;
        info!(blob_id = %file.id, size = file.size_original, "file stored in Appwrite");
        Ok(StoredBlob {
            id: file.id,
            size_bytes: file.size_original,
        })
    }

    #[instrument(skip(self), fields(bucket = %self.config.bucket_id))]
    async fn get(&self, id: &str) -> Result<Option<Bytes>, BlobError> {
        let data = self.download_file(id).await?;
        if data.is_none() {
            debug!("file not found in Appwrite");
        }
        Ok(data)
    }

    #[instrument(skip(self), fields(bucket = %self.config.bucket_id))]
    async fn delete(&self, id: &str) -> Result<bool, BlobError> {
        let existed = self.delete_file(id).await?;
        if !existed {
            warn!("delete requested for a file Appwrite does not have");
        }
        Ok(existed)
    }
}
