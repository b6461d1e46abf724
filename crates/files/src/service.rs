use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, error, info, instrument, warn};

use filedock_blob::BlobStore;
use filedock_core::{FileRecord, NewFile, resolve_content_type};
use filedock_metadata::MetadataStore;

use crate::error::FilesError;

/// A file ready to be served: its record plus the full content.
#[derive(Debug, Clone)]
pub struct Download {
    /// Metadata for the file.
    pub record: FileRecord,
    /// File content.
    pub data: Bytes,
}

/// Coordinates the object store and metadata store for every file operation.
///
/// Holds no state beyond the two store handles, so it is cheap to clone and
/// safe to share across request handlers. There is no transaction spanning
/// both stores: an upload whose metadata write fails leaves an orphaned blob,
/// and a delete whose blob removal succeeds may still report `NotFound`.
#[derive(Clone)]
pub struct FileService {
    blobs: Arc<dyn BlobStore>,
    metadata: Arc<dyn MetadataStore>,
}

impl FileService {
    /// Create a coordinator over the given stores.
    pub fn new(blobs: Arc<dyn BlobStore>, metadata: Arc<dyn MetadataStore>) -> Self {
        Self { blobs, metadata }
    }

    /// Store `file` and record its metadata.
    ///
    /// The blob is written first; if that fails nothing is recorded. If the
    /// metadata write then fails the blob is left behind and the error is
    /// returned.
    #[instrument(skip(self, file), fields(filename = %file.filename, size = file.data.len()))]
    pub async fn upload(&self, file: NewFile) -> Result<FileRecord, FilesError> {
        if file.filename.trim().is_empty() {
            return Err(FilesError::Validation("filename must not be empty".into()));
        }

        let content_type = resolve_content_type(file.content_type.as_deref());

        let stored = self
            .blobs
            .put(&file.filename, &content_type, file.data)
            .await
            .map_err(|e| {
                error!(error = %e, "object store upload failed");
                FilesError::Blob(e)
            })?;

        let record = FileRecord::new(stored.id, file.filename, stored.size_bytes, content_type);

        if let Err(e) = self.metadata.insert(&record).await {
            error!(
                object_id = %record.object_id,
                error = %e,
                "metadata insert failed, stored blob is orphaned"
            );
            return Err(FilesError::Metadata(e));
        }

        info!(
            object_id = %record.object_id,
            size_bytes = record.size_bytes,
            content_type = %record.content_type,
            "file uploaded"
        );
        Ok(record)
    }

    /// Every file record, in the metadata store's natural order.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<FileRecord>, FilesError> {
        let records = self.metadata.list().await?;
        debug!(count = records.len(), "listed file records");
        Ok(records)
    }

    /// The record whose object id is `object_id`.
    #[instrument(skip(self))]
    pub async fn info(&self, object_id: &str) -> Result<FileRecord, FilesError> {
        self.metadata
            .find_by_object_id(object_id)
            .await?
            .ok_or_else(|| FilesError::NotFound(object_id.to_owned()))
    }

    /// The record and content for `object_id`.
    ///
    /// Distinguishes a file that was never recorded ([`FilesError::NotFound`])
    /// from one whose content has vanished ([`FilesError::BlobMissing`]).
    #[instrument(skip(self))]
    pub async fn download(&self, object_id: &str) -> Result<Download, FilesError> {
        let record = self.info(object_id).await?;

        match self.blobs.get(object_id).await {
            Ok(Some(data)) => Ok(Download { record, data }),
            Ok(None) => {
                warn!("metadata record exists but object store has no content");
                Err(FilesError::BlobMissing(object_id.to_owned()))
            }
            Err(e) => Err(FilesError::Blob(e)),
        }
    }

    /// Remove the content and the record for `object_id`.
    ///
    /// The blob goes first. A blob that is already gone does not stop the
    /// record from being removed. Returns [`FilesError::NotFound`] when no
    /// record was removed, even if a blob was.
    #[instrument(skip(self))]
    pub async fn delete(&self, object_id: &str) -> Result<(), FilesError> {
        let existed = self.blobs.delete(object_id).await.map_err(|e| {
            error!(error = %e, "object store delete failed");
            FilesError::Blob(e)
        })?;
        if !existed {
            warn!("object store had no content to delete, removing metadata anyway");
        }

        let removed = self.metadata.delete_by_object_id(object_id).await?;
        if removed == 0 {
            return Err(FilesError::NotFound(object_id.to_owned()));
        }

        info!(blob_existed = existed, "file deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use filedock_blob::{BlobError, StoredBlob};
    use filedock_blob_memory::MemoryBlobStore;
    use filedock_core::DEFAULT_CONTENT_TYPE;
    use filedock_metadata::MetadataError;
    use filedock_metadata_memory::MemoryMetadataStore;

    use super::*;

    /// Blob store whose every call fails.
    struct FailingBlobStore;

    #[async_trait]
    impl BlobStore for FailingBlobStore {
        async fn put(&self, _: &str, _: &str, _: Bytes) -> Result<StoredBlob, BlobError> {
            Err(BlobError::Connection("object store down".into()))
        }

        async fn get(&self, _: &str) -> Result<Option<Bytes>, BlobError> {
            Err(BlobError::Connection("object store down".into()))
        }

        async fn delete(&self, _: &str) -> Result<bool, BlobError> {
            Err(BlobError::Connection("object store down".into()))
        }
    }

    /// Metadata store whose inserts fail and which holds nothing.
    struct FailingInsertMetadataStore;

    #[async_trait]
    impl MetadataStore for FailingInsertMetadataStore {
        async fn insert(&self, _: &FileRecord) -> Result<(), MetadataError> {
            Err(MetadataError::Storage("database down".into()))
        }

        async fn find_by_object_id(&self, _: &str) -> Result<Option<FileRecord>, MetadataError> {
            Ok(None)
        }

        async fn list(&self) -> Result<Vec<FileRecord>, MetadataError> {
            Ok(Vec::new())
        }

        async fn delete_by_object_id(&self, _: &str) -> Result<u64, MetadataError> {
            Ok(0)
        }
    }

    struct Harness {
        service: FileService,
        blobs: Arc<MemoryBlobStore>,
        metadata: Arc<MemoryMetadataStore>,
    }

    fn harness() -> Harness {
        let blobs = Arc::new(MemoryBlobStore::new());
        let metadata = Arc::new(MemoryMetadataStore::new());
        let service = FileService::new(blobs.clone(), metadata.clone());
        Harness {
            service,
            blobs,
            metadata,
        }
    }

    fn hello() -> NewFile {
        NewFile::new("hello.txt", Bytes::from_static(b"hello")).with_content_type("text/plain")
    }

    #[tokio::test]
    async fn upload_then_download_round_trips() {
        let h = harness();
        let record = h.service.upload(hello()).await.unwrap();

        assert_eq!(record.original_name, "hello.txt");
        assert_eq!(record.size_bytes, 5);
        assert_eq!(record.content_type, "text/plain");
        assert!(record.tags.is_empty());
        assert!(record.uploaded_by.is_none());

        let download = h.service.download(&record.object_id).await.unwrap();
        assert_eq!(download.data, Bytes::from_static(b"hello"));
        assert_eq!(download.record, record);
    }

    #[tokio::test]
    async fn upload_without_content_type_uses_default() {
        let h = harness();
        let file = NewFile::new("blob.bin", Bytes::from_static(b"\x00\x01"));
        let record = h.service.upload(file).await.unwrap();
        assert_eq!(record.content_type, DEFAULT_CONTENT_TYPE);

        let blank = NewFile::new("blank.bin", Bytes::from_static(b"x")).with_content_type("");
        let record = h.service.upload(blank).await.unwrap();
        assert_eq!(record.content_type, DEFAULT_CONTENT_TYPE);
    }

    #[tokio::test]
    async fn upload_then_info_matches() {
        let h = harness();
        let record = h.service.upload(hello()).await.unwrap();
        let info = h.service.info(&record.object_id).await.unwrap();
        assert_eq!(info, record);
    }

    #[tokio::test]
    async fn upload_rejects_empty_filename() {
        let h = harness();
        let err = h
            .service
            .upload(NewFile::new("  ", Bytes::from_static(b"x")))
            .await
            .unwrap_err();
        assert!(matches!(err, FilesError::Validation(_)));
        assert!(h.blobs.is_empty(), "nothing should be stored");
    }

    #[tokio::test]
    async fn upload_blob_failure_records_nothing() {
        let metadata = Arc::new(MemoryMetadataStore::new());
        let service = FileService::new(Arc::new(FailingBlobStore), metadata.clone());

        let err = service.upload(hello()).await.unwrap_err();
        assert!(matches!(err, FilesError::Blob(_)));
        assert!(metadata.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn upload_metadata_failure_leaves_orphaned_blob() {
        let blobs = Arc::new(MemoryBlobStore::new());
        let service = FileService::new(blobs.clone(), Arc::new(FailingInsertMetadataStore));

        let err = service.upload(hello()).await.unwrap_err();
        assert!(matches!(err, FilesError::Metadata(_)));
        assert_eq!(blobs.len(), 1, "blob is not rolled back");
    }

    #[tokio::test]
    async fn list_empty_store() {
        let h = harness();
        assert!(h.service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_is_stable_without_writes() {
        let h = harness();
        h.service.upload(hello()).await.unwrap();
        h.service
            .upload(NewFile::new("b.txt", Bytes::from_static(b"b")))
            .await
            .unwrap();

        let first = h.service.list().await.unwrap();
        let second = h.service.list().await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
        assert_eq!(first[0].original_name, "hello.txt");
        assert_eq!(first[1].original_name, "b.txt");
    }

    #[tokio::test]
    async fn info_unknown_is_not_found() {
        let h = harness();
        let err = h.service.info("nope").await.unwrap_err();
        assert!(matches!(err, FilesError::NotFound(ref id) if id == "nope"));
    }

    #[tokio::test]
    async fn info_looks_up_by_object_id_not_record_id() {
        let h = harness();
        let record = h.service.upload(hello()).await.unwrap();
        let err = h.service.info(&record.id).await.unwrap_err();
        assert!(matches!(err, FilesError::NotFound(_)));
    }

    #[tokio::test]
    async fn download_unknown_is_not_found() {
        let h = harness();
        let err = h.service.download("nope").await.unwrap_err();
        assert!(matches!(err, FilesError::NotFound(_)));
    }

    #[tokio::test]
    async fn download_with_missing_blob_is_blob_missing() {
        let h = harness();
        let record = h.service.upload(hello()).await.unwrap();
        h.blobs.delete(&record.object_id).await.unwrap();

        let err = h.service.download(&record.object_id).await.unwrap_err();
        assert!(matches!(err, FilesError::BlobMissing(_)));
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn download_blob_error_is_blob() {
        let metadata = Arc::new(MemoryMetadataStore::new());
        let record = FileRecord::new("obj-1", "a.txt", 1, "text/plain");
        metadata.insert(&record).await.unwrap();
        let service = FileService::new(Arc::new(FailingBlobStore), metadata);

        let err = service.download("obj-1").await.unwrap_err();
        assert!(matches!(err, FilesError::Blob(_)));
    }

    #[tokio::test]
    async fn delete_then_lookup_is_not_found() {
        let h = harness();
        let record = h.service.upload(hello()).await.unwrap();

        h.service.delete(&record.object_id).await.unwrap();

        assert!(h.blobs.is_empty());
        assert!(h.metadata.list().await.unwrap().is_empty());
        assert!(matches!(
            h.service.info(&record.object_id).await,
            Err(FilesError::NotFound(_))
        ));
        assert!(matches!(
            h.service.download(&record.object_id).await,
            Err(FilesError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_unknown_is_not_found() {
        let h = harness();
        let err = h.service.delete("nope").await.unwrap_err();
        assert!(matches!(err, FilesError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_twice_second_is_not_found() {
        let h = harness();
        let record = h.service.upload(hello()).await.unwrap();
        h.service.delete(&record.object_id).await.unwrap();
        let err = h.service.delete(&record.object_id).await.unwrap_err();
        assert!(matches!(err, FilesError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_stale_metadata_when_blob_already_gone() {
        let h = harness();
        let record = h.service.upload(hello()).await.unwrap();
        h.blobs.delete(&record.object_id).await.unwrap();

        h.service.delete(&record.object_id).await.unwrap();
        assert!(h.metadata.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_orphaned_blob_reports_not_found_but_removes_blob() {
        let h = harness();
        let stored = h
            .blobs
            .put("orphan.txt", "text/plain", Bytes::from_static(b"o"))
            .await
            .unwrap();

        let err = h.service.delete(&stored.id).await.unwrap_err();
        assert!(matches!(err, FilesError::NotFound(_)));
        assert!(!h.blobs.contains(&stored.id));
    }

    #[tokio::test]
    async fn delete_blob_error_keeps_metadata() {
        let metadata = Arc::new(MemoryMetadataStore::new());
        let record = FileRecord::new("obj-1", "a.txt", 1, "text/plain");
        metadata.insert(&record).await.unwrap();
        let service = FileService::new(Arc::new(FailingBlobStore), metadata.clone());

        let err = service.delete("obj-1").await.unwrap_err();
        assert!(matches!(err, FilesError::Blob(_)));
        assert_eq!(metadata.list().await.unwrap().len(), 1);
    }
}
