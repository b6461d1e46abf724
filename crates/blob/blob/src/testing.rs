use bytes::Bytes;

use crate::error::BlobError;
use crate::store::BlobStore;

/// Run the full blob store conformance test suite.
///
/// Call this from your backend's test module with a fresh store instance.
///
/// # Errors
///
/// Returns an error if the backend fails an operation.
pub async fn run_store_conformance_tests(store: &dyn BlobStore) -> Result<(), BlobError> {
    test_get_missing(store).await?;
    test_put_and_get(store).await?;
    test_put_assigns_distinct_ids(store).await?;
    test_put_empty(store).await?;
    test_delete(store).await?;
    test_delete_missing(store).await?;
    Ok(())
}

async fn test_get_missing(store: &dyn BlobStore) -> Result<(), BlobError> {
    let val = store.get("conformance-missing").await?;
    assert!(val.is_none(), "get on missing id should return None");
    Ok(())
}

async fn test_put_and_get(store: &dyn BlobStore) -> Result<(), BlobError> {
    let stored = store
        .put("hello.txt", "text/plain", Bytes::from_static(b"hello"))
        .await?;
    assert!(!stored.id.is_empty(), "put should assign an id");
    assert_eq!(stored.size_bytes, 5, "put should report the stored size");

    let data = store.get(&stored.id).await?;
    assert_eq!(data.as_deref(), Some(&b"hello"[..]));
    Ok(())
}

async fn test_put_assigns_distinct_ids(store: &dyn BlobStore) -> Result<(), BlobError> {
    let a = store
        .put("same.bin", "application/octet-stream", Bytes::from_static(b"a"))
        .await?;
    let b = store
        .put("same.bin", "application/octet-stream", Bytes::from_static(b"a"))
        .await?;
    assert_ne!(a.id, b.id, "identical uploads should get distinct ids");
    Ok(())
}

async fn test_put_empty(store: &dyn BlobStore) -> Result<(), BlobError> {
    let stored = store
        .put("empty.txt", "text/plain", Bytes::new())
        .await?;
    assert_eq!(stored.size_bytes, 0);
    let data = store.get(&stored.id).await?;
    assert_eq!(data.map(|d| d.len()), Some(0), "empty blob should round-trip");
    Ok(())
}

async fn test_delete(store: &dyn BlobStore) -> Result<(), BlobError> {
    let stored = store
        .put("bye.txt", "text/plain", Bytes::from_static(b"bye"))
        .await?;
    let existed = store.delete(&stored.id).await?;
    assert!(existed, "delete should return true for existing blob");
    let data = store.get(&stored.id).await?;
    assert!(data.is_none(), "get after delete should return None");

    let existed = store.delete(&stored.id).await?;
    assert!(!existed, "second delete should return false");
    Ok(())
}

async fn test_delete_missing(store: &dyn BlobStore) -> Result<(), BlobError> {
    let existed = store.delete("conformance-never-stored").await?;
    assert!(!existed, "delete on missing id should return false");
    Ok(())
}
