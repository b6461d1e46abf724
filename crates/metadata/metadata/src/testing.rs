use filedock_core::{FileRecord, StatusCheck};

use crate::error::MetadataError;
use crate::store::{MetadataStore, StatusStore};

fn test_record(object_id: &str, name: &str) -> FileRecord {
    FileRecord::new(object_id, name, 42, "text/plain")
}

/// Run the full metadata store conformance test suite.
///
/// Call this from your backend's test module with a fresh, empty store.
///
/// # Errors
///
/// Returns an error if the backend fails an operation.
pub async fn run_store_conformance_tests(store: &dyn MetadataStore) -> Result<(), MetadataError> {
    test_list_empty(store).await?;
    test_find_missing(store).await?;
    test_insert_and_find(store).await?;
    test_optional_fields_round_trip(store).await?;
    test_duplicate_object_id(store).await?;
    test_list_insertion_order(store).await?;
    test_delete(store).await?;
    Ok(())
}

/// Run the status store conformance test suite against a fresh, empty store.
///
/// # Errors
///
/// Returns an error if the backend fails an operation.
pub async fn run_status_conformance_tests(store: &dyn StatusStore) -> Result<(), MetadataError> {
    let checks = store.list().await?;
    assert!(checks.is_empty(), "fresh status store should be empty");

    let first = StatusCheck::new("client-a");
    let second = StatusCheck::new("client-b");
    store.insert(&first).await?;
    store.insert(&second).await?;

    let checks = store.list().await?;
    assert_eq!(checks, vec![first, second], "status checks should list in order");
    Ok(())
}

async fn test_list_empty(store: &dyn MetadataStore) -> Result<(), MetadataError> {
    let records = store.list().await?;
    assert!(records.is_empty(), "fresh store should list no records");
    Ok(())
}

async fn test_find_missing(store: &dyn MetadataStore) -> Result<(), MetadataError> {
    let found = store.find_by_object_id("conformance-missing").await?;
    assert!(found.is_none(), "find on unknown object id should return None");
    Ok(())
}

async fn test_insert_and_find(store: &dyn MetadataStore) -> Result<(), MetadataError> {
    let record = test_record("conformance-obj-1", "one.txt");
    store.insert(&record).await?;

    let found = store.find_by_object_id("conformance-obj-1").await?;
    assert_eq!(found.as_ref(), Some(&record), "found record should match inserted");
    Ok(())
}

async fn test_optional_fields_round_trip(store: &dyn MetadataStore) -> Result<(), MetadataError> {
    let record = test_record("conformance-obj-full", "résumé final.pdf")
        .with_uploaded_by("alice")
        .with_tags(vec!["cv".into(), "2025".into()])
        .with_description("latest version");
    store.insert(&record).await?;

    let found = store.find_by_object_id("conformance-obj-full").await?;
    assert_eq!(found.as_ref(), Some(&record), "all fields should round-trip");
    Ok(())
}

async fn test_duplicate_object_id(store: &dyn MetadataStore) -> Result<(), MetadataError> {
    let first = test_record("conformance-dup", "a.txt");
    store.insert(&first).await?;

    let second = test_record("conformance-dup", "b.txt");
    let result = store.insert(&second).await;
    assert!(
        matches!(result, Err(MetadataError::Duplicate(_))),
        "second insert with same object id should be rejected"
    );

    let found = store.find_by_object_id("conformance-dup").await?;
    assert_eq!(found.map(|r| r.original_name).as_deref(), Some("a.txt"));
    Ok(())
}

async fn test_list_insertion_order(store: &dyn MetadataStore) -> Result<(), MetadataError> {
    let before = store.list().await?;
    let a = test_record("conformance-order-a", "a.txt");
    let b = test_record("conformance-order-b", "b.txt");
    store.insert(&a).await?;
    store.insert(&b).await?;

    let after = store.list().await?;
    assert_eq!(after.len(), before.len() + 2);
    assert_eq!(&after[before.len()..], &[a, b], "new records should list last, in order");

    let again = store.list().await?;
    assert_eq!(after, again, "listing twice without writes should be stable");
    Ok(())
}

async fn test_delete(store: &dyn MetadataStore) -> Result<(), MetadataError> {
    let record = test_record("conformance-delete", "gone.txt");
    store.insert(&record).await?;

    let removed = store.delete_by_object_id("conformance-delete").await?;
    assert_eq!(removed, 1, "delete should remove the record");
    let found = store.find_by_object_id("conformance-delete").await?;
    assert!(found.is_none(), "find after delete should return None");

    let removed = store.delete_by_object_id("conformance-delete").await?;
    assert_eq!(removed, 0, "second delete should remove nothing");
    Ok(())
}
