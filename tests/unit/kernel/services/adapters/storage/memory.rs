use super::*;

fn res(name: &str) -> Resource {
    Resource::parse(&format!("memory:///{name}")).unwrap()
}

#[tokio::test]
async fn clones_share_files() {
    let storage = MemoryStorage::new();
    let other = storage.clone();
    let doc = res("a.txt");

    storage.write_file(&doc, b"abc").await.unwrap();
    assert_eq!(other.get_string(&doc).as_deref(), Some("abc"));
    assert_eq!(storage.write_count(), 1);
}

#[tokio::test]
async fn missing_resource_is_not_found() {
    let storage = MemoryStorage::new();
    let result = storage.read_file(&res("none.txt")).await;
    assert!(matches!(result, Err(StorageError::NotFound(_))));
    assert_eq!(storage.read_count(), 1);
}

#[tokio::test]
async fn injected_failures() {
    let storage = MemoryStorage::new();
    let doc = res("a.txt");
    storage.insert(&doc, "old");

    storage.fail_writes(&doc, true);
    let result = storage.write_file(&doc, b"new").await;
    assert!(matches!(result, Err(StorageError::Unavailable(_))));
    assert_eq!(storage.get_string(&doc).as_deref(), Some("old"));

    storage.fail_reads(&doc, true);
    assert!(storage.read_file(&doc).await.is_err());

    storage.fail_reads(&doc, false);
    storage.fail_writes(&doc, false);
    storage.write_file(&doc, b"new").await.unwrap();
    assert_eq!(storage.read_file(&doc).await.unwrap(), b"new");
}
