use super::*;
use tempfile::tempdir;

#[tokio::test]
async fn read_write_file() {
    let dir = tempdir().unwrap();
    let resource = Resource::from_path(&dir.path().join("test.txt")).unwrap();

    let storage = LocalStorage::new();
    storage.write_file(&resource, b"Hello, World!").await.unwrap();

    let content = storage.read_file(&resource).await.unwrap();
    assert_eq!(content, b"Hello, World!");
}

#[tokio::test]
async fn write_creates_parent_dirs() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("out.txt");
    let resource = Resource::from_path(&path).unwrap();

    LocalStorage::new().write_file(&resource, b"x").await.unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "x");
}

#[tokio::test]
async fn not_found_error() {
    let dir = tempdir().unwrap();
    let resource = Resource::from_path(&dir.path().join("missing.txt")).unwrap();

    let result = LocalStorage::new().read_file(&resource).await;
    assert!(matches!(result, Err(StorageError::NotFound(_))));
}

#[tokio::test]
async fn directory_is_not_a_file() {
    let dir = tempdir().unwrap();
    let resource = Resource::from_path(dir.path()).unwrap();

    let result = LocalStorage::new().read_file(&resource).await;
    assert!(matches!(result, Err(StorageError::NotAFile(_))));
}

#[tokio::test]
async fn rejects_non_file_scheme() {
    let resource = Resource::parse("memory:///a.txt").unwrap();
    let result = LocalStorage::new().read_file(&resource).await;
    assert!(matches!(result, Err(StorageError::ProviderNotFound(s)) if s == "memory"));
}
