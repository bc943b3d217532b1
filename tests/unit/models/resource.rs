use super::*;
use tempfile::tempdir;

#[test]
fn path_becomes_file_uri() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.abc");

    let resource = Resource::from_path(&path).unwrap();
    assert_eq!(resource.scheme(), "file");
    assert!(resource.as_str().starts_with("file://"));
    assert_eq!(resource.to_file_path(), Some(path));
}

#[test]
fn same_path_same_identity() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("doc.txt");

    let a = Resource::from_path(&path).unwrap();
    let b = Resource::parse(a.as_str()).unwrap();
    let c = Resource::parse(path.to_str().unwrap()).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.as_str(), c.as_str());
}

#[test]
fn parse_custom_scheme() {
    let resource: Resource = "memory:///notes.txt".parse().unwrap();
    assert_eq!(resource.scheme(), "memory");
    assert_eq!(resource.to_file_path(), None);
}

#[test]
fn relative_input_is_resolved_against_cwd() {
    let resource = Resource::parse("notes.txt").unwrap();
    assert_eq!(resource.scheme(), "file");
    let path = resource.to_file_path().unwrap();
    assert!(path.is_absolute());
    assert!(path.ends_with("notes.txt"));
}
