//! Storage port: async read/write of whole resources.
//!
//! Implementations live in `adapters::storage`. Futures are not `Send`; the
//! document layer drives them on a single-threaded runtime.

use crate::models::Resource;
use std::future::Future;
use std::pin::Pin;

pub type Result<T> = std::result::Result<T, StorageError>;

pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a>>;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error on {resource}: {source}")]
    Io {
        resource: Resource,
        #[source]
        source: std::io::Error,
    },
    #[error("Not found: {0}")]
    NotFound(Resource),
    #[error("Not a file: {0}")]
    NotAFile(Resource),
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),
    #[error("Storage unavailable: {0}")]
    Unavailable(Resource),
}

impl StorageError {
    pub fn io(resource: &Resource, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            return StorageError::NotFound(resource.clone());
        }
        StorageError::Io {
            resource: resource.clone(),
            source,
        }
    }
}

pub trait Storage {
    fn scheme(&self) -> &'static str;

    fn read_file<'a>(&'a self, resource: &'a Resource) -> StorageFuture<'a, Vec<u8>>;

    fn write_file<'a>(&'a self, resource: &'a Resource, content: &'a [u8])
        -> StorageFuture<'a, ()>;
}
