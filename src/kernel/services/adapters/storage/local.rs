//! 本地文件系统存储
//!
//! 实现 Storage trait，通过 tokio::fs 读写 file:// 资源

use crate::kernel::services::ports::storage::{Result, Storage, StorageError, StorageFuture};
use crate::models::Resource;
use std::path::PathBuf;

pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn path_of(resource: &Resource) -> Result<PathBuf> {
        resource
            .to_file_path()
            .ok_or_else(|| StorageError::ProviderNotFound(resource.scheme().to_string()))
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for LocalStorage {
    fn scheme(&self) -> &'static str {
        "file"
    }

    fn read_file<'a>(&'a self, resource: &'a Resource) -> StorageFuture<'a, Vec<u8>> {
        Box::pin(async move {
            let path = Self::path_of(resource)?;
            let meta = tokio::fs::metadata(&path)
                .await
                .map_err(|e| StorageError::io(resource, e))?;
            if !meta.is_file() {
                return Err(StorageError::NotAFile(resource.clone()));
            }
            tokio::fs::read(&path)
                .await
                .map_err(|e| StorageError::io(resource, e))
        })
    }

    fn write_file<'a>(
        &'a self,
        resource: &'a Resource,
        content: &'a [u8],
    ) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            let path = Self::path_of(resource)?;
            if let Some(parent) = path.parent() {
                if !parent.exists() {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .map_err(|e| StorageError::io(resource, e))?;
                }
            }
            tokio::fs::write(&path, content)
                .await
                .map_err(|e| StorageError::io(resource, e))
        })
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/storage/local.rs"]
mod tests;
