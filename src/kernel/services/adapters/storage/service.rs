//! 存储服务：管理多个 Storage 后端
//!
//! 根据资源的 URI scheme 选择对应的后端

use super::local::LocalStorage;
use crate::kernel::services::ports::storage::{Result, Storage, StorageError};
use crate::models::Resource;
use rustc_hash::FxHashMap;

pub struct StorageService {
    providers: FxHashMap<&'static str, Box<dyn Storage>>,
}

impl StorageService {
    pub fn new() -> Self {
        let mut service = Self::empty();
        service.register_provider(Box::new(LocalStorage::new()));
        service
    }

    /// 不带任何后端
    pub fn empty() -> Self {
        Self {
            providers: FxHashMap::default(),
        }
    }

    pub fn with_provider(mut self, provider: Box<dyn Storage>) -> Self {
        self.register_provider(provider);
        self
    }

    pub fn register_provider(&mut self, provider: Box<dyn Storage>) {
        let scheme = provider.scheme();
        tracing::debug!(scheme, "register storage provider");
        self.providers.insert(scheme, provider);
    }

    fn get_provider(&self, scheme: &str) -> Result<&dyn Storage> {
        self.providers
            .get(scheme)
            .map(|p| p.as_ref())
            .ok_or_else(|| StorageError::ProviderNotFound(scheme.to_string()))
    }

    pub async fn read_file(&self, resource: &Resource) -> Result<Vec<u8>> {
        self.get_provider(resource.scheme())?
            .read_file(resource)
            .await
    }

    pub async fn write_file(&self, resource: &Resource, content: &[u8]) -> Result<()> {
        self.get_provider(resource.scheme())?
            .write_file(resource, content)
            .await
    }

    pub fn has_provider(&self, scheme: &str) -> bool {
        self.providers.contains_key(scheme)
    }

    pub fn available_schemes(&self) -> Vec<&str> {
        self.providers.keys().copied().collect()
    }
}

impl Default for StorageService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/storage/service.rs"]
mod tests;
