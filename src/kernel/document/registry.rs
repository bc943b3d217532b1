//! Process-wide resource -> document map.
//!
//! Entries are reference counted by attached controllers and evicted when the
//! last one is released. Re-opening an evicted resource starts a fresh
//! history loaded from storage.

use super::document::Document;
use crate::kernel::services::adapters::storage::StorageService;
use crate::models::{Resource, UndoPolicy};
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;

struct Entry {
    document: Document,
    views: usize,
}

struct RegistryInner {
    storage: Rc<StorageService>,
    undo_policy: UndoPolicy,
    documents: FxHashMap<String, Entry>,
}

#[derive(Clone)]
pub struct DocumentRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl DocumentRegistry {
    pub fn new(storage: Rc<StorageService>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(RegistryInner {
                storage,
                undo_policy: UndoPolicy::default(),
                documents: FxHashMap::default(),
            })),
        }
    }

    /// Applies to documents created after this call.
    pub fn with_undo_policy(self, policy: UndoPolicy) -> Self {
        self.inner.borrow_mut().undo_policy = policy;
        self
    }

    pub fn storage(&self) -> Rc<StorageService> {
        Rc::clone(&self.inner.borrow().storage)
    }

    /// Looks up or creates the shared document and takes a view reference on it.
    pub fn acquire(&self, resource: &Resource) -> Document {
        let mut inner = self.inner.borrow_mut();
        let storage = Rc::clone(&inner.storage);
        let policy = inner.undo_policy;

        let entry = inner
            .documents
            .entry(resource.as_str().to_string())
            .or_insert_with(|| {
                tracing::debug!(resource = %resource, "create document");
                Entry {
                    document: Document::new(resource.clone(), storage, policy),
                    views: 0,
                }
            });
        entry.views += 1;
        entry.document.clone()
    }

    /// Drops one view reference. Returns `true` when the document was evicted.
    pub fn release(&self, resource: &Resource) -> bool {
        let mut inner = self.inner.borrow_mut();
        let Some(entry) = inner.documents.get_mut(resource.as_str()) else {
            return false;
        };

        entry.views = entry.views.saturating_sub(1);
        if entry.views > 0 {
            return false;
        }

        if let Some(entry) = inner.documents.remove(resource.as_str()) {
            if entry.document.is_dirty() {
                tracing::warn!(
                    resource = %resource,
                    version = %entry.document.version(),
                    saved_version = %entry.document.saved_version(),
                    "evicting document with unsaved changes"
                );
            } else {
                tracing::debug!(resource = %resource, "evict document");
            }
        }
        true
    }

    pub fn get(&self, resource: &Resource) -> Option<Document> {
        self.inner
            .borrow()
            .documents
            .get(resource.as_str())
            .map(|entry| entry.document.clone())
    }

    pub fn view_count(&self, resource: &Resource) -> usize {
        self.inner
            .borrow()
            .documents
            .get(resource.as_str())
            .map(|entry| entry.views)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().documents.is_empty()
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/document/registry.rs"]
mod tests;
