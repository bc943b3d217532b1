//! Shared document: one edit log per resource plus its storage.
//!
//! Cloning a `Document` yields another handle to the same log. Every view
//! opened on the resource goes through one of these handles, so they all
//! observe a single history.

use crate::kernel::services::adapters::storage::StorageService;
use crate::kernel::services::ports::StorageError;
use crate::models::{Edit, EditLog, LogEvents, Resource, UndoPolicy, Version};
use std::cell::RefCell;
use std::rc::Rc;
use tokio::sync::OnceCell;

pub type Result<T> = std::result::Result<T, DocumentError>;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to read {resource}: {source}")]
    Read {
        resource: Resource,
        #[source]
        source: StorageError,
    },
    #[error("failed to write {resource}: {source}")]
    Write {
        resource: Resource,
        #[source]
        source: StorageError,
    },
    #[error("{resource} is not valid UTF-8")]
    InvalidUtf8 { resource: Resource },
    #[error("{0} is not loaded")]
    NotLoaded(Resource),
    #[error("{0} has run out of versions")]
    VersionExhausted(Resource),
    #[error("document session is disposed")]
    Disposed,
}

struct DocumentInner {
    resource: Resource,
    storage: Rc<StorageService>,
    log: RefCell<EditLog>,
    loaded: OnceCell<()>,
}

#[derive(Clone)]
pub struct Document {
    inner: Rc<DocumentInner>,
}

impl Document {
    pub fn new(resource: Resource, storage: Rc<StorageService>, undo_policy: UndoPolicy) -> Self {
        Self {
            inner: Rc::new(DocumentInner {
                resource,
                storage,
                log: RefCell::new(EditLog::new().with_undo_policy(undo_policy)),
                loaded: OnceCell::new(),
            }),
        }
    }

    pub fn resource(&self) -> &Resource {
        &self.inner.resource
    }

    pub fn ptr_eq(a: &Document, b: &Document) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }

    /// Fetches the persisted content once. Concurrent callers share the
    /// in-flight read; a failed read leaves the document unloaded so a later
    /// call retries.
    pub async fn load(&self) -> Result<()> {
        let inner = &self.inner;
        inner
            .loaded
            .get_or_try_init(|| async {
                if inner.log.borrow().is_loaded() {
                    return Ok(());
                }

                let bytes = inner.storage.read_file(&inner.resource).await.map_err(|source| {
                    tracing::warn!(resource = %inner.resource, error = %source, "load failed");
                    DocumentError::Read {
                        resource: inner.resource.clone(),
                        source,
                    }
                })?;
                let text = String::from_utf8(bytes).map_err(|_| DocumentError::InvalidUtf8 {
                    resource: inner.resource.clone(),
                })?;

                tracing::debug!(resource = %inner.resource, len = text.len(), "document loaded");
                inner.log.borrow_mut().set_initial_value(text);
                Ok::<(), DocumentError>(())
            })
            .await
            .map(|_| ())
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.log.borrow().is_loaded()
    }

    pub fn contents(&self) -> Option<String> {
        self.inner.log.borrow().contents().map(str::to_owned)
    }

    pub fn version(&self) -> Version {
        self.inner.log.borrow().version()
    }

    pub fn saved_version(&self) -> Version {
        self.inner.log.borrow().saved_version()
    }

    pub fn is_dirty(&self) -> bool {
        self.inner.log.borrow().is_dirty()
    }

    pub fn with_log<R>(&self, f: impl FnOnce(&EditLog) -> R) -> R {
        f(&self.inner.log.borrow())
    }

    pub fn subscribe(&self) -> LogEvents {
        self.inner.log.borrow_mut().subscribe()
    }

    pub fn apply_new_edit(&self, value: impl Into<String>) -> Result<Edit> {
        self.inner
            .log
            .borrow_mut()
            .apply_new_edit(value)
            .ok_or_else(|| DocumentError::VersionExhausted(self.inner.resource.clone()))
    }

    pub fn apply_edits(&self, edits: &[Edit]) -> usize {
        self.inner.log.borrow_mut().apply_edits(edits)
    }

    pub fn undo_edits(&self, edits: &[Edit]) -> usize {
        self.inner.log.borrow_mut().undo_edits(edits)
    }

    /// Writes the current contents if the document is dirty. Returns whether a
    /// write happened.
    ///
    /// `saved_version` moves before the write so that an edit landing while the
    /// write is suspended still counts as unsaved. A failed write puts it back.
    pub async fn save(&self) -> Result<bool> {
        let (ticket, contents) = {
            let mut log = self.inner.log.borrow_mut();
            if !log.is_dirty() {
                return Ok(false);
            }
            let Some(contents) = log.contents().map(str::to_owned) else {
                return Err(DocumentError::NotLoaded(self.inner.resource.clone()));
            };
            let Some(ticket) = log.begin_save() else {
                return Ok(false);
            };
            (ticket, contents)
        };

        tracing::info!(
            resource = %self.inner.resource,
            version = %ticket.attempted(),
            saved_version = %ticket.previous(),
            "save"
        );

        match self
            .inner
            .storage
            .write_file(&self.inner.resource, contents.as_bytes())
            .await
        {
            Ok(()) => {
                self.inner.log.borrow_mut().commit_save(ticket);
                Ok(true)
            }
            Err(source) => {
                let rolled_back = self.inner.log.borrow_mut().rollback_save(ticket);
                tracing::warn!(
                    resource = %self.inner.resource,
                    error = %source,
                    rolled_back,
                    "save failed"
                );
                Err(DocumentError::Write {
                    resource: self.inner.resource.clone(),
                    source,
                })
            }
        }
    }

    /// Exports the current contents to `target`. Version bookkeeping of this
    /// document is left alone.
    pub async fn save_as(&self, target: &Resource) -> Result<()> {
        let contents = self
            .contents()
            .ok_or_else(|| DocumentError::NotLoaded(self.inner.resource.clone()))?;

        tracing::info!(resource = %self.inner.resource, target = %target, "save as");
        self.inner
            .storage
            .write_file(target, contents.as_bytes())
            .await
            .map_err(|source| DocumentError::Write {
                resource: target.clone(),
                source,
            })
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/document/document.rs"]
mod tests;
