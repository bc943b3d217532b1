//! Per-view document session.
//!
//! A controller ties one attached view to the shared document of its
//! resource: it forwards view edits into the log, pushes reconstructed
//! content back to the view whenever the log changes, and exposes the host
//! commands (save, save as, undo/redo replay).

use super::document::{Document, DocumentError, Result};
use super::registry::DocumentRegistry;
use crate::kernel::services::ports::{RefreshKind, ViewHandle, ViewMessage};
use crate::models::{Edit, LogEvent, LogEvents, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unloaded,
    Clean,
    Dirty,
    Disposed,
}

pub struct DocumentController {
    document: Document,
    registry: DocumentRegistry,
    view: ViewHandle,
    events: Option<LogEvents>,
    refresh_kind: RefreshKind,
    disposed: bool,
}

impl DocumentController {
    /// Attaches a view to the resource's shared document. Loading is deferred
    /// to [`show`](Self::show).
    pub fn open(registry: &DocumentRegistry, resource: &Resource, view: ViewHandle) -> Self {
        let document = registry.acquire(resource);
        let events = document.subscribe();
        tracing::debug!(
            resource = %resource,
            views = registry.view_count(resource),
            "open document"
        );
        Self {
            document,
            registry: registry.clone(),
            view,
            events: Some(events),
            refresh_kind: RefreshKind::default(),
            disposed: false,
        }
    }

    pub fn with_refresh_kind(mut self, kind: RefreshKind) -> Self {
        self.refresh_kind = kind;
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn resource(&self) -> &Resource {
        self.document.resource()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn state(&self) -> SessionState {
        if self.disposed {
            SessionState::Disposed
        } else if !self.document.is_loaded() {
            SessionState::Unloaded
        } else if self.document.is_dirty() {
            SessionState::Dirty
        } else {
            SessionState::Clean
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.disposed {
            return Err(DocumentError::Disposed);
        }
        Ok(())
    }

    /// First render: load the document, then push its content.
    pub async fn show(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.document.load().await?;
        self.refresh();
        Ok(())
    }

    pub async fn on_view_message(&mut self, msg: ViewMessage) -> Result<Edit> {
        match msg {
            ViewMessage::Edit { value } => self.on_view_edit(value).await,
        }
    }

    /// Keystroke path. Versions only advance on a loaded document, so the
    /// load is awaited first (a no-op once it has completed).
    pub async fn on_view_edit(&mut self, value: String) -> Result<Edit> {
        self.ensure_open()?;
        self.document.load().await?;
        self.document.apply_new_edit(value)
    }

    /// Host redo / replay. Like view edits, replay only touches a loaded log.
    pub async fn apply_edits(&self, edits: &[Edit]) -> Result<usize> {
        self.ensure_open()?;
        self.document.load().await?;
        Ok(self.document.apply_edits(edits))
    }

    /// Host undo.
    pub async fn undo_edits(&self, edits: &[Edit]) -> Result<usize> {
        self.ensure_open()?;
        self.document.load().await?;
        Ok(self.document.undo_edits(edits))
    }

    pub async fn save(&self) -> Result<bool> {
        self.ensure_open()?;
        self.document.save().await
    }

    pub async fn save_as(&self, target: &Resource) -> Result<()> {
        self.ensure_open()?;
        self.document.save_as(target).await
    }

    /// Pushes the current content to the view. Returns whether anything was
    /// sent. A torn-down view disposes the session.
    pub fn refresh(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        let Some(value) = self.document.contents() else {
            return false;
        };

        if self.view.post(self.refresh_kind.message(value)) {
            return true;
        }

        tracing::debug!(resource = %self.resource(), "view closed, disposing session");
        self.dispose();
        false
    }

    /// Drains pending log events and refreshes once if there were any.
    /// Returns the number of events drained.
    pub fn pump(&mut self) -> usize {
        let Some(events) = self.events.as_mut() else {
            return 0;
        };
        let drained = std::iter::from_fn(|| events.try_recv()).count();
        if drained > 0 {
            self.refresh();
        }
        drained
    }

    /// Waits for the next log event and refreshes the view. Returns `None`
    /// once the session is disposed.
    pub async fn next_event(&mut self) -> Option<LogEvent> {
        let event = self.events.as_mut()?.recv().await?;
        self.refresh();
        Some(event)
    }

    /// Stops notifications and releases the registry reference. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.events = None;
        let evicted = self.registry.release(self.document.resource());
        tracing::debug!(resource = %self.document.resource(), evicted, "dispose session");
    }
}

impl Drop for DocumentController {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/document/controller.rs"]
mod tests;
