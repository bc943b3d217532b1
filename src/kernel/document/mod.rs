//! Document sessions: shared logs, the registry, per-view controllers.

pub mod controller;
pub mod document;
pub mod registry;

pub use controller::{DocumentController, SessionState};
pub use document::{Document, DocumentError};
pub use registry::DocumentRegistry;
