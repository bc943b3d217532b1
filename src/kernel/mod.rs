//! Headless document core (sessions + services).

pub mod document;
pub mod services;

pub use document::{
    Document, DocumentController, DocumentError, DocumentRegistry, SessionState,
};
