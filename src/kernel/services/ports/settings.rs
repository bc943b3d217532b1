use super::view::RefreshKind;
use crate::models::UndoPolicy;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOG_FILTER: &str = "zdoc=info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log_filter: String,
    pub undo_mismatch: UndoPolicy,
    pub refresh_message: RefreshKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            undo_mismatch: UndoPolicy::default(),
            refresh_message: RefreshKind::default(),
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
