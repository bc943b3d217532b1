//! View transport contract.
//!
//! The view is a detached surface connected by an in-order message channel.
//! It may restore its own cached value after a reload, so the core never
//! assumes it starts empty.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

/// view -> core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ViewMessage {
    Edit { value: String },
}

/// core -> view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostMessage {
    SetValue { value: String },
    Apply { value: String },
    Error { message: String },
}

impl HostMessage {
    pub fn value(&self) -> Option<&str> {
        match self {
            HostMessage::SetValue { value } | HostMessage::Apply { value } => Some(value),
            HostMessage::Error { .. } => None,
        }
    }
}

/// Which message a refresh pushes to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RefreshKind {
    #[default]
    SetValue,
    Apply,
}

impl RefreshKind {
    pub fn message(self, value: String) -> HostMessage {
        match self {
            RefreshKind::SetValue => HostMessage::SetValue { value },
            RefreshKind::Apply => HostMessage::Apply { value },
        }
    }
}

#[derive(Clone)]
pub struct ViewHandle {
    tx: UnboundedSender<HostMessage>,
}

pub struct ViewReceiver {
    rx: UnboundedReceiver<HostMessage>,
}

pub fn view_channel() -> (ViewHandle, ViewReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ViewHandle { tx }, ViewReceiver { rx })
}

impl ViewHandle {
    /// Returns `false` once the view side has been torn down.
    pub fn post(&self, msg: HostMessage) -> bool {
        self.tx.send(msg).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl ViewReceiver {
    pub fn try_recv(&mut self) -> Option<HostMessage> {
        match self.rx.try_recv() {
            Ok(msg) => Some(msg),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/view.rs"]
mod tests;
