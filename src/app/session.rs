//! 标准输入输出会话
//!
//! 每行一个 JSON 消息：视图编辑 `{"type":"edit"}` 以及宿主命令
//! `save` / `saveAs` / `undo` / `redo`。发往视图的消息同样按行写出。

use super::host::EditStack;
use crate::kernel::document::{DocumentController, DocumentError, DocumentRegistry};
use crate::kernel::services::ports::{
    view_channel, HostMessage, Settings, ViewHandle, ViewMessage, ViewReceiver,
};
use crate::models::{Resource, ResourceError};
use serde::Deserialize;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostCommand {
    Save,
    SaveAs { target: String },
    Undo,
    Redo,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Inbound {
    View(ViewMessage),
    Host(HostCommand),
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("invalid message: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

pub struct Session {
    controller: DocumentController,
    view: ViewHandle,
    view_rx: ViewReceiver,
    stack: EditStack,
}

impl Session {
    pub fn open(registry: &DocumentRegistry, resource: &Resource, settings: &Settings) -> Self {
        let (view, view_rx) = view_channel();
        let controller = DocumentController::open(registry, resource, view.clone())
            .with_refresh_kind(settings.refresh_message);
        Self {
            controller,
            view,
            view_rx,
            stack: EditStack::new(),
        }
    }

    pub fn controller(&self) -> &DocumentController {
        &self.controller
    }

    pub fn stack(&self) -> &EditStack {
        &self.stack
    }

    /// Shows the document, then serves `input` until EOF.
    pub async fn run<R, W>(mut self, input: R, mut output: W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        if let Err(e) = self.controller.show().await {
            self.report(&e);
        }
        self.flush(&mut output).await?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Err(e) = self.handle_line(line).await {
                self.report(&e);
            }
            self.controller.pump();
            self.flush(&mut output).await?;
        }

        tracing::info!(resource = %self.controller.resource(), "input closed");
        self.controller.dispose();
        self.flush(&mut output).await
    }

    pub async fn handle_line(&mut self, line: &str) -> Result<(), CommandError> {
        match serde_json::from_str::<Inbound>(line)? {
            Inbound::View(msg) => {
                let edit = self.controller.on_view_message(msg).await?;
                self.stack.record(edit);
            }
            Inbound::Host(HostCommand::Save) => {
                self.controller.save().await?;
            }
            Inbound::Host(HostCommand::SaveAs { target }) => {
                let target = Resource::parse(&target)?;
                self.controller.save_as(&target).await?;
            }
            Inbound::Host(HostCommand::Undo) => {
                self.stack.undo(&self.controller).await?;
            }
            Inbound::Host(HostCommand::Redo) => {
                self.stack.redo(&self.controller).await?;
            }
        }
        Ok(())
    }

    fn report(&self, err: &dyn std::error::Error) {
        tracing::warn!(error = %err, "command failed");
        self.view.post(HostMessage::Error {
            message: err.to_string(),
        });
    }

    async fn flush<W: AsyncWrite + Unpin>(&mut self, output: &mut W) -> io::Result<()> {
        while let Some(msg) = self.view_rx.try_recv() {
            let mut line = serde_json::to_string(&msg).map_err(io::Error::other)?;
            line.push('\n');
            output.write_all(line.as_bytes()).await?;
        }
        output.flush().await
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/session.rs"]
mod tests;
