//! 宿主侧的撤销/重做栈
//!
//! 记录每次视图编辑产生的 Edit，撤销/重做时把对应的 Edit 交还给文档日志，
//! 由日志按版本号校验后弹出或重放。

use crate::kernel::document::{DocumentController, DocumentError};
use crate::models::Edit;

#[derive(Debug, Default)]
pub struct EditStack {
    undo: Vec<Edit>,
    redo: Vec<Edit>,
}

impl EditStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新编辑入栈，清空重做栈
    pub fn record(&mut self, edit: Edit) {
        self.undo.push(edit);
        self.redo.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// 返回日志是否真的弹出了编辑。
    /// 日志没有弹出时说明栈已失步，该编辑直接丢弃，不进入重做栈。
    pub async fn undo(&mut self, controller: &DocumentController) -> Result<bool, DocumentError> {
        let Some(edit) = self.undo.pop() else {
            return Ok(false);
        };
        match controller.undo_edits(std::slice::from_ref(&edit)).await {
            Ok(0) => {
                tracing::warn!(version = %edit.version(), "undo stack out of sync, edit dropped");
                Ok(false)
            }
            Ok(_) => {
                self.redo.push(edit);
                Ok(true)
            }
            Err(e) => {
                self.undo.push(edit);
                Err(e)
            }
        }
    }

    /// 返回日志是否真的重放了编辑
    pub async fn redo(&mut self, controller: &DocumentController) -> Result<bool, DocumentError> {
        let Some(edit) = self.redo.pop() else {
            return Ok(false);
        };
        match controller.apply_edits(std::slice::from_ref(&edit)).await {
            Ok(applied) => {
                self.undo.push(edit);
                Ok(applied > 0)
            }
            Err(e) => {
                self.redo.push(edit);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/host.rs"]
mod tests;
