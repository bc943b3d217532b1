//! 编辑日志（快照模型）
//!
//! 线性的编辑序列，尾部追加、尾部弹出：
//! - 每次编辑保存完整内容快照，版本号由日志分配
//! - apply_edits / undo_edits 按版本号做幂等校验，重复投递不会破坏状态
//! - 变更通过 channel 通知订阅者，订阅者丢弃接收端即取消订阅

use super::edit::{Edit, Version};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

/// undo 时候选编辑与尾部版本不一致的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UndoPolicy {
    /// 视为宿主 undo 栈失步，放弃本批剩余的候选
    #[default]
    Abort,
    /// 跳过不匹配的候选，继续处理后续候选
    Skip,
}

/// 日志事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    /// 新编辑产生（apply_new_edit）
    EditApplied(Edit),
    /// 一批 apply/undo 处理完毕，订阅者需要重新读取内容
    ContentsChanged,
}

/// 事件接收端
pub struct LogEvents {
    rx: UnboundedReceiver<LogEvent>,
}

impl LogEvents {
    pub async fn recv(&mut self) -> Option<LogEvent> {
        self.rx.recv().await
    }

    /// 非阻塞读取，没有待处理事件时返回 None
    pub fn try_recv(&mut self) -> Option<LogEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

/// 一次保存的版本记账，写入失败时用来回滚
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveTicket {
    id: u64,
    previous: Version,
    attempted: Version,
}

impl SaveTicket {
    pub fn previous(&self) -> Version {
        self.previous
    }

    pub fn attempted(&self) -> Version {
        self.attempted
    }
}

pub struct EditLog {
    /// 编辑序列，版本号从头到尾严格递增
    edits: Vec<Edit>,
    /// 从存储加载的初始内容，未加载时为 None
    initial_value: Option<String>,
    /// 当前版本（尾部编辑的版本，空序列时为 0）
    version: Version,
    /// 最近一次成功持久化的版本
    saved_version: Version,
    undo_policy: UndoPolicy,
    /// 尚未完成写入的保存，按开始顺序排列
    pending_saves: Vec<SaveTicket>,
    next_save_id: u64,
    subscribers: Vec<UnboundedSender<LogEvent>>,
}

impl EditLog {
    pub fn new() -> Self {
        Self {
            edits: Vec::new(),
            initial_value: None,
            version: Version::ZERO,
            saved_version: Version::ZERO,
            undo_policy: UndoPolicy::default(),
            pending_saves: Vec::new(),
            next_save_id: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn with_undo_policy(mut self, policy: UndoPolicy) -> Self {
        self.undo_policy = policy;
        self
    }

    // ==================== 查询 ====================

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn saved_version(&self) -> Version {
        self.saved_version
    }

    pub fn is_dirty(&self) -> bool {
        self.version != self.saved_version
    }

    pub fn is_loaded(&self) -> bool {
        self.initial_value.is_some()
    }

    pub fn undo_policy(&self) -> UndoPolicy {
        self.undo_policy
    }

    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    pub fn tail(&self) -> Option<&Edit> {
        self.edits.last()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn pending_saves(&self) -> usize {
        self.pending_saves.len()
    }

    /// 当前内容：尾部编辑的快照，否则为初始内容。
    /// None 表示内容尚不可用（未加载且没有编辑），不等于空字符串。
    pub fn contents(&self) -> Option<&str> {
        match self.edits.last() {
            Some(edit) => Some(edit.value()),
            None => self.initial_value.as_deref(),
        }
    }

    // ==================== 加载 ====================

    /// 设置初始内容，仅在尚未设置时生效
    pub fn set_initial_value(&mut self, value: String) -> bool {
        if self.initial_value.is_some() {
            return false;
        }
        self.initial_value = Some(value);
        true
    }

    // ==================== 编辑 ====================

    /// 记录一次新编辑：唯一产生新版本号的路径。
    /// 版本号耗尽（重放过 u64::MAX 的编辑）时拒绝，返回 None。
    pub fn apply_new_edit(&mut self, value: impl Into<String>) -> Option<Edit> {
        let Some(version) = self.version.next() else {
            tracing::warn!(version = %self.version, "version exhausted, edit rejected");
            return None;
        };
        let edit = Edit::with_version(value, version);
        tracing::debug!(version = %edit.version(), "apply new edit");

        self.version = edit.version();
        self.edits.push(edit.clone());
        self.emit(LogEvent::EditApplied(edit.clone()));
        Some(edit)
    }

    /// 重放（redo）：只接受版本号大于当前版本的候选，其余静默跳过。
    /// 整批处理完后只通知一次。返回实际应用的数量。
    pub fn apply_edits(&mut self, edits: &[Edit]) -> usize {
        let mut applied = 0;
        for edit in edits {
            if edit.version() > self.version {
                tracing::debug!(version = %edit.version(), "apply edit");
                self.version = edit.version();
                self.edits.push(edit.clone());
                applied += 1;
            } else {
                tracing::debug!(
                    version = %edit.version(),
                    current = %self.version,
                    "skip stale edit"
                );
            }
        }

        self.emit(LogEvent::ContentsChanged);
        applied
    }

    /// 撤销：候选版本与尾部一致时弹出尾部。
    /// 不一致时按 undo_policy 放弃剩余候选或跳过。整批处理完后只通知一次。
    /// 返回实际弹出的数量。
    pub fn undo_edits(&mut self, edits: &[Edit]) -> usize {
        let mut undone = 0;
        for edit in edits {
            let Some(tail) = self.edits.last() else {
                break;
            };

            if tail.version() == edit.version() {
                tracing::debug!(version = %edit.version(), "undo edit");
                self.edits.pop();
                self.version = self
                    .edits
                    .last()
                    .map(Edit::version)
                    .unwrap_or(Version::ZERO);
                undone += 1;
                continue;
            }

            tracing::warn!(
                version = %edit.version(),
                tail = %tail.version(),
                policy = ?self.undo_policy,
                "undo version mismatch"
            );
            if self.undo_policy == UndoPolicy::Abort {
                break;
            }
        }

        self.emit(LogEvent::ContentsChanged);
        undone
    }

    // ==================== 保存记账 ====================

    /// 开始保存：已是干净状态时返回 None；
    /// 否则先乐观地把 saved_version 设为当前版本，写入期间到来的新编辑仍会被视为未保存。
    /// 每个 ticket 必须以 commit_save 或 rollback_save 结束。
    pub fn begin_save(&mut self) -> Option<SaveTicket> {
        if !self.is_dirty() {
            return None;
        }
        let ticket = SaveTicket {
            id: self.next_save_id,
            previous: self.saved_version,
            attempted: self.version,
        };
        self.next_save_id += 1;
        self.pending_saves.push(ticket);
        self.saved_version = self.version;
        Some(ticket)
    }

    /// 写入成功
    pub fn commit_save(&mut self, ticket: SaveTicket) {
        self.take_pending(ticket);
    }

    /// 写入失败时回滚 saved_version，返回是否改写了 saved_version。
    ///
    /// 之后开始的保存仍在进行时，本次回滚点转交给紧随其后的那次保存：
    /// 它若也失败，会一路回滚到本次保存之前的版本，而不是停在从未写入的版本上。
    /// 更新的保存已经成功时保持不变。
    pub fn rollback_save(&mut self, ticket: SaveTicket) -> bool {
        let Some((index, pending)) = self.take_pending(ticket) else {
            return false;
        };

        if let Some(successor) = self.pending_saves.get_mut(index) {
            successor.previous = pending.previous;
            return false;
        }

        if self.saved_version != pending.attempted {
            return false;
        }
        self.saved_version = pending.previous;
        true
    }

    fn take_pending(&mut self, ticket: SaveTicket) -> Option<(usize, SaveTicket)> {
        let index = self
            .pending_saves
            .iter()
            .position(|pending| pending.id == ticket.id)?;
        Some((index, self.pending_saves.remove(index)))
    }

    // ==================== 通知 ====================

    pub fn subscribe(&mut self) -> LogEvents {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        LogEvents { rx }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.iter().filter(|tx| !tx.is_closed()).count()
    }

    fn emit(&mut self, event: LogEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

impl Default for EditLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/edit_log.rs"]
mod tests;
