//! 数据模型层

pub mod edit;
pub mod edit_log;
pub mod resource;

pub use edit::{Edit, Version};
pub use edit_log::{EditLog, LogEvent, LogEvents, SaveTicket, UndoPolicy};
pub use resource::{Resource, ResourceError};
