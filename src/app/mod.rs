//! 应用层：宿主撤销栈与标准输入输出会话

pub mod host;
pub mod session;

pub use host::EditStack;
pub use session::{CommandError, HostCommand, Inbound, Session};
