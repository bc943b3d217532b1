//! 存储服务模块
//!
//! 按 URI scheme 选择存储后端（本地文件、内存等）

pub mod local;
pub mod memory;
pub mod service;

pub use local::LocalStorage;
pub use memory::MemoryStorage;
pub use service::StorageService;
