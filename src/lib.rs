//! zdoc - 分离式视图的文档宿主库
//!
//! 模块结构：
//! - models: 数据模型（Edit, EditLog, Resource）
//! - kernel: 文档会话（Document, DocumentRegistry, DocumentController）与服务层（存储、配置）
//! - app: 应用层（宿主撤销栈, 标准输入输出会话）

pub mod app;
pub mod kernel;
pub mod models;
