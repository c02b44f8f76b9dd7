//! Employee Server - Employees CRUD HTTP service over SQLite
//!
//! # 模块结构
//!
//! ```text
//! employee-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── middleware/    # 请求日志
//! ├── db/            # 连接池、建表与种子数据、仓储
//! └── utils/         # 错误类型、日志、校验
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod middleware;
pub mod utils;

// Re-export 公共类型
pub use api::build_app;
pub use crate::core::{Config, Server, ServerState};
pub use db::DbService;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;
