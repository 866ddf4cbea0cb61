//! Gestão Server - overtime and vacation tracking API
//!
//! # 模块结构
//!
//! ```text
//! gestao-server/src/
//! ├── core/          # 配置、状态、错误、HTTP 服务器
//! ├── api/           # HTTP 路由和处理器 (health, entries, vacations)
//! ├── store/         # JSON document store
//! └── utils/         # 错误类型、日志、校验
//! ```

pub mod api;
pub mod core;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerError, ServerState, build_app};
pub use store::{DocumentStore, StoreError};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

pub fn print_banner() {
    println!(
        r#"
   ______          __
  / ____/__  _____/ /_____ _____
 / / __/ _ \/ ___/ __/ __ `/ __ \
/ /_/ /  __(__  ) /_/ /_/ / /_/ /
\____/\___/____/\__/\__,_/\____/
    "#
    );
}
