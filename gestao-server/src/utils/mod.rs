//! 工具模块 - 错误类型、日志和输入校验

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{AppError, AppResult};
