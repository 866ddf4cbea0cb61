//! API 路由模块
//!
//! - [`health`] - 健康检查
//! - [`entries`] - overtime / deduction entries
//! - [`vacations`] - vacations

pub mod entries;
pub mod health;
pub mod vacations;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// Path ids are numeric; anything else can never match a stored id
pub(crate) fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}
