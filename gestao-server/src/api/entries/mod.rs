//! Overtime Entry API 模块
//!
//! | 路径 | 方法 | 成功 | 失败 |
//! |------|------|------|------|
//! | /api/entries | GET | 200 array | - |
//! | /api/entries | POST | 201 created entry | 400 |
//! | /api/entries/{id} | DELETE | 200 removed entry | 404 |

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub use handler::EntryPayload;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/entries", get(handler::list).post(handler::create))
        .route("/api/entries/{id}", delete(handler::delete))
}
