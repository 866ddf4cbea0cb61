//! Vacation API 模块
//!
//! | 路径 | 方法 | 成功 | 失败 |
//! |------|------|------|------|
//! | /api/vacations | GET | 200 array | - |
//! | /api/vacations | POST | 201 created vacation | 400 |
//! | /api/vacations/{id} | DELETE | 200 removed vacation | 404 |

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub use handler::VacationPayload;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/vacations", get(handler::list).post(handler::create))
        .route("/api/vacations/{id}", delete(handler::delete))
}
