//! Overtime Entry API Handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::Value;
use shared::models::{EntryCreate, EntryKind, OvertimeEntry};

use crate::api::parse_id;
use crate::core::ServerState;
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, required_date, required_number, required_text};
use crate::utils::{AppError, AppResult};

/// POST body, validated field by field
///
/// `hours` must be a JSON number; `type` defaults to `extra`. Hours are stored
/// exactly as sent (clients apply the sign).
#[derive(Debug, Default, Deserialize)]
pub struct EntryPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub hours: Option<Value>,
}

impl EntryPayload {
    pub fn validate(self) -> AppResult<EntryCreate> {
        let name = required_text(self.name, "name", MAX_NAME_LEN)?;
        let reason = required_text(self.reason, "reason", MAX_NOTE_LEN)?;
        let date = required_date(self.date, "date")?;
        let hours = required_number(self.hours, "hours")?;
        let kind = match self.kind.as_deref().map(str::trim) {
            None | Some("") => EntryKind::default(),
            Some(raw) => raw.parse::<EntryKind>()?,
        };
        Ok(EntryCreate {
            name,
            reason,
            kind,
            date,
            hours,
        })
    }
}

/// GET /api/entries - 获取所有记录 (newest first)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<OvertimeEntry>>> {
    let entries = state.store.list_entries().await?;
    Ok(Json(entries))
}

/// POST /api/entries - 创建记录
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<EntryPayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<OvertimeEntry>)> {
    let Json(payload) = payload?;
    let payload = payload.validate()?;
    let entry = state.store.create_entry(payload).await?;
    tracing::info!(id = entry.id, name = %entry.name, hours = entry.hours, "Entry created");
    Ok((StatusCode::CREATED, Json(entry)))
}

/// DELETE /api/entries/{id} - 删除记录
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OvertimeEntry>> {
    let not_found = || AppError::not_found(format!("Entry {id} not found"));
    let entry_id = parse_id(&id).ok_or_else(not_found)?;
    let removed = state
        .store
        .delete_entry(entry_id)
        .await?
        .ok_or_else(not_found)?;
    tracing::info!(id = removed.id, "Entry deleted");
    Ok(Json(removed))
}
