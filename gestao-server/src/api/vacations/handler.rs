//! Vacation API Handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use shared::models::{Vacation, VacationCreate};

use crate::api::parse_id;
use crate::core::ServerState;
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, optional_text, required_date, required_text};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl VacationPayload {
    pub fn validate(self) -> AppResult<VacationCreate> {
        let name = required_text(self.name, "name", MAX_NAME_LEN)?;
        let start_date = required_date(self.start_date, "startDate")?;
        let end_date = required_date(self.end_date, "endDate")?;
        let notes = optional_text(self.notes, "notes", MAX_NOTE_LEN)?;
        Ok(VacationCreate::new(&name, start_date, end_date, Some(&notes))?)
    }
}

/// GET /api/vacations - 获取所有假期
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Vacation>>> {
    let vacations = state.store.list_vacations().await?;
    Ok(Json(vacations))
}

/// POST /api/vacations - 创建假期
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<VacationPayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Vacation>)> {
    let Json(payload) = payload?;
    let payload = payload.validate()?;
    let vacation = state.store.create_vacation(payload).await?;
    tracing::info!(id = vacation.id, name = %vacation.name, "Vacation created");
    Ok((StatusCode::CREATED, Json(vacation)))
}

/// DELETE /api/vacations/{id} - 删除假期
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vacation>> {
    let not_found = || AppError::not_found(format!("Vacation {id} not found"));
    let vacation_id = parse_id(&id).ok_or_else(not_found)?;
    let removed = state
        .store
        .delete_vacation(vacation_id)
        .await?
        .ok_or_else(not_found)?;
    tracing::info!(id = removed.id, "Vacation deleted");
    Ok(Json(removed))
}
