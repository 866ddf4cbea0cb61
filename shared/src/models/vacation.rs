//! Vacation Model (férias)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates;
use crate::error::ModelError;

/// Vacation record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vacation {
    pub id: i64,
    /// Employee display name
    #[serde(default)]
    pub name: String,
    #[serde(with = "dates::flexible")]
    pub start_date: NaiveDate,
    #[serde(with = "dates::flexible")]
    pub end_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

impl Vacation {
    pub fn from_create(id: i64, payload: VacationCreate) -> Self {
        Self {
            id,
            name: payload.name,
            start_date: payload.start_date,
            end_date: payload.end_date,
            notes: payload.notes,
        }
    }
}

/// Create vacation payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationCreate {
    pub name: String,
    #[serde(with = "dates::flexible")]
    pub start_date: NaiveDate,
    #[serde(with = "dates::flexible")]
    pub end_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

impl VacationCreate {
    /// Trims text and rejects `end_date < start_date`
    pub fn new(
        name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        notes: Option<&str>,
    ) -> Result<Self, ModelError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ModelError::EmptyField("name"));
        }
        if end_date < start_date {
            return Err(ModelError::InvalidDateRange);
        }
        Ok(Self {
            name: name.to_string(),
            start_date,
            end_date,
            notes: notes.unwrap_or_default().trim().to_string(),
        })
    }
}
