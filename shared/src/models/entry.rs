//! Overtime Entry Model (horas extra / desconto)

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::dates;
use crate::error::ModelError;

/// Entry type
///
/// `Extra` adds hours to the employee balance, `Desconto` deducts them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[default]
    Extra,
    Desconto,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extra => "extra",
            Self::Desconto => "desconto",
        }
    }

    /// Apply this kind's sign to a magnitude
    pub fn signed(&self, hours: f64) -> f64 {
        match self {
            Self::Extra => hours.abs(),
            Self::Desconto => -hours.abs(),
        }
    }
}

impl std::str::FromStr for EntryKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "extra" => Ok(Self::Extra),
            "desconto" => Ok(Self::Desconto),
            other => Err(ModelError::UnknownKind(other.to_string())),
        }
    }
}

/// Stored documents may hold any `type` text (or none); only `desconto` deducts.
fn deserialize_stored_kind<'de, D>(deserializer: D) -> Result<EntryKind, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|raw| raw.to_lowercase().parse().ok())
        .unwrap_or_default())
}

/// Overtime entry record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertimeEntry {
    /// Server sequence number, or a locally generated id when created offline
    pub id: i64,
    /// Employee display name
    #[serde(default)]
    pub name: String,
    /// Justification
    #[serde(default)]
    pub reason: String,
    /// Unrecognized stored types read as `Extra`
    #[serde(rename = "type", default, deserialize_with = "deserialize_stored_kind")]
    pub kind: EntryKind,
    #[serde(with = "dates::flexible")]
    pub date: NaiveDate,
    /// Signed hours (negative for `Desconto`)
    #[serde(default, deserialize_with = "dates::deserialize_hours")]
    pub hours: f64,
}

impl OvertimeEntry {
    /// Materialize a stored entry from a create payload and an assigned id
    pub fn from_create(id: i64, payload: EntryCreate) -> Self {
        Self {
            id,
            name: payload.name,
            reason: payload.reason,
            kind: payload.kind,
            date: payload.date,
            hours: payload.hours,
        }
    }
}

/// Create entry payload
///
/// Built through [`EntryCreate::new`], which trims the text fields and forces
/// the sign of `hours` from `kind`. Sign and kind are never re-derived later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryCreate {
    pub name: String,
    pub reason: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(with = "dates::flexible")]
    pub date: NaiveDate,
    pub hours: f64,
}

impl EntryCreate {
    pub fn new(
        name: &str,
        reason: &str,
        kind: EntryKind,
        date: NaiveDate,
        hours: f64,
    ) -> Result<Self, ModelError> {
        let name = name.trim();
        let reason = reason.trim();
        if name.is_empty() {
            return Err(ModelError::EmptyField("name"));
        }
        if reason.is_empty() {
            return Err(ModelError::EmptyField("reason"));
        }
        if !hours.is_finite() {
            return Err(ModelError::InvalidHours);
        }
        Ok(Self {
            name: name.to_string(),
            reason: reason.to_string(),
            kind,
            date,
            hours: kind.signed(hours),
        })
    }
}
