//! Date and hours (de)serialization helpers
//!
//! Calendar dates travel as `YYYY-MM-DD`. Older documents carry full ISO-8601
//! date-time text (`2024-06-01T00:00:00.000Z`); only the calendar part is kept.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
use serde_json::Value;

/// Wire format for calendar dates
pub const ISO_DATE: &str = "%Y-%m-%d";

/// pt-BR display format used by the free-text search
pub const BR_DATE: &str = "%d/%m/%Y";

/// Parse a calendar date from `YYYY-MM-DD` or ISO-8601 date-time text.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, ISO_DATE) {
        return Some(date);
    }
    match raw.as_bytes().get(10) {
        Some(b'T') | Some(b' ') => NaiveDate::parse_from_str(raw.get(..10)?, ISO_DATE).ok(),
        _ => None,
    }
}

/// `2024-06-01`
pub fn format_iso(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

/// `01/06/2024`
pub fn format_br(date: NaiveDate) -> String {
    date.format(BR_DATE).to_string()
}

/// Hours as a finite number, or `None` for anything that is not numeric.
pub fn hours_from_value(value: &Value) -> Option<f64> {
    let hours = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    hours.is_finite().then_some(hours)
}

/// Lenient hours deserializer: non-numeric values become `0.0`.
pub fn deserialize_hours<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(hours_from_value).unwrap_or(0.0))
}

/// `#[serde(with = "crate::dates::flexible")]` for `NaiveDate` fields
pub mod flexible {
    use super::*;

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_iso(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid date: {raw}")))
    }
}
