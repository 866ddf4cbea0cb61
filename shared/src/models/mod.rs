//! Data models
//!
//! Shared between gestao-server and gestao-client (via API).
//! All IDs are `i64`: server sequence numbers and locally generated ids share one space.

pub mod entry;
pub mod vacation;

// Re-exports
pub use entry::*;
pub use vacation::*;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A stored collection decoded record by record.
///
/// Records that do not decode (a `null` date, a missing id) stay in
/// `rejected` untouched so that rewriting the collection never drops them.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub records: Vec<T>,
    pub rejected: Vec<Value>,
}

impl<T> Default for Decoded<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

impl<T: DeserializeOwned> Decoded<T> {
    pub fn from_values(values: Vec<Value>) -> Self {
        let mut decoded = Self::default();
        for value in values {
            match T::deserialize(&value) {
                Ok(record) => decoded.records.push(record),
                Err(_) => decoded.rejected.push(value),
            }
        }
        decoded
    }
}

impl<T: Serialize> Decoded<T> {
    /// Decoded records first, rejected ones after them as they were read
    pub fn to_values(&self) -> serde_json::Result<Vec<Value>> {
        let mut values = self
            .records
            .iter()
            .map(serde_json::to_value)
            .collect::<serde_json::Result<Vec<_>>>()?;
        values.extend(self.rejected.iter().cloned());
        Ok(values)
    }
}

impl<T> Decoded<T> {
    /// Numeric ids held by rejected records; they stay reserved
    pub fn rejected_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.rejected
            .iter()
            .filter_map(|value| value.get("id").and_then(Value::as_i64))
    }
}
