use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Summed fields across all instruments sharing one date.
///
/// Serializes flat, e.g. `{ "date": "2024-01-末", "stockProfit": 300, "fxProfit": -5 }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub date: String,

    #[serde(flatten)]
    pub sums: BTreeMap<String, f64>,
}

impl AggregateRow {
    /// Sum for a field; fields that were not requested return `None`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<f64> {
        self.sums.get(field).copied()
    }
}
