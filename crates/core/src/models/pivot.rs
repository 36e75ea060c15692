use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One date of a pivot table: `{ date, <instrument name>: value, ... }`.
///
/// Instruments without a record on this date are absent, not zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotRow {
    pub date: String,

    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl PivotRow {
    /// JSON key holding the row's date label; no series may use it.
    pub const DATE_KEY: &'static str = "date";

    /// Value for an instrument name, `None` when it had no record on this date.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }
}

/// Two or more instrument codes sharing one display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameCollision {
    /// The shared display name
    pub name: String,

    /// Codes mapped to this name, in first-appearance order
    pub codes: Vec<String>,

    /// Dates on which values of different codes competed for the same cell
    pub dates: Vec<String>,
}

/// A series whose display name clashed with [`PivotRow::DATE_KEY`] and was
/// emitted under `key` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamedSeries {
    pub code: String,
    pub name: String,
    pub key: String,
}

/// Chart-ready pivot of records: rows by date, series by instrument name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PivotTable {
    /// One row per distinct date, ascending
    pub rows: Vec<PivotRow>,

    /// One series name per distinct code, in first-appearance order of the code
    pub names: Vec<String>,

    /// Display names shared by several codes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub collisions: Vec<NameCollision>,

    /// Series renamed because their display name was the reserved row key
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub renamed: Vec<RenamedSeries>,
}

impl PivotTable {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Date labels of all rows, in row order.
    #[must_use]
    pub fn dates(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.date.as_str()).collect()
    }

    /// Find the row for a date label.
    #[must_use]
    pub fn row(&self, date: &str) -> Option<&PivotRow> {
        self.rows.iter().find(|r| r.date == date)
    }
}
