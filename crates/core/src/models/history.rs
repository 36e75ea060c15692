use serde::{Deserialize, Serialize};

use super::data_point::FinancialDataPoint;

/// Profit history, optionally narrowed to one instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryView {
    /// Records that passed the filter, in input order
    pub data: Vec<FinancialDataPoint>,

    /// Every distinct code in the unfiltered records, sorted (filter choices)
    pub symbols: Vec<String>,
}
