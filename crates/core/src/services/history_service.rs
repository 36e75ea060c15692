use std::collections::BTreeSet;

use crate::models::data_point::FinancialDataPoint;
use crate::models::history::HistoryView;

/// Builds the profit-history view and its instrument filter.
pub struct HistoryService;

impl HistoryService {
    pub fn new() -> Self {
        Self
    }

    /// Every distinct instrument code, sorted.
    pub fn symbols(&self, records: &[FinancialDataPoint]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.code.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Narrow the records to one instrument code.
    ///
    /// `None` or an empty code keeps every record. `symbols` always lists the
    /// codes of the unfiltered input, so the filter choices stay stable.
    pub fn history(&self, records: &[FinancialDataPoint], stock: Option<&str>) -> HistoryView {
        let data = match stock.filter(|s| !s.is_empty()) {
            Some(code) => records.iter().filter(|r| r.code == code).cloned().collect(),
            None => records.to_vec(),
        };

        HistoryView {
            data,
            symbols: self.symbols(records),
        }
    }
}

impl Default for HistoryService {
    fn default() -> Self {
        Self::new()
    }
}
