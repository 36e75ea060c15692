use std::collections::BTreeMap;

use crate::models::data_point::FinancialDataPoint;
use crate::models::exposure::ExposureItem;
use crate::models::report_date::DateOrdering;
use crate::services::{percent_of, round_to};

/// Groups the latest reporting date by currency.
pub struct ExposureService;

impl ExposureService {
    pub fn new() -> Self {
        Self
    }

    /// Currency exposure on the latest date, limited to `currencies`.
    ///
    /// Records in other currencies are ignored entirely, including in the
    /// percentage base. Items are sorted by currency code.
    pub fn exposure(
        &self,
        records: &[FinancialDataPoint],
        currencies: &[String],
        ordering: DateOrdering,
    ) -> Vec<ExposureItem> {
        let Some(latest_date) = ordering.latest(records.iter().map(|r| r.date.as_str())) else {
            return Vec::new();
        };

        // currency → (value, cost)
        let mut totals: BTreeMap<String, (f64, f64)> = BTreeMap::new();
        for record in records.iter().filter(|r| r.date == latest_date) {
            let currency = record.currency.trim().to_uppercase();
            if !currencies.iter().any(|c| c.eq_ignore_ascii_case(&currency)) {
                continue;
            }
            let entry = totals.entry(currency).or_insert((0.0, 0.0));
            entry.0 += record.value;
            entry.1 += record.cost;
        }

        let total_value: f64 = totals.values().map(|(value, _)| value).sum();

        totals
            .into_iter()
            .map(|(currency, (value, cost))| {
                let profit = value - cost;
                ExposureItem {
                    currency,
                    value: round_to(value, 0),
                    cost: round_to(cost, 0),
                    profit: round_to(profit, 0),
                    profit_rate: round_to(percent_of(profit, cost), 2),
                    percentage: round_to(percent_of(value, total_value), 2),
                }
            })
            .collect()
    }
}

impl Default for ExposureService {
    fn default() -> Self {
        Self::new()
    }
}
