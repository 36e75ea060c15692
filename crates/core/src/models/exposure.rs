use serde::{Deserialize, Serialize};

/// Valuation and profit held in one currency on the latest reporting date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureItem {
    pub currency: String,

    /// Summed valuation, rounded to whole units
    pub value: f64,

    /// Summed acquisition cost, rounded to whole units
    pub cost: f64,

    /// value − cost, rounded to whole units
    pub profit: f64,

    /// profit / cost × 100, rounded to 2 places
    pub profit_rate: f64,

    /// Share of the total value across the included currencies, rounded to 2 places
    pub percentage: f64,
}
