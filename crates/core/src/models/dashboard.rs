use serde::{Deserialize, Serialize};

/// Headline numbers for the most recent reporting date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    /// Sum of valuations on the base date
    pub total_value: f64,

    /// Sum of profits on the base date
    pub total_profit: f64,

    /// total_profit / total_cost × 100, rounded to 2 places (0 without cost)
    pub profit_rate: f64,

    /// The latest date label in the records, empty when there are none
    pub base_date: String,
}

/// Share of one instrument in the total valuation (donut chart).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationItem {
    pub name: String,
    pub value: f64,

    /// Percentage of the total value, rounded to 2 places
    pub percentage: f64,
}

/// Profit of one instrument on the base date (bar chart).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestProfitItem {
    pub name: String,
    pub profit: f64,
    pub profit_rate: f64,
}

/// Everything the dashboard landing page shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub kpi: KpiSummary,

    /// Sorted by value, largest first
    pub allocation: Vec<AllocationItem>,

    /// Sorted by profit, largest first
    pub latest_profits: Vec<LatestProfitItem>,
}
