use serde::{Deserialize, Serialize};

fn default_currency() -> String {
    "JPY".to_string()
}

/// One instrument's state on one reporting date.
///
/// Records arrive already computed by the spreadsheet layer; the numeric
/// fields are taken as-is (non-finite values included).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialDataPoint {
    /// Reporting date label, e.g. "2024-01-31" or "2024-01-末"
    pub date: String,

    /// Stable instrument identifier (ticker, e.g. "7974.T", "NVDA")
    pub code: String,

    /// Display name — not guaranteed unique across codes
    pub name: String,

    /// Valuation amount
    #[serde(default)]
    pub value: f64,

    /// Profit amount
    #[serde(default)]
    pub profit: f64,

    /// Profit rate in percent
    #[serde(default)]
    pub profit_rate: f64,

    /// Price-driven component of the profit
    #[serde(default)]
    pub stock_profit: f64,

    /// Exchange-rate-driven component of the profit
    #[serde(default)]
    pub fx_profit: f64,

    /// Currency the instrument trades in (informational for pivots)
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Acquisition cost, used by the dashboard KPI and exposure views
    #[serde(default)]
    pub cost: f64,
}

impl FinancialDataPoint {
    /// Create a record with all numeric fields zeroed and currency JPY.
    pub fn new(date: impl Into<String>, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            code: code.into(),
            name: name.into(),
            value: 0.0,
            profit: 0.0,
            profit_rate: 0.0,
            stock_profit: 0.0,
            fx_profit: 0.0,
            currency: default_currency(),
            cost: 0.0,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    #[must_use]
    pub fn with_profit(mut self, profit: f64, profit_rate: f64) -> Self {
        self.profit = profit;
        self.profit_rate = profit_rate;
        self
    }

    /// Set the stock/FX decomposition of the profit.
    #[must_use]
    pub fn with_decomposition(mut self, stock_profit: f64, fx_profit: f64) -> Self {
        self.stock_profit = stock_profit;
        self.fx_profit = fx_profit;
        self
    }

    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    #[must_use]
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }
}
