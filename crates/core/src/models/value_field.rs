use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::data_point::FinancialDataPoint;

/// Numeric field of a [`FinancialDataPoint`] that charts can plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueField {
    Value,
    Profit,
    ProfitRate,
    StockProfit,
    FxProfit,
    Cost,
}

impl ValueField {
    pub const ALL: [ValueField; 6] = [
        ValueField::Value,
        ValueField::Profit,
        ValueField::ProfitRate,
        ValueField::StockProfit,
        ValueField::FxProfit,
        ValueField::Cost,
    ];

    /// Read this field from a record.
    #[must_use]
    pub fn select(self, point: &FinancialDataPoint) -> f64 {
        match self {
            ValueField::Value => point.value,
            ValueField::Profit => point.profit,
            ValueField::ProfitRate => point.profit_rate,
            ValueField::StockProfit => point.stock_profit,
            ValueField::FxProfit => point.fx_profit,
            ValueField::Cost => point.cost,
        }
    }

    /// Key used for this field in serialized rows (camelCase, as in the JSON records).
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            ValueField::Value => "value",
            ValueField::Profit => "profit",
            ValueField::ProfitRate => "profitRate",
            ValueField::StockProfit => "stockProfit",
            ValueField::FxProfit => "fxProfit",
            ValueField::Cost => "cost",
        }
    }
}

impl std::fmt::Display for ValueField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for ValueField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValueField::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| CoreError::ValidationError(format!("Unknown value field '{s}'")))
    }
}
