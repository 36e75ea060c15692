use serde::{Deserialize, Serialize};

/// Cumulative portfolio return on one date, next to the market indices it is
/// charted against.
///
/// Index returns come from an external price source; this crate only fills
/// `portfolio` and leaves the index fields `None` (serialized as `null`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkPoint {
    pub date: String,

    /// (value − cost) / cost × 100 across all instruments, rounded to 2 places
    pub portfolio: f64,

    #[serde(default)]
    pub nikkei225: Option<f64>,

    #[serde(default)]
    pub sp500: Option<f64>,
}

impl BenchmarkPoint {
    pub fn new(date: impl Into<String>, portfolio: f64) -> Self {
        Self {
            date: date.into(),
            portfolio,
            nikkei225: None,
            sp500: None,
        }
    }
}
