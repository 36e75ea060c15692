use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::report_date::DateOrdering;

fn default_exposure_currencies() -> Vec<String> {
    vec!["JPY".to_string(), "USD".to_string()]
}

/// User-configurable settings for how views are derived from the records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Ordering of date labels in pivot and aggregate rows.
    #[serde(default)]
    pub date_ordering: DateOrdering,

    /// Currencies included in the exposure view (e.g., "JPY", "USD").
    #[serde(default = "default_exposure_currencies")]
    pub exposure_currencies: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            date_ordering: DateOrdering::default(),
            exposure_currencies: default_exposure_currencies(),
        }
    }
}

impl Settings {
    /// Load settings from JSON; missing keys fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.exposure_currencies = normalize_currencies(&settings.exposure_currencies)?;
        Ok(settings)
    }
}

/// Uppercase and validate currency codes: each must be exactly 3 ASCII letters,
/// the list must not be empty. Duplicates are dropped, first occurrence kept.
pub fn normalize_currencies(currencies: &[String]) -> Result<Vec<String>, CoreError> {
    if currencies.is_empty() {
        return Err(CoreError::ValidationError(
            "At least one exposure currency is required".to_string(),
        ));
    }

    let mut normalized: Vec<String> = Vec::with_capacity(currencies.len());
    for currency in currencies {
        let code = currency.trim().to_uppercase();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::ValidationError(format!(
                "Invalid currency code '{currency}': must be exactly 3 ASCII letters (e.g., JPY, USD)"
            )));
        }
        if !normalized.contains(&code) {
            normalized.push(code);
        }
    }
    Ok(normalized)
}
