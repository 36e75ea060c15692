pub mod aggregation_service;
pub mod dashboard_service;
pub mod exposure_service;
pub mod history_service;
pub mod pivot_service;

/// Round half away from zero to `places` decimal places.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// `numerator / denominator × 100`, or 0 when the denominator is 0.
pub(crate) fn percent_of(numerator: f64, denominator: f64) -> f64 {
    if denominator != 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}
