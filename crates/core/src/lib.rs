pub mod errors;
pub mod models;
pub mod services;

use models::{
    aggregate::AggregateRow,
    benchmark::BenchmarkPoint,
    dashboard::DashboardSummary,
    data_point::FinancialDataPoint,
    exposure::ExposureItem,
    history::HistoryView,
    pivot::PivotTable,
    report_date::DateOrdering,
    settings::{normalize_currencies, Settings},
    value_field::ValueField,
};
use services::{
    aggregation_service::{AggregationService, Selector},
    dashboard_service::DashboardService,
    exposure_service::ExposureService,
    history_service::HistoryService,
    pivot_service::PivotService,
};

use errors::CoreError;

/// Main entry point for the portfolio dashboard core library.
/// Holds the monthly profit records and the settings used to derive views from them.
///
/// Every view is computed fresh from the full record set on each call.
#[must_use]
pub struct PortfolioDashboard {
    records: Vec<FinancialDataPoint>,
    settings: Settings,
    pivot_service: PivotService,
    aggregation_service: AggregationService,
    history_service: HistoryService,
    dashboard_service: DashboardService,
    exposure_service: ExposureService,
}

impl std::fmt::Debug for PortfolioDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioDashboard")
            .field("records", &self.records.len())
            .field("settings", &self.settings)
            .finish()
    }
}

impl PortfolioDashboard {
    /// Wrap a record set with default settings.
    pub fn new(records: Vec<FinancialDataPoint>) -> Self {
        Self::with_settings(records, Settings::default())
    }

    /// Wrap a record set with explicit settings.
    pub fn with_settings(records: Vec<FinancialDataPoint>, settings: Settings) -> Self {
        Self {
            records,
            settings,
            pivot_service: PivotService::new(),
            aggregation_service: AggregationService::new(),
            history_service: HistoryService::new(),
            dashboard_service: DashboardService::new(),
            exposure_service: ExposureService::new(),
        }
    }

    /// Load records from a JSON array of camelCase records.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let records: Vec<FinancialDataPoint> = serde_json::from_str(json)?;
        tracing::debug!(records = records.len(), "loaded records from JSON");
        Ok(Self::new(records))
    }

    /// Load records from a JSON file on disk (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    // ── Records ─────────────────────────────────────────────────────

    /// All records, in input order.
    #[must_use]
    pub fn records(&self) -> &[FinancialDataPoint] {
        &self.records
    }

    /// Get the total number of records.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Distinct date labels, ascending under the configured ordering.
    #[must_use]
    pub fn dates(&self) -> Vec<&str> {
        let mut dates: Vec<&str> = self.records.iter().map(|r| r.date.as_str()).collect();
        dates.sort_unstable();
        dates.dedup();
        self.settings.date_ordering.sort(&mut dates);
        dates
    }

    /// Distinct instrument codes, in first-appearance order.
    #[must_use]
    pub fn unique_codes(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.records
            .iter()
            .map(|r| r.code.as_str())
            .filter(|code| seen.insert(*code))
            .collect()
    }

    // ── Pivots ──────────────────────────────────────────────────────

    /// Pivot the records with a custom value selector.
    #[must_use]
    pub fn pivot<F>(&self, select_value: F) -> PivotTable
    where
        F: Fn(&FinancialDataPoint) -> f64,
    {
        self.pivot_service
            .build_pivot_ordered(&self.records, self.settings.date_ordering, select_value)
    }

    /// Pivot a named record field.
    #[must_use]
    pub fn pivot_field(&self, field: ValueField) -> PivotTable {
        self.pivot_service
            .build_pivot_field(&self.records, self.settings.date_ordering, field)
    }

    /// Valuation per instrument per date (stacked allocation trend).
    #[must_use]
    pub fn allocation_trend(&self) -> PivotTable {
        self.pivot_service
            .allocation_trend(&self.records, self.settings.date_ordering)
    }

    /// Profit rate per instrument per date (instrument comparison chart).
    #[must_use]
    pub fn profit_rate_comparison(&self) -> PivotTable {
        self.pivot_service
            .profit_rate_comparison(&self.records, self.settings.date_ordering)
    }

    // ── Aggregates ──────────────────────────────────────────────────

    /// Sum custom selectors per date.
    #[must_use]
    pub fn aggregate_by_date(&self, selectors: &[Selector<'_>]) -> Vec<AggregateRow> {
        self.aggregation_service
            .aggregate_by_date(&self.records, self.settings.date_ordering, selectors)
    }

    /// Sum named record fields per date.
    #[must_use]
    pub fn aggregate_fields(&self, fields: &[ValueField]) -> Vec<AggregateRow> {
        self.aggregation_service
            .aggregate_fields(&self.records, self.settings.date_ordering, fields)
    }

    /// Total profit across instruments per date.
    #[must_use]
    pub fn total_profit_by_date(&self) -> Vec<AggregateRow> {
        self.aggregation_service
            .total_profit_by_date(&self.records, self.settings.date_ordering)
    }

    /// Stock and FX profit summed separately per date.
    #[must_use]
    pub fn profit_decomposition_by_date(&self) -> Vec<AggregateRow> {
        self.aggregation_service
            .profit_decomposition_by_date(&self.records, self.settings.date_ordering)
    }

    /// Cumulative portfolio return per date, for the benchmark comparison chart.
    #[must_use]
    pub fn portfolio_return_by_date(&self) -> Vec<BenchmarkPoint> {
        self.aggregation_service
            .portfolio_return_by_date(&self.records, self.settings.date_ordering)
    }

    // ── Views ───────────────────────────────────────────────────────

    /// Profit history, optionally filtered to one instrument code.
    #[must_use]
    pub fn history(&self, stock: Option<&str>) -> HistoryView {
        self.history_service.history(&self.records, stock)
    }

    /// KPI, allocation and latest profits for the most recent date.
    #[must_use]
    pub fn dashboard_summary(&self) -> DashboardSummary {
        self.dashboard_service
            .summarize(&self.records, self.settings.date_ordering)
    }

    /// Currency exposure for the most recent date.
    #[must_use]
    pub fn currency_exposure(&self) -> Vec<ExposureItem> {
        self.exposure_service.exposure(
            &self.records,
            &self.settings.exposure_currencies,
            self.settings.date_ordering,
        )
    }

    // ── Settings ────────────────────────────────────────────────────

    /// Get current settings.
    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.settings
    }

    /// Choose how date labels are ordered in every view.
    pub fn set_date_ordering(&mut self, ordering: DateOrdering) {
        self.settings.date_ordering = ordering;
    }

    /// Set the currencies included in the exposure view.
    /// Each code must be exactly 3 ASCII letters; the list must not be empty.
    pub fn set_exposure_currencies(&mut self, currencies: Vec<String>) -> Result<(), CoreError> {
        self.settings.exposure_currencies = normalize_currencies(&currencies)?;
        Ok(())
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Export the records as pretty JSON.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.records)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize records: {e}")))
    }
}
