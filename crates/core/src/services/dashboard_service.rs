use crate::models::dashboard::{AllocationItem, DashboardSummary, KpiSummary, LatestProfitItem};
use crate::models::data_point::FinancialDataPoint;
use crate::models::report_date::DateOrdering;
use crate::services::{percent_of, round_to};

/// Computes the dashboard landing view: KPIs, allocation and latest profits.
///
/// Only the records of the latest reporting date are considered.
pub struct DashboardService;

impl DashboardService {
    pub fn new() -> Self {
        Self
    }

    /// Summarize the latest reporting date.
    ///
    /// - KPI totals of value, profit, and the profit rate against total cost
    /// - Allocation percentages of the total value, largest first
    /// - Per-instrument profits, largest first
    pub fn summarize(
        &self,
        records: &[FinancialDataPoint],
        ordering: DateOrdering,
    ) -> DashboardSummary {
        let Some(base_date) = ordering.latest(records.iter().map(|r| r.date.as_str())) else {
            return DashboardSummary::default();
        };

        let latest: Vec<&FinancialDataPoint> =
            records.iter().filter(|r| r.date == base_date).collect();

        let total_value: f64 = latest.iter().map(|r| r.value).sum();
        let total_profit: f64 = latest.iter().map(|r| r.profit).sum();
        let total_cost: f64 = latest.iter().map(|r| r.cost).sum();

        let mut allocation: Vec<AllocationItem> = latest
            .iter()
            .map(|r| AllocationItem {
                name: r.name.clone(),
                value: r.value,
                percentage: round_to(percent_of(r.value, total_value), 2),
            })
            .collect();
        allocation.sort_by(|a, b| {
            b.value
                .partial_cmp(&a.value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut latest_profits: Vec<LatestProfitItem> = latest
            .iter()
            .map(|r| LatestProfitItem {
                name: r.name.clone(),
                profit: r.profit,
                profit_rate: r.profit_rate,
            })
            .collect();
        latest_profits.sort_by(|a, b| {
            b.profit
                .partial_cmp(&a.profit)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        tracing::debug!(
            base_date,
            instruments = latest.len(),
            "summarized latest reporting date"
        );

        DashboardSummary {
            kpi: KpiSummary {
                total_value,
                total_profit,
                profit_rate: round_to(percent_of(total_profit, total_cost), 2),
                base_date: base_date.to_string(),
            },
            allocation,
            latest_profits,
        }
    }
}

impl Default for DashboardService {
    fn default() -> Self {
        Self::new()
    }
}
