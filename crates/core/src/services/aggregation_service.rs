use std::collections::{BTreeMap, HashMap};

use super::{percent_of, round_to};
use crate::models::aggregate::AggregateRow;
use crate::models::benchmark::BenchmarkPoint;
use crate::models::data_point::FinancialDataPoint;
use crate::models::report_date::DateOrdering;
use crate::models::value_field::ValueField;

/// A named value extractor: the output field name and how to read it from a record.
pub struct Selector<'a> {
    name: &'a str,
    select: Box<dyn Fn(&FinancialDataPoint) -> f64 + 'a>,
}

impl<'a> Selector<'a> {
    pub fn new<F>(name: &'a str, select: F) -> Self
    where
        F: Fn(&FinancialDataPoint) -> f64 + 'a,
    {
        Self {
            name,
            select: Box::new(select),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.name
    }
}

impl std::fmt::Debug for Selector<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selector").field("name", &self.name).finish()
    }
}

/// Sums record fields per date across all instruments.
///
/// Feeds the profit area chart (total profit per date) and the stacked
/// stock/FX decomposition chart (both components summed independently).
pub struct AggregationService;

impl AggregationService {
    pub fn new() -> Self {
        Self
    }

    /// Sum every selector per distinct date, rows in ascending date order.
    ///
    /// Each field starts at 0 for each date. When the same field name is given
    /// more than once, the later selector replaces the earlier one.
    /// Non-finite values propagate into the sums unchanged.
    pub fn aggregate_by_date(
        &self,
        records: &[FinancialDataPoint],
        ordering: DateOrdering,
        selectors: &[Selector<'_>],
    ) -> Vec<AggregateRow> {
        let mut fields: Vec<&Selector<'_>> = Vec::with_capacity(selectors.len());
        for selector in selectors {
            match fields.iter_mut().find(|existing| existing.name == selector.name) {
                Some(slot) => *slot = selector,
                None => fields.push(selector),
            }
        }

        let keys: Vec<&str> = fields.iter().map(|s| s.name).collect();
        Self::sum_by_date(records, ordering, &keys, |i, point| (fields[i].select)(point))
    }

    /// Sum named record fields per date; rows are keyed by [`ValueField::key`].
    pub fn aggregate_fields(
        &self,
        records: &[FinancialDataPoint],
        ordering: DateOrdering,
        fields: &[ValueField],
    ) -> Vec<AggregateRow> {
        let mut distinct: Vec<ValueField> = Vec::with_capacity(fields.len());
        for field in fields {
            if !distinct.contains(field) {
                distinct.push(*field);
            }
        }

        let keys: Vec<&str> = distinct.iter().map(|f| f.key()).collect();
        Self::sum_by_date(records, ordering, &keys, |i, point| distinct[i].select(point))
    }

    /// Total profit per date (`profit`).
    pub fn total_profit_by_date(
        &self,
        records: &[FinancialDataPoint],
        ordering: DateOrdering,
    ) -> Vec<AggregateRow> {
        self.aggregate_fields(records, ordering, &[ValueField::Profit])
    }

    /// Stock and FX profit summed separately per date (`stockProfit`, `fxProfit`).
    pub fn profit_decomposition_by_date(
        &self,
        records: &[FinancialDataPoint],
        ordering: DateOrdering,
    ) -> Vec<AggregateRow> {
        self.aggregate_fields(
            records,
            ordering,
            &[ValueField::StockProfit, ValueField::FxProfit],
        )
    }

    /// Cumulative return of the whole portfolio per date, for the benchmark chart.
    ///
    /// Value and cost are summed across instruments; `portfolio` is
    /// `(value − cost) / cost × 100` rounded to 2 places, or 0 when the summed
    /// cost is 0. Index columns are left empty.
    pub fn portfolio_return_by_date(
        &self,
        records: &[FinancialDataPoint],
        ordering: DateOrdering,
    ) -> Vec<BenchmarkPoint> {
        self.aggregate_fields(records, ordering, &[ValueField::Value, ValueField::Cost])
            .into_iter()
            .map(|row| {
                let value = row.get(ValueField::Value.key()).unwrap_or(0.0);
                let cost = row.get(ValueField::Cost.key()).unwrap_or(0.0);
                BenchmarkPoint::new(row.date, round_to(percent_of(value - cost, cost), 2))
            })
            .collect()
    }

    fn sum_by_date<F>(
        records: &[FinancialDataPoint],
        ordering: DateOrdering,
        keys: &[&str],
        select: F,
    ) -> Vec<AggregateRow>
    where
        F: Fn(usize, &FinancialDataPoint) -> f64,
    {
        let mut sums_by_date: HashMap<&str, Vec<f64>> = HashMap::new();

        for record in records {
            let sums = sums_by_date
                .entry(record.date.as_str())
                .or_insert_with(|| vec![0.0; keys.len()]);
            for (i, sum) in sums.iter_mut().enumerate() {
                *sum += select(i, record);
            }
        }

        let mut dates: Vec<&str> = sums_by_date.keys().copied().collect();
        ordering.sort(&mut dates);

        let rows: Vec<AggregateRow> = dates
            .into_iter()
            .filter_map(|date| {
                let sums = sums_by_date.remove(date)?;
                Some(AggregateRow {
                    date: date.to_string(),
                    sums: keys
                        .iter()
                        .map(|key| key.to_string())
                        .zip(sums)
                        .collect::<BTreeMap<_, _>>(),
                })
            })
            .collect();

        tracing::debug!(
            records = records.len(),
            dates = rows.len(),
            fields = keys.len(),
            "aggregated records by date"
        );

        rows
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}
