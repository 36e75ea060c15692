use std::collections::{BTreeMap, HashMap};

use crate::models::data_point::FinancialDataPoint;
use crate::models::pivot::{NameCollision, PivotRow, PivotTable, RenamedSeries};
use crate::models::report_date::DateOrdering;
use crate::models::value_field::ValueField;

/// A cell candidate: input position of the record and the selected value.
type Cell = (usize, f64);

/// Reshapes flat per-date, per-instrument records into chart-ready pivots.
///
/// Values are keyed by instrument code while the table is built and only
/// projected to display names when rows are emitted. The series list has one
/// entry per code, so two codes sharing a display name both show up there;
/// in the rows the record that came later in the input wins the shared cell,
/// and the clash is reported in [`PivotTable::collisions`]. A display name
/// equal to [`PivotRow::DATE_KEY`] is emitted as `"date (<code>)"` so the
/// flattened row stays readable, and listed in [`PivotTable::renamed`].
pub struct PivotService;

impl PivotService {
    pub fn new() -> Self {
        Self
    }

    /// Pivot `records` into `{ date, <name>: value }` rows, dates in lexical order.
    ///
    /// `select_value` picks the plotted number from each record. Never fails;
    /// empty input gives an empty table.
    pub fn build_pivot<F>(&self, records: &[FinancialDataPoint], select_value: F) -> PivotTable
    where
        F: Fn(&FinancialDataPoint) -> f64,
    {
        self.build_pivot_ordered(records, DateOrdering::Lexical, select_value)
    }

    /// Same as [`build_pivot`](Self::build_pivot) with an explicit date ordering.
    pub fn build_pivot_ordered<F>(
        &self,
        records: &[FinancialDataPoint],
        ordering: DateOrdering,
        select_value: F,
    ) -> PivotTable
    where
        F: Fn(&FinancialDataPoint) -> f64,
    {
        // code → name, in first-appearance order of the code; the name is the last seen
        let mut instruments: Vec<(&str, &str)> = Vec::new();
        let mut code_index: HashMap<&str, usize> = HashMap::new();

        // date → instrument index → latest cell
        let mut cells_by_date: HashMap<&str, BTreeMap<usize, Cell>> = HashMap::new();

        for (seq, record) in records.iter().enumerate() {
            let idx = match code_index.get(record.code.as_str()) {
                Some(&idx) => {
                    instruments[idx].1 = record.name.as_str();
                    idx
                }
                None => {
                    instruments.push((record.code.as_str(), record.name.as_str()));
                    code_index.insert(record.code.as_str(), instruments.len() - 1);
                    instruments.len() - 1
                }
            };

            cells_by_date
                .entry(record.date.as_str())
                .or_default()
                .insert(idx, (seq, select_value(record)));
        }

        let (series, renamed) = Self::series_keys(&instruments);

        let mut dates: Vec<&str> = cells_by_date.keys().copied().collect();
        ordering.sort(&mut dates);

        let mut collided_dates: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        let mut rows = Vec::with_capacity(dates.len());

        for date in dates {
            let Some(cells) = cells_by_date.get(date) else {
                continue;
            };

            let mut projected: BTreeMap<&str, Cell> = BTreeMap::new();
            for (&idx, &(seq, value)) in cells {
                let name = series[idx].1.as_str();
                match projected.get_mut(name) {
                    None => {
                        projected.insert(name, (seq, value));
                    }
                    Some(existing) => {
                        let seen = collided_dates.entry(name).or_default();
                        if seen.last().map(String::as_str) != Some(date) {
                            seen.push(date.to_string());
                        }
                        if seq > existing.0 {
                            *existing = (seq, value);
                        }
                    }
                }
            }

            rows.push(PivotRow {
                date: date.to_string(),
                values: projected
                    .into_iter()
                    .map(|(name, (_, value))| (name.to_string(), value))
                    .collect(),
            });
        }

        let keyed: Vec<(&str, &str)> = series
            .iter()
            .map(|(code, key)| (*code, key.as_str()))
            .collect();
        let names: Vec<String> = keyed.iter().map(|(_, key)| key.to_string()).collect();
        let collisions = Self::find_collisions(&keyed, collided_dates);

        for entry in &renamed {
            tracing::warn!(
                code = %entry.code,
                key = %entry.key,
                "instrument display name is the reserved row key; series renamed"
            );
        }

        for collision in &collisions {
            tracing::warn!(
                name = %collision.name,
                codes = ?collision.codes,
                dates = collision.dates.len(),
                "instrument codes share a display name; later records win shared cells"
            );
        }

        tracing::debug!(
            records = records.len(),
            dates = rows.len(),
            instruments = names.len(),
            "built pivot table"
        );

        PivotTable {
            rows,
            names,
            collisions,
            renamed,
        }
    }

    /// Pivot a named numeric field of the records.
    pub fn build_pivot_field(
        &self,
        records: &[FinancialDataPoint],
        ordering: DateOrdering,
        field: ValueField,
    ) -> PivotTable {
        self.build_pivot_ordered(records, ordering, |p| field.select(p))
    }

    /// Valuation per instrument per date, for the stacked allocation trend.
    pub fn allocation_trend(
        &self,
        records: &[FinancialDataPoint],
        ordering: DateOrdering,
    ) -> PivotTable {
        self.build_pivot_field(records, ordering, ValueField::Value)
    }

    /// Profit rate per instrument per date, for the cross-instrument comparison.
    pub fn profit_rate_comparison(
        &self,
        records: &[FinancialDataPoint],
        ordering: DateOrdering,
    ) -> PivotTable {
        self.build_pivot_field(records, ordering, ValueField::ProfitRate)
    }

    /// Row key per instrument, moving names off the reserved date key.
    fn series_keys<'a>(
        instruments: &[(&'a str, &'a str)],
    ) -> (Vec<(&'a str, String)>, Vec<RenamedSeries>) {
        let mut renamed = Vec::new();
        let series = instruments
            .iter()
            .map(|&(code, name)| {
                if name != PivotRow::DATE_KEY {
                    return (code, name.to_string());
                }
                let key = format!("{name} ({code})");
                renamed.push(RenamedSeries {
                    code: code.to_string(),
                    name: name.to_string(),
                    key: key.clone(),
                });
                (code, key)
            })
            .collect();
        (series, renamed)
    }

    fn find_collisions(
        instruments: &[(&str, &str)],
        mut collided_dates: BTreeMap<&str, Vec<String>>,
    ) -> Vec<NameCollision> {
        let mut codes_by_name: Vec<(&str, Vec<String>)> = Vec::new();
        for (code, name) in instruments {
            match codes_by_name.iter_mut().find(|(n, _)| n == name) {
                Some((_, codes)) => codes.push(code.to_string()),
                None => codes_by_name.push((*name, vec![code.to_string()])),
            }
        }

        codes_by_name
            .into_iter()
            .filter(|(_, codes)| codes.len() > 1)
            .map(|(name, codes)| NameCollision {
                name: name.to_string(),
                codes,
                dates: collided_dates.remove(name).unwrap_or_default(),
            })
            .collect()
    }
}

impl Default for PivotService {
    fn default() -> Self {
        Self::new()
    }
}
