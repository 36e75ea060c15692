// ═══════════════════════════════════════════════════════════════════
// Pivot Tests — PivotService: row order, series names, collisions
// ═══════════════════════════════════════════════════════════════════

use portfolio_dashboard_core::models::data_point::FinancialDataPoint;
use portfolio_dashboard_core::models::pivot::PivotTable;
use portfolio_dashboard_core::models::report_date::DateOrdering;
use portfolio_dashboard_core::models::value_field::ValueField;
use portfolio_dashboard_core::services::pivot_service::PivotService;
use std::collections::HashSet;

fn point(date: &str, code: &str, name: &str, value: f64) -> FinancialDataPoint {
    FinancialDataPoint::new(date, code, name).with_value(value)
}

fn sample() -> Vec<FinancialDataPoint> {
    vec![
        point("2024-01-末", "7974.T", "任天堂", 700_000.0),
        point("2024-01-末", "NVDA", "エヌビディア", 300_000.0),
        point("2024-02-末", "7974.T", "任天堂", 720_000.0),
    ]
}

fn by_value(records: &[FinancialDataPoint]) -> PivotTable {
    PivotService::new().build_pivot(records, |p| p.value)
}

// ── Basic shape ─────────────────────────────────────────────────────

mod shape {
    use super::*;

    #[test]
    fn names_follow_first_appearance_of_code() {
        let table = by_value(&sample());
        assert_eq!(table.names, vec!["任天堂", "エヌビディア"]);
    }

    #[test]
    fn one_row_per_distinct_date() {
        let table = by_value(&sample());
        assert_eq!(table.dates(), vec!["2024-01-末", "2024-02-末"]);
    }

    #[test]
    fn first_row_has_both_instruments() {
        let table = by_value(&sample());
        let row = &table.rows[0];
        assert_eq!(row.get("任天堂"), Some(700_000.0));
        assert_eq!(row.get("エヌビディア"), Some(300_000.0));
        assert_eq!(row.values.len(), 2);
    }

    #[test]
    fn missing_instrument_is_absent_not_zero() {
        let table = by_value(&sample());
        let row = &table.rows[1];
        assert_eq!(row.get("任天堂"), Some(720_000.0));
        assert_eq!(row.get("エヌビディア"), None);
        assert!(!row.values.contains_key("エヌビディア"));
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table = by_value(&[]);
        assert!(table.rows.is_empty());
        assert!(table.names.is_empty());
        assert!(table.collisions.is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn single_record() {
        let table = by_value(&[point("2024-05-末", "AAPL", "アップル", 1.5)]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.names, vec!["アップル"]);
        assert_eq!(table.rows[0].get("アップル"), Some(1.5));
    }

    #[test]
    fn row_lookup_by_date() {
        let table = by_value(&sample());
        assert!(table.row("2024-02-末").is_some());
        assert!(table.row("2024-03-末").is_none());
    }
}

// ── Selectors ───────────────────────────────────────────────────────

mod selectors {
    use super::*;

    #[test]
    fn profit_rate_selector() {
        let records = vec![
            FinancialDataPoint::new("2024-01-末", "NVDA", "エヌビディア").with_profit(45_000.0, 15.5),
        ];
        let table = PivotService::new().build_pivot(&records, |p| p.profit_rate);
        assert_eq!(table.rows[0].get("エヌビディア"), Some(15.5));
    }

    #[test]
    fn field_selector_matches_closure() {
        let records = vec![
            FinancialDataPoint::new("2024-01-末", "A", "a").with_decomposition(10.0, -3.0),
            FinancialDataPoint::new("2024-02-末", "A", "a").with_decomposition(12.0, 4.0),
        ];
        let service = PivotService::new();
        let by_field = service.build_pivot_field(&records, DateOrdering::Lexical, ValueField::FxProfit);
        let by_closure = service.build_pivot(&records, |p| p.fx_profit);
        assert_eq!(by_field, by_closure);
    }

    #[test]
    fn allocation_trend_uses_value() {
        let table = PivotService::new().allocation_trend(&sample(), DateOrdering::Lexical);
        assert_eq!(table.rows[0].get("任天堂"), Some(700_000.0));
    }

    #[test]
    fn profit_rate_comparison_uses_profit_rate() {
        let records = vec![
            FinancialDataPoint::new("2024-01-末", "A", "a").with_value(100.0).with_profit(5.0, 5.0),
        ];
        let table = PivotService::new().profit_rate_comparison(&records, DateOrdering::Lexical);
        assert_eq!(table.rows[0].get("a"), Some(5.0));
    }

    #[test]
    fn non_finite_values_pass_through() {
        let records = vec![
            point("2024-01-末", "A", "a", f64::NAN),
            point("2024-01-末", "B", "b", f64::INFINITY),
        ];
        let table = by_value(&records);
        assert!(table.rows[0].get("a").unwrap().is_nan());
        assert_eq!(table.rows[0].get("b"), Some(f64::INFINITY));
    }
}

// ── Ordering ────────────────────────────────────────────────────────

mod ordering {
    use super::*;

    #[test]
    fn unsorted_dates_come_out_ascending() {
        let records = vec![
            point("2024-03-末", "7974.T", "任天堂", 100.0),
            point("2024-01-末", "7974.T", "任天堂", 200.0),
            point("2024-02-末", "7974.T", "任天堂", 300.0),
        ];
        let table = by_value(&records);
        assert_eq!(table.dates(), vec!["2024-01-末", "2024-02-末", "2024-03-末"]);
        assert_eq!(table.rows[0].get("任天堂"), Some(200.0));
    }

    #[test]
    fn lexical_ordering_compares_strings() {
        // "2024-10" sorts after "2024-09" only because the month is zero padded
        let records = vec![
            point("2024-10-末", "A", "a", 1.0),
            point("2024-9-末", "A", "a", 2.0),
        ];
        let table = by_value(&records);
        assert_eq!(table.dates(), vec!["2024-10-末", "2024-9-末"]);
    }

    #[test]
    fn chronological_ordering_parses_dates() {
        let records = vec![
            point("2024-10-末", "A", "a", 1.0),
            point("2024-9-末", "A", "a", 2.0),
        ];
        let table = PivotService::new().build_pivot_ordered(
            &records,
            DateOrdering::Chronological,
            |p| p.value,
        );
        assert_eq!(table.dates(), vec!["2024-9-末", "2024-10-末"]);
    }

    #[test]
    fn chronological_ordering_mixes_day_and_month_end_labels() {
        let records = vec![
            point("2024-02-末", "A", "a", 1.0),
            point("2024-02-15", "A", "a", 2.0),
            point("2024/01/31", "A", "a", 3.0),
        ];
        let table = PivotService::new().build_pivot_ordered(
            &records,
            DateOrdering::Chronological,
            |p| p.value,
        );
        assert_eq!(table.dates(), vec!["2024/01/31", "2024-02-15", "2024-02-末"]);
    }

    #[test]
    fn chronological_ordering_puts_unparseable_labels_last() {
        let records = vec![
            point("someday", "A", "a", 1.0),
            point("2024-02-末", "A", "a", 2.0),
            point("later", "A", "a", 3.0),
        ];
        let table = PivotService::new().build_pivot_ordered(
            &records,
            DateOrdering::Chronological,
            |p| p.value,
        );
        assert_eq!(table.dates(), vec!["2024-02-末", "later", "someday"]);
    }
}

// ── Duplicates & renames ────────────────────────────────────────────

mod duplicates {
    use super::*;

    #[test]
    fn repeated_date_and_code_last_write_wins() {
        let records = vec![
            point("2024-01-末", "A", "a", 1.0),
            point("2024-01-末", "A", "a", 2.0),
        ];
        let table = by_value(&records);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].get("a"), Some(2.0));
        assert_eq!(table.names, vec!["a"]);
    }

    #[test]
    fn renamed_code_uses_last_seen_name() {
        let records = vec![
            point("2024-01-末", "A", "Old Name", 1.0),
            point("2024-02-末", "B", "b", 5.0),
            point("2024-02-末", "A", "New Name", 2.0),
        ];
        let table = by_value(&records);
        assert_eq!(table.names, vec!["New Name", "b"]);
        assert_eq!(table.rows[0].get("New Name"), Some(1.0));
        assert_eq!(table.rows[0].get("Old Name"), None);
        assert!(table.collisions.is_empty());
    }

    #[test]
    fn all_records_on_one_date() {
        let records = vec![
            point("2024-01-末", "A", "a", 1.0),
            point("2024-01-末", "B", "b", 2.0),
            point("2024-01-末", "C", "c", 3.0),
        ];
        let table = by_value(&records);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].values.len(), 3);
    }
}

// ── Name collisions ─────────────────────────────────────────────────

mod collisions {
    use super::*;

    fn colliding() -> Vec<FinancialDataPoint> {
        vec![
            point("2024-01-末", "2559.T", "全世界株", 100.0),
            point("2024-01-末", "VT", "全世界株", 200.0),
            point("2024-02-末", "2559.T", "全世界株", 110.0),
        ]
    }

    #[test]
    fn both_codes_listed_in_names() {
        let table = by_value(&colliding());
        assert_eq!(table.names, vec!["全世界株", "全世界株"]);
    }

    #[test]
    fn later_record_wins_the_shared_cell() {
        let table = by_value(&colliding());
        assert_eq!(table.rows[0].get("全世界株"), Some(200.0));
        assert_eq!(table.rows[1].get("全世界株"), Some(110.0));
    }

    #[test]
    fn later_record_wins_regardless_of_code_order() {
        let records = vec![
            point("2024-01-末", "2559.T", "全世界株", 100.0),
            point("2024-01-末", "VT", "全世界株", 200.0),
            point("2024-01-末", "2559.T", "全世界株", 150.0),
        ];
        let table = by_value(&records);
        assert_eq!(table.rows[0].get("全世界株"), Some(150.0));
    }

    #[test]
    fn collision_is_reported() {
        let table = by_value(&colliding());
        assert_eq!(table.collisions.len(), 1);
        let collision = &table.collisions[0];
        assert_eq!(collision.name, "全世界株");
        assert_eq!(collision.codes, vec!["2559.T", "VT"]);
        assert_eq!(collision.dates, vec!["2024-01-末"]);
    }

    #[test]
    fn shared_name_on_disjoint_dates_reports_no_dates() {
        let records = vec![
            point("2024-01-末", "2559.T", "全世界株", 100.0),
            point("2024-02-末", "VT", "全世界株", 200.0),
        ];
        let table = by_value(&records);
        assert_eq!(table.collisions.len(), 1);
        assert!(table.collisions[0].dates.is_empty());
    }

    #[test]
    fn collisions_omitted_from_json_when_empty() {
        let json = serde_json::to_string(&by_value(&sample())).unwrap();
        assert!(!json.contains("collisions"));
    }
}

// ── Serialization ───────────────────────────────────────────────────

mod serialization {
    use super::*;

    #[test]
    fn rows_serialize_flat() {
        let table = by_value(&sample());
        let json = serde_json::to_value(&table.rows[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "date": "2024-01-末",
                "任天堂": 700000.0,
                "エヌビディア": 300000.0,
            })
        );
    }

    #[test]
    fn table_json_roundtrip() {
        let table = by_value(&sample());
        let json = serde_json::to_string(&table).unwrap();
        let back: PivotTable = serde_json::from_str(&json).unwrap();
        assert_eq!(table, back);
    }

    #[test]
    fn instrument_named_date_is_renamed() {
        let table = by_value(&[point("2024-01-末", "X", "date", 1.0)]);
        assert_eq!(table.names, vec!["date (X)"]);
        assert_eq!(table.rows[0].date, "2024-01-末");
        assert_eq!(table.rows[0].get("date (X)"), Some(1.0));
        assert_eq!(table.renamed.len(), 1);
        assert_eq!(table.renamed[0].code, "X");
        assert_eq!(table.renamed[0].name, "date");
        assert_eq!(table.renamed[0].key, "date (X)");
    }

    #[test]
    fn instrument_named_date_survives_json_roundtrip() {
        let table = by_value(&[
            point("2024-01-末", "X", "date", 1.0),
            point("2024-01-末", "Y", "date", 2.0),
        ]);
        assert!(table.collisions.is_empty());

        let json = serde_json::to_string(&table).unwrap();
        let back: PivotTable = serde_json::from_str(&json).unwrap();
        assert_eq!(table, back);
        assert_eq!(back.rows[0].get("date (Y)"), Some(2.0));
    }

    #[test]
    fn renamed_omitted_from_json_when_empty() {
        let json = serde_json::to_string(&by_value(&sample())).unwrap();
        assert!(!json.contains("renamed"));
    }
}

// ── Properties ──────────────────────────────────────────────────────

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn arb_record() -> impl Strategy<Value = FinancialDataPoint> {
        (1u32..=12, 0usize..5, -1.0e6f64..1.0e6).prop_map(|(month, instrument, value)| {
            let date = format!("2024-{month:02}-末");
            let code = format!("CODE{instrument}");
            let name = format!("Name{}", instrument % 4);
            point(&date, &code, &name, value)
        })
    }

    proptest! {
        #[test]
        fn prop_row_count_equals_distinct_dates(records in prop::collection::vec(arb_record(), 0..40)) {
            let table = by_value(&records);
            let dates: HashSet<&str> = records.iter().map(|r| r.date.as_str()).collect();
            prop_assert_eq!(table.rows.len(), dates.len());
        }

        #[test]
        fn prop_rows_are_sorted(records in prop::collection::vec(arb_record(), 0..40)) {
            let table = by_value(&records);
            for pair in table.rows.windows(2) {
                prop_assert!(pair[0].date < pair[1].date);
            }
        }

        #[test]
        fn prop_row_keys_come_from_that_date(records in prop::collection::vec(arb_record(), 0..40)) {
            let table = by_value(&records);
            for row in &table.rows {
                for key in row.values.keys() {
                    let present = records.iter().any(|r| r.date == row.date && &r.name == key);
                    prop_assert!(present, "{} has no record on {}", key, row.date);
                }
            }
        }

        #[test]
        fn prop_one_name_per_distinct_code(records in prop::collection::vec(arb_record(), 0..40)) {
            let table = by_value(&records);
            let codes: HashSet<&str> = records.iter().map(|r| r.code.as_str()).collect();
            prop_assert_eq!(table.names.len(), codes.len());
        }

        #[test]
        fn prop_idempotent(records in prop::collection::vec(arb_record(), 0..40)) {
            prop_assert_eq!(by_value(&records), by_value(&records));
        }
    }
}
