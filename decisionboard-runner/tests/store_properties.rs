//! Property tests for store decoding.
//!
//! Uses proptest to verify:
//! 1. Cell parsing: integers and timestamps survive the text form
//! 2. Row decoding: arbitrary cells never panic; short rows are rejected

use chrono::{Duration, NaiveDate, NaiveDateTime};
use decisionboard_runner::store::{
    decode_decision_row, parse_timestamp, RowError, StoreValue, DECISION_MIN_FIELDS,
};
use proptest::prelude::*;

fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_timestamp() -> impl Strategy<Value = NaiveDateTime> {
    (0..(5 * 365 * 24 * 3600_i64)).prop_map(|secs| epoch() + Duration::seconds(secs))
}

fn arb_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("NULL".to_string()),
        any::<i64>().prop_map(|i| i.to_string()),
        (-1e6..1e6_f64).prop_map(|f| f.to_string()),
        "[a-zA-Z ]{0,12}",
        arb_timestamp().prop_map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string()),
    ]
}

// ── 1. Cell parsing ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn integers_parse_as_int(i in any::<i64>()) {
        prop_assert_eq!(StoreValue::from_text(&i.to_string()), StoreValue::Int(i));
    }

    #[test]
    fn timestamps_roundtrip_through_text(ts in arb_timestamp()) {
        let text = ts.format("%Y-%m-%d %H:%M:%S").to_string();
        prop_assert_eq!(parse_timestamp(&text), Some(ts));
        prop_assert_eq!(StoreValue::from_text(&text).as_datetime(), Some(ts));
    }
}

// ── 2. Row decoding ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn decoding_arbitrary_cells_never_panics(cells in prop::collection::vec(arb_cell(), 0..12)) {
        let values: Vec<StoreValue> = cells.iter().map(|c| StoreValue::from_text(c)).collect();
        let _ = decode_decision_row(&values);
    }

    #[test]
    fn short_rows_are_rejected(cells in prop::collection::vec(arb_cell(), 0..DECISION_MIN_FIELDS)) {
        let values: Vec<StoreValue> = cells.iter().map(|c| StoreValue::from_text(c)).collect();
        let is_too_short = matches!(
            decode_decision_row(&values),
            Err(RowError::TooFewFields { .. })
        );
        prop_assert!(is_too_short);
    }
}
