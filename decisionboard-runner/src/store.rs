//! Store boundary: positional result cells to typed rows.
//!
//! The store hands back untyped tuples. This is the only place that knows
//! which position holds which field; everything past it works with named
//! fields on [`DecisionRow`], [`RentabilityRow`] and [`LogRow`].
//!
//! Timestamps are decoded leniently: a null or unparseable decision
//! timestamp becomes `None` and the row is later dropped by the time window.
//! Numeric fields are strict, since the query shape is trusted.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use decisionboard_core::domain::{DecisionRow, LogRow, RentabilityRow};

/// Decision feed field positions (`SELECT *` on the decision table).
pub const DECISION_TIMESTAMP: usize = 4;
pub const DECISION_INDEX_VALUE: usize = 5;
pub const DECISION_CODE: usize = 6;
pub const DECISION_PRICE: usize = 8;
pub const DECISION_MIN_FIELDS: usize = 9;

/// Rentability aggregate field positions.
pub const RENTABILITY_DATE: usize = 0;
pub const RENTABILITY_SUM: usize = 1;
pub const RENTABILITY_COUNT: usize = 2;
pub const RENTABILITY_MIN_FIELDS: usize = 3;

/// Process log aggregate field positions.
pub const LOG_PROCESS_NAME: usize = 0;
pub const LOG_AVERAGE_MINUTES: usize = 1;
pub const LOG_MIN_FIELDS: usize = 2;

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// One cell of a store result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreValue {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl StoreValue {
    /// Interpret a textual cell (CSV export, text protocol).
    ///
    /// Empty cells, `NULL` and `\N` are nulls; integers and floats are
    /// recognized; anything else stays text.
    pub fn from_text(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("null") || raw == "\\N" {
            return StoreValue::Null;
        }
        if let Ok(i) = raw.parse::<i64>() {
            return StoreValue::Int(i);
        }
        if let Ok(f) = raw.parse::<f64>() {
            return StoreValue::Float(f);
        }
        StoreValue::Text(raw.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, StoreValue::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StoreValue::Int(i) => Some(*i as f64),
            StoreValue::Float(f) => Some(*f),
            StoreValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            StoreValue::Int(i) => Some(*i),
            StoreValue::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            StoreValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            StoreValue::DateTime(ts) => Some(*ts),
            StoreValue::Date(d) => d.and_hms_opt(0, 0, 0),
            StoreValue::Text(s) => parse_timestamp(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            StoreValue::Date(d) => Some(*d),
            StoreValue::DateTime(ts) => Some(ts.date()),
            StoreValue::Text(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .ok()
                .or_else(|| parse_timestamp(s).map(|ts| ts.date())),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<String> {
        match self {
            StoreValue::Null => None,
            StoreValue::Int(i) => Some(i.to_string()),
            StoreValue::Float(f) => Some(f.to_string()),
            StoreValue::Text(s) => Some(s.clone()),
            StoreValue::Date(d) => Some(d.to_string()),
            StoreValue::DateTime(ts) => Some(ts.to_string()),
        }
    }
}

impl std::fmt::Display for StoreValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.as_text() {
            Some(text) => f.write_str(&text),
            None => f.write_str("NULL"),
        }
    }
}

/// Parse a store timestamp; `None` if no known format matches.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Errors decoding one result row.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RowError {
    #[error("row has {found} fields, expected at least {expected}")]
    TooFewFields { expected: usize, found: usize },

    #[error("field {position} ({field}) is null")]
    Null { position: usize, field: &'static str },

    #[error("field {position} ({field}) has invalid value '{value}'")]
    Invalid {
        position: usize,
        field: &'static str,
        value: String,
    },
}

fn require_len(cells: &[StoreValue], expected: usize) -> Result<(), RowError> {
    if cells.len() < expected {
        return Err(RowError::TooFewFields {
            expected,
            found: cells.len(),
        });
    }
    Ok(())
}

fn decode<T>(
    cells: &[StoreValue],
    position: usize,
    field: &'static str,
    convert: impl Fn(&StoreValue) -> Option<T>,
) -> Result<T, RowError> {
    let cell = &cells[position];
    if cell.is_null() {
        return Err(RowError::Null { position, field });
    }
    convert(cell).ok_or_else(|| RowError::Invalid {
        position,
        field,
        value: cell.to_string(),
    })
}

/// Decode one decision feed row.
pub fn decode_decision_row(cells: &[StoreValue]) -> Result<DecisionRow, RowError> {
    require_len(cells, DECISION_MIN_FIELDS)?;
    Ok(DecisionRow {
        timestamp: cells[DECISION_TIMESTAMP].as_datetime(),
        index_value: decode(cells, DECISION_INDEX_VALUE, "index_value", StoreValue::as_f64)?,
        decision_code: decode(cells, DECISION_CODE, "decision_code", StoreValue::as_i64)?,
        price: decode(cells, DECISION_PRICE, "price", StoreValue::as_f64)?,
    })
}

/// Decode one rentability aggregate row.
pub fn decode_rentability_row(cells: &[StoreValue]) -> Result<RentabilityRow, RowError> {
    require_len(cells, RENTABILITY_MIN_FIELDS)?;
    Ok(RentabilityRow {
        date: decode(cells, RENTABILITY_DATE, "date", StoreValue::as_date)?,
        rentability_sum: decode(cells, RENTABILITY_SUM, "rentability_sum", StoreValue::as_f64)?,
        decision_count: decode(cells, RENTABILITY_COUNT, "decision_count", |v| {
            v.as_i64().and_then(|n| u64::try_from(n).ok())
        })?,
    })
}

/// Decode one process log aggregate row.
pub fn decode_log_row(cells: &[StoreValue]) -> Result<LogRow, RowError> {
    require_len(cells, LOG_MIN_FIELDS)?;
    Ok(LogRow {
        process_name: decode(cells, LOG_PROCESS_NAME, "process_name", StoreValue::as_text)?,
        average_duration_minutes: decode(
            cells,
            LOG_AVERAGE_MINUTES,
            "average_duration_minutes",
            StoreValue::as_f64,
        )?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(raw: &[&str]) -> Vec<StoreValue> {
        raw.iter().map(|s| StoreValue::from_text(s)).collect()
    }

    fn decision_cells(ts: &str, code: &str) -> Vec<StoreValue> {
        cells(&["7", "PETR4", "x", "y", ts, "0.93", code, "0.1", "31.25"])
    }

    #[test]
    fn from_text_recognizes_cell_types() {
        assert_eq!(StoreValue::from_text(""), StoreValue::Null);
        assert_eq!(StoreValue::from_text("NULL"), StoreValue::Null);
        assert_eq!(StoreValue::from_text("\\N"), StoreValue::Null);
        assert_eq!(StoreValue::from_text("-1"), StoreValue::Int(-1));
        assert_eq!(StoreValue::from_text("2.5"), StoreValue::Float(2.5));
        assert_eq!(StoreValue::from_text("abc"), StoreValue::Text("abc".into()));
    }

    #[test]
    fn decodes_decision_by_position() {
        let row = decode_decision_row(&decision_cells("2024-05-06 10:30:00", "-1")).unwrap();
        assert_eq!(
            row.timestamp,
            NaiveDate::from_ymd_opt(2024, 5, 6)
                .unwrap()
                .and_hms_opt(10, 30, 0)
        );
        assert_eq!(row.index_value, 0.93);
        assert_eq!(row.decision_code, -1);
        assert_eq!(row.price, 31.25);
    }

    #[test]
    fn unparseable_timestamp_becomes_none() {
        let row = decode_decision_row(&decision_cells("yesterday-ish", "0")).unwrap();
        assert_eq!(row.timestamp, None);
        let row = decode_decision_row(&decision_cells("", "0")).unwrap();
        assert_eq!(row.timestamp, None);
    }

    #[test]
    fn accepts_fractional_and_iso_timestamps() {
        assert!(parse_timestamp("2024-05-06 10:30:00.250").is_some());
        assert!(parse_timestamp("2024-05-06T10:30:00").is_some());
        assert!(parse_timestamp("06/05/2024").is_none());
    }

    #[test]
    fn short_row_is_rejected() {
        let err = decode_decision_row(&cells(&["1", "2", "3"])).unwrap_err();
        assert_eq!(
            err,
            RowError::TooFewFields {
                expected: 9,
                found: 3
            }
        );
    }

    #[test]
    fn null_price_is_rejected() {
        let mut row = decision_cells("2024-05-06 10:30:00", "1");
        row[DECISION_PRICE] = StoreValue::Null;
        assert!(matches!(
            decode_decision_row(&row),
            Err(RowError::Null { field: "price", .. })
        ));
    }

    #[test]
    fn unknown_decision_code_still_decodes() {
        let row = decode_decision_row(&decision_cells("2024-05-06 10:30:00", "5")).unwrap();
        assert_eq!(row.decision_code, 5);
        assert_eq!(row.signal(), None);
    }

    #[test]
    fn decodes_rentability_from_date_or_datetime() {
        let row = decode_rentability_row(&cells(&["2024-05-06", "1.75", "4"])).unwrap();
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2024, 5, 6).unwrap());
        assert_eq!(row.rentability_sum, 1.75);
        assert_eq!(row.decision_count, 4);

        let row = decode_rentability_row(&cells(&["2024-05-07 00:00:00", "-0.5", "1"])).unwrap();
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2024, 5, 7).unwrap());
    }

    #[test]
    fn negative_count_is_invalid() {
        let err = decode_rentability_row(&cells(&["2024-05-06", "1.0", "-3"])).unwrap_err();
        assert!(matches!(err, RowError::Invalid { field: "decision_count", .. }));
    }

    #[test]
    fn decodes_log_row() {
        let row = decode_log_row(&cells(&["collector", "3.14159"])).unwrap();
        assert_eq!(row.process_name, "collector");
        assert_eq!(row.formatted_minutes(), "3.14");
    }
}
