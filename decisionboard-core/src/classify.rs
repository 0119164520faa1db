//! Record classifier: splits decision rows into hold/buy/sell price series.
//!
//! Each input row yields exactly one output row, in input order. The row's
//! price lands in the column named by its decision code and the other two
//! columns stay empty. Rows with an unknown code keep their timestamp and
//! price but carry no signal at all.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{DecisionRow, Signal};
use crate::window::Timestamped;

/// One row of the classified table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRow {
    pub timestamp: Option<NaiveDateTime>,
    pub hold: Option<f64>,
    pub buy: Option<f64>,
    pub sell: Option<f64>,
    pub price: f64,
}

impl ClassifiedRow {
    /// Value of one signal column.
    pub fn value(&self, signal: Signal) -> Option<f64> {
        match signal {
            Signal::Hold => self.hold,
            Signal::Buy => self.buy,
            Signal::Sell => self.sell,
        }
    }

    /// The signal column holding this row's price, if any.
    pub fn signal(&self) -> Option<Signal> {
        Signal::ALL
            .into_iter()
            .find(|&signal| self.value(signal).is_some())
    }
}

impl Timestamped for ClassifiedRow {
    fn timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp
    }
}

/// Ordered classified table.
pub type ClassifiedSeries = Vec<ClassifiedRow>;

/// Classify a single decision row.
pub fn classify_row(row: &DecisionRow) -> ClassifiedRow {
    let signal = row.signal();
    let pick = |wanted: Signal| (signal == Some(wanted)).then_some(row.price);

    ClassifiedRow {
        timestamp: row.timestamp,
        hold: pick(Signal::Hold),
        buy: pick(Signal::Buy),
        sell: pick(Signal::Sell),
        price: row.price,
    }
}

/// Classify a feed, preserving row order.
pub fn classify(rows: &[DecisionRow]) -> ClassifiedSeries {
    rows.iter().map(classify_row).collect()
}

/// Extract one signal column in row order.
pub fn column(series: &[ClassifiedRow], signal: Signal) -> Vec<Option<f64>> {
    series.iter().map(|row| row.value(signal)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(hour: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2024, 5, 10)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
    }

    fn row(hour: u32, code: i64, price: f64) -> DecisionRow {
        DecisionRow {
            timestamp: ts(hour),
            index_value: 0.0,
            decision_code: code,
            price,
        }
    }

    #[test]
    fn hold_buy_sell_are_mutually_exclusive() {
        let series = classify(&[row(12, 0, 10.0), row(11, 1, 11.0), row(10, -1, 9.0)]);

        assert_eq!(column(&series, Signal::Hold), vec![Some(10.0), None, None]);
        assert_eq!(column(&series, Signal::Buy), vec![None, Some(11.0), None]);
        assert_eq!(column(&series, Signal::Sell), vec![None, None, Some(9.0)]);
    }

    #[test]
    fn unknown_code_keeps_price_and_timestamp() {
        let classified = classify_row(&row(9, 3, 42.0));
        assert_eq!(classified.timestamp, ts(9));
        assert_eq!(classified.price, 42.0);
        assert_eq!(classified.hold, None);
        assert_eq!(classified.buy, None);
        assert_eq!(classified.sell, None);
        assert_eq!(classified.signal(), None);
    }

    #[test]
    fn order_is_preserved() {
        let rows = vec![row(3, 0, 1.0), row(1, 0, 2.0), row(2, 0, 3.0)];
        let series = classify(&rows);
        let stamps: Vec<_> = series.iter().map(|r| r.timestamp).collect();
        assert_eq!(stamps, vec![ts(3), ts(1), ts(2)]);
    }

    #[test]
    fn missing_timestamp_passes_through() {
        let mut raw = row(0, 1, 5.0);
        raw.timestamp = None;
        let classified = classify_row(&raw);
        assert_eq!(classified.timestamp, None);
        assert_eq!(classified.buy, Some(5.0));
    }

    #[test]
    fn signal_reports_selected_column() {
        assert_eq!(classify_row(&row(1, -1, 7.5)).signal(), Some(Signal::Sell));
    }
}
