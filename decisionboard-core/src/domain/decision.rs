//! One row of the decision feed.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single trading decision as recorded by the decision process.
///
/// Only the fields the dashboard reads are kept; the store boundary drops the
/// rest. `timestamp` is `None` when the stored value was null or could not be
/// parsed. Such rows still classify, but every time window excludes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRow {
    pub timestamp: Option<NaiveDateTime>,
    pub index_value: f64,
    pub decision_code: i64,
    pub price: f64,
}

impl DecisionRow {
    /// The trading action encoded by `decision_code`, if it is a known code.
    pub fn signal(&self) -> Option<Signal> {
        Signal::from_code(self.decision_code)
    }
}

/// Trading action carried by a decision code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    Hold,
    Buy,
    Sell,
}

impl Signal {
    /// All signals in chart order.
    pub const ALL: [Signal; 3] = [Signal::Hold, Signal::Buy, Signal::Sell];

    /// Decode a raw decision code: 0 → hold, 1 → buy, -1 → sell.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Signal::Hold),
            1 => Some(Signal::Buy),
            -1 => Some(Signal::Sell),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Signal::Hold => 0,
            Signal::Buy => 1,
            Signal::Sell => -1,
        }
    }

    /// Series name used for traces and labels.
    pub fn name(self) -> &'static str {
        match self {
            Signal::Hold => "Hold",
            Signal::Buy => "Buy",
            Signal::Sell => "Sell",
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_row(code: i64) -> DecisionRow {
        DecisionRow {
            timestamp: NaiveDate::from_ymd_opt(2024, 3, 4)
                .unwrap()
                .and_hms_opt(10, 15, 0),
            index_value: 0.42,
            decision_code: code,
            price: 101.5,
        }
    }

    #[test]
    fn known_codes_decode() {
        assert_eq!(sample_row(0).signal(), Some(Signal::Hold));
        assert_eq!(sample_row(1).signal(), Some(Signal::Buy));
        assert_eq!(sample_row(-1).signal(), Some(Signal::Sell));
    }

    #[test]
    fn unknown_code_has_no_signal() {
        assert_eq!(sample_row(2).signal(), None);
        assert_eq!(sample_row(-7).signal(), None);
    }

    #[test]
    fn code_roundtrips_through_signal() {
        for signal in Signal::ALL {
            assert_eq!(Signal::from_code(signal.code()), Some(signal));
        }
    }

    #[test]
    fn row_serialization_keeps_missing_timestamp() {
        let mut row = sample_row(1);
        row.timestamp = None;
        let json = serde_json::to_string(&row).unwrap();
        let back: DecisionRow = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }
}
