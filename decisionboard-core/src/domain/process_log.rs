//! Average execution time per process.

use serde::{Deserialize, Serialize};

/// Average run duration of one pipeline process, in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRow {
    pub process_name: String,
    pub average_duration_minutes: f64,
}

impl LogRow {
    /// Average duration rounded to two decimals, as displayed.
    pub fn rounded_minutes(&self) -> f64 {
        (self.average_duration_minutes * 100.0).round() / 100.0
    }

    /// Average duration formatted with two decimals.
    pub fn formatted_minutes(&self) -> String {
        format!("{:.2}", self.average_duration_minutes)
    }
}
