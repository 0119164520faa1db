//! Per-day rentability aggregate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Realized rentability and decision count for one calendar day.
///
/// Rows arrive pre-aggregated and ascending by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentabilityRow {
    pub date: NaiveDate,
    pub rentability_sum: f64,
    pub decision_count: u64,
}
