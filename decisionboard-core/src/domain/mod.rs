//! Domain types for DecisionBoard

pub mod decision;
pub mod process_log;
pub mod rentability;

pub use decision::{DecisionRow, Signal};
pub use process_log::LogRow;
pub use rentability::RentabilityRow;
