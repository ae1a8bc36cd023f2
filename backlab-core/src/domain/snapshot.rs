//! EquitySnapshot — daily position/cash/equity record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the daily equity ledger. The runner appends exactly one per bar,
/// in bar order, whether or not anything traded that day.
///
/// Invariant: `equity == cash + position_size * close_of_day`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquitySnapshot {
    pub date: NaiveDate,
    pub position_size: u64,
    pub cash: f64,
    pub equity: f64,
}
