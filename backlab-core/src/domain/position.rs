//! Position — an open long holding, at most one per run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An open long position. Created on entry, destroyed on exit.
///
/// Short positions are not supported: `size` is a positive share count and
/// the broker rejects a second entry while one position is open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub size: u64,
    pub entry_price: f64,
    pub entry_date: NaiveDate,
}

impl Position {
    pub fn market_value(&self, current_price: f64) -> f64 {
        self.size as f64 * current_price
    }

    pub fn unrealized_pnl(&self, current_price: f64) -> f64 {
        self.size as f64 * (current_price - self.entry_price)
    }
}
