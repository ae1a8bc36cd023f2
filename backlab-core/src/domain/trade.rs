//! Trade — a closed round trip, recorded when a position exits.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The action that closed the trade. Long exits are `Sell`; `Buy` would denote
/// covering a short, which the engine does not currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

/// A closed trade. Emitted exactly once, when the broker clears a position,
/// and immutable afterwards.
///
/// `pnl` includes commission: `size * (exit_price - entry_price) - commission`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub close_date: NaiveDate,
    pub side: Side,
    pub price: f64,
    pub size: u64,
    pub pnl: f64,
}

impl Trade {
    pub fn is_winner(&self) -> bool {
        self.pnl > 0.0
    }
}
