//! Broker simulator — cash, position, and commission accounting.
//!
//! Whole-position market orders executed at the current bar's close; there
//! are no partial fills, no slippage, and no margin. Commission is charged
//! once per round trip, against the closing leg's notional, so a trade's pnl
//! already includes it.

use crate::domain::{Bar, Position, Side, Trade};
use crate::strategy::Action;

/// Run-scoped mutable broker state, exclusively owned by one runner invocation.
#[derive(Debug, Clone)]
pub struct Broker {
    cash: f64,
    position: Option<Position>,
    commission_rate: f64,
}

impl Broker {
    pub fn new(initial_cash: f64, commission_rate: f64) -> Self {
        Self {
            cash: initial_cash,
            position: None,
            commission_rate,
        }
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn position_size(&self) -> u64 {
        self.position.as_ref().map_or(0, |p| p.size)
    }

    /// Mark-to-market valuation at the given close price.
    pub fn equity(&self, close: f64) -> f64 {
        self.cash
            + self
                .position
                .as_ref()
                .map_or(0.0, |p| p.market_value(close))
    }

    /// Execute an action at this bar's close.
    ///
    /// Entries while a position is open, zero-size entries, and exits while
    /// flat are all no-ops — that is the state machine's single-position
    /// invariant, enforced at the accounting boundary as well.
    pub fn execute(&mut self, action: Action, bar: &Bar) -> Option<Trade> {
        match action {
            Action::Hold => None,
            Action::EnterLong(size) => {
                if size == 0 || self.position.is_some() {
                    return None;
                }
                self.cash -= size as f64 * bar.close;
                self.position = Some(Position {
                    size,
                    entry_price: bar.close,
                    entry_date: bar.date,
                });
                None
            }
            Action::Exit => {
                let position = self.position.take()?;
                let notional = position.size as f64 * bar.close;
                let commission = self.commission_rate * notional;
                self.cash += notional - commission;
                Some(Trade {
                    close_date: bar.date,
                    side: Side::Sell,
                    price: bar.close,
                    size: position.size,
                    pnl: position.unrealized_pnl(bar.close) - commission,
                })
            }
        }
    }
}
