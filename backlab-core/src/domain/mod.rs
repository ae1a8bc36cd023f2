//! Domain types — bars, positions, trades, equity snapshots.
//!
//! Everything in this module is a plain record: produced once, serializable,
//! and immutable after the run that created it returns.

pub mod bar;
pub mod position;
pub mod snapshot;
pub mod trade;

pub use bar::Bar;
pub use position::Position;
pub use snapshot::EquitySnapshot;
pub use trade::{Side, Trade};
