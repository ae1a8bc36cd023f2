//! Backlab Runner — orchestration around the core engine.
//!
//! The engine's external collaborators live here:
//! - `data_loader`: CSV bar ingestion with a half-open date filter
//! - `sweep`: parameter grids run in parallel with rayon
//! - `export`: trades/equity/report artifacts for the persistence layer

pub mod data_loader;
pub mod export;
pub mod sweep;

pub use data_loader::{load_bars_csv, LoadOptions};
pub use export::write_artifacts;
pub use sweep::{rank_by_sharpe, run_sweep, ParamGrid, SweepOutcome};
