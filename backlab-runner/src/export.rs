//! Artifact export (CSV/JSON) for a finished backtest.

use anyhow::{Context, Result};
use backlab_core::BacktestReport;
use backlab_core::domain::{EquitySnapshot, Side, Trade};
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub fn write_trades_csv(path: &Path, trades: &[Trade]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create trades CSV {}", path.display()))?;

    writeln!(file, "close_date,side,price,size,pnl")?;

    for trade in trades {
        let side = match trade.side {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        };
        writeln!(
            file,
            "{},{},{:.4},{},{:.4}",
            trade.close_date, side, trade.price, trade.size, trade.pnl
        )?;
    }

    Ok(())
}

pub fn write_equity_csv(path: &Path, snapshots: &[EquitySnapshot]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create equity CSV {}", path.display()))?;

    writeln!(file, "date,position_size,cash,equity")?;

    for snap in snapshots {
        writeln!(
            file,
            "{},{},{:.4},{:.4}",
            snap.date, snap.position_size, snap.cash, snap.equity
        )?;
    }

    Ok(())
}

pub fn write_report_json(path: &Path, report: &BacktestReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report JSON {}", path.display()))?;
    Ok(())
}

/// Write the full artifact set for one run under `dir`:
/// `trades.csv`, `equity.csv`, and `report.json`.
pub fn write_artifacts(dir: &Path, report: &BacktestReport) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create artifact directory {}", dir.display()))?;

    write_trades_csv(&dir.join("trades.csv"), &report.trades)?;
    write_equity_csv(&dir.join("equity.csv"), &report.equity_curve)?;
    write_report_json(&dir.join("report.json"), report)?;

    Ok(())
}
