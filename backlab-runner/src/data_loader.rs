//! CSV bar ingestion — the engine's data-access collaborator.
//!
//! Expected format, one instrument per file:
//!
//! ```csv
//! date,open,high,low,close,volume
//! 2024-01-02,100.0,105.0,98.0,103.0,50000
//! ```
//!
//! The loader normalizes what the engine assumes: rows are sorted ascending
//! by date, duplicate dates are rejected, and the `[start, end)` range filter
//! is applied here. An empty filtered range is returned as an empty Vec — the
//! engine turns that into `NoDataForPeriod`.

use anyhow::{bail, Context, Result};
use backlab_core::domain::Bar;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;

/// Half-open date range filter; `None` bounds are unbounded.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

/// Load bars from a CSV file, sorted ascending and filtered to `[start, end)`.
pub fn load_bars_csv(path: &Path, options: LoadOptions) -> Result<Vec<Bar>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open bar CSV {}", path.display()))?;

    let mut bars = Vec::new();
    for (line, row) in reader.deserialize::<CsvRow>().enumerate() {
        let row = row.with_context(|| format!("bad bar row {} in {}", line + 2, path.display()))?;

        if let Some(start) = options.start {
            if row.date < start {
                continue;
            }
        }
        if let Some(end) = options.end {
            if row.date >= end {
                continue;
            }
        }

        let bar = Bar {
            date: row.date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        };
        if !bar.is_sane() {
            bail!(
                "insane OHLCV row for {} in {} (high < low or non-finite field?)",
                bar.date,
                path.display()
            );
        }
        bars.push(bar);
    }

    bars.sort_by_key(|b| b.date);
    for pair in bars.windows(2) {
        if pair[0].date == pair[1].date {
            bail!("duplicate bar date {} in {}", pair[0].date, path.display());
        }
    }

    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "date,open,high,low,close,volume\n\
                       2024-01-04,102.0,106.0,101.0,105.0,1200\n\
                       2024-01-02,100.0,105.0,98.0,103.0,1000\n\
                       2024-01-03,103.0,104.0,100.0,102.0,1100\n";

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn loads_and_sorts_ascending() {
        let file = write_csv(CSV);
        let bars = load_bars_csv(file.path(), LoadOptions::default()).unwrap();
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].date, date(2));
        assert_eq!(bars[2].date, date(4));
        assert_eq!(bars[2].close, 105.0);
    }

    #[test]
    fn range_filter_is_half_open() {
        let file = write_csv(CSV);
        let bars = load_bars_csv(
            file.path(),
            LoadOptions {
                start: Some(date(3)),
                end: Some(date(4)),
            },
        )
        .unwrap();
        // start is inclusive, end is exclusive
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].date, date(3));
    }

    #[test]
    fn empty_range_is_not_an_error() {
        let file = write_csv(CSV);
        let bars = load_bars_csv(
            file.path(),
            LoadOptions {
                start: Some(date(10)),
                end: None,
            },
        )
        .unwrap();
        assert!(bars.is_empty());
    }

    #[test]
    fn duplicate_dates_are_rejected() {
        let file = write_csv(
            "date,open,high,low,close,volume\n\
             2024-01-02,100.0,105.0,98.0,103.0,1000\n\
             2024-01-02,101.0,106.0,99.0,104.0,1000\n",
        );
        assert!(load_bars_csv(file.path(), LoadOptions::default()).is_err());
    }

    #[test]
    fn insane_rows_are_rejected() {
        let file = write_csv(
            "date,open,high,low,close,volume\n\
             2024-01-02,100.0,95.0,98.0,103.0,1000\n",
        );
        assert!(load_bars_csv(file.path(), LoadOptions::default()).is_err());
    }
}
