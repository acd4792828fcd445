// In crates/engine/src/dump.rs

//! Optional CSV dump of the full augmented series, for inspection only.

use std::io;
use std::path::Path;

use core_types::Signal;
use serde::Serialize;

use crate::error::Result;
use crate::pipeline::{AugmentedRow, AugmentedSeries};

#[derive(Debug, Serialize)]
struct DumpRow {
    time: i64,
    #[serde(rename = "Open")]
    open: f64,
    #[serde(rename = "High")]
    high: f64,
    #[serde(rename = "Low")]
    low: f64,
    #[serde(rename = "Close")]
    close: f64,
    #[serde(rename = "Volume")]
    volume: u64,
    #[serde(rename = "SMA20")]
    sma20: f64,
    #[serde(rename = "SMA50")]
    sma50: f64,
    #[serde(rename = "Signal")]
    signal: Signal,
    /// Left empty on the first bar.
    #[serde(rename = "Position")]
    position: Option<Signal>,
    #[serde(rename = "Units")]
    units: f64,
    #[serde(rename = "Holdings")]
    holdings: f64,
    #[serde(rename = "Cash")]
    cash: f64,
    #[serde(rename = "Equity")]
    equity: f64,
}

impl From<AugmentedRow<'_>> for DumpRow {
    fn from(row: AugmentedRow<'_>) -> Self {
        DumpRow {
            time: row.bar.epoch_seconds(),
            open: row.bar.open,
            high: row.bar.high,
            low: row.bar.low,
            close: row.bar.close,
            volume: row.bar.volume,
            sma20: row.sma_fast.unwrap_or(0.0),
            sma50: row.sma_slow.unwrap_or(0.0),
            signal: row.signal,
            position: row.position,
            units: row.units,
            holdings: row.holdings,
            cash: row.cash,
            equity: row.equity,
        }
    }
}

/// Writes the series with a header row to any writer.
pub fn write_to<W: io::Write>(writer: W, series: &AugmentedSeries) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in series.rows() {
        wtr.serialize(DumpRow::from(row))?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes the series to `path`, replacing any existing file.
pub fn write_csv(path: impl AsRef<Path>, series: &AugmentedSeries) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path).map_err(csv::Error::from)?;
    write_to(file, series)?;
    tracing::debug!(path = %path.display(), rows = series.len(), "Wrote CSV dump.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::run_pipeline;
    use chrono::{Days, NaiveDate};
    use core_types::Bar;

    fn series(n: usize) -> AugmentedSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = (0..n)
            .map(|i| {
                let c = 100.0 + i as f64;
                Bar::new(start + Days::new(i as u64), c, c + 1.0, c - 1.0, c, 10).unwrap()
            })
            .collect();
        run_pipeline(bars).unwrap()
    }

    #[test]
    fn writes_header_and_one_line_per_bar() {
        let mut out = Vec::new();
        write_to(&mut out, &series(3)).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "time,Open,High,Low,Close,Volume,SMA20,SMA50,Signal,Position,Units,Holdings,Cash,Equity"
        );
        assert!(lines[1].starts_with("1704067200,100.0,101.0,99.0,100.0,10,0.0,0.0,0,,"));
        assert!(lines[2].contains(",0,0,"));
    }

    #[test]
    fn writes_to_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dump.csv");
        write_csv(&path, &series(5)).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 6);
    }
}
