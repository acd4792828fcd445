// In crates/engine/src/presentation.rs

use core_types::Signal;
use serde::Serialize;

use crate::metadata::{chart_metadata, ChartMetadata};
use crate::pipeline::{AugmentedRow, AugmentedSeries};

/// One record of the `data` array served to the chart.
///
/// Undefined averages are sent as 0; prices are always defined by construction of `Bar`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PresentedRow {
    pub time: i64,
    #[serde(rename = "Open")]
    pub open: f64,
    #[serde(rename = "High")]
    pub high: f64,
    #[serde(rename = "Low")]
    pub low: f64,
    #[serde(rename = "Close")]
    pub close: f64,
    #[serde(rename = "Volume")]
    pub volume: u64,
    #[serde(rename = "SMA20")]
    pub sma20: f64,
    #[serde(rename = "SMA50")]
    pub sma50: f64,
    #[serde(rename = "Signal")]
    pub signal: Signal,
    #[serde(rename = "Holdings")]
    pub holdings: f64,
    #[serde(rename = "Cash")]
    pub cash: f64,
    #[serde(rename = "Equity")]
    pub equity: f64,
}

impl From<AugmentedRow<'_>> for PresentedRow {
    fn from(row: AugmentedRow<'_>) -> Self {
        PresentedRow {
            time: row.bar.epoch_seconds(),
            open: row.bar.open,
            high: row.bar.high,
            low: row.bar.low,
            close: row.bar.close,
            volume: row.bar.volume,
            sma20: row.sma_fast.unwrap_or(0.0),
            sma50: row.sma_slow.unwrap_or(0.0),
            signal: row.signal,
            holdings: row.holdings,
            cash: row.cash,
            equity: row.equity,
        }
    }
}

/// The `/data` response body: `{"data": [...], "metadata": {...}}`.
#[derive(Debug, Clone, Serialize)]
pub struct ChartPayload {
    pub data: Vec<PresentedRow>,
    pub metadata: &'static ChartMetadata,
}

/// Shapes an augmented series into the chart payload, oldest bar first.
pub fn present(series: &AugmentedSeries) -> ChartPayload {
    ChartPayload {
        data: series.rows().map(PresentedRow::from).collect(),
        metadata: chart_metadata(),
    }
}
