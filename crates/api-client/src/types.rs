// In crates/api-client/src/types.rs

use chrono::NaiveDate;
use serde::Deserialize;

/// A row as delivered by a price source, before gaps are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawBar {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<u64>,
}

impl RawBar {
    pub fn is_blank(&self) -> bool {
        self.open.is_none()
            && self.high.is_none()
            && self.low.is_none()
            && self.close.is_none()
            && self.volume.is_none()
    }
}

// --- Yahoo v8 chart API response ---

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
pub struct ChartEnvelope {
    pub result: Option<Vec<ChartData>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub meta: ChartMeta,
    /// Bar open times in epoch seconds.
    pub timestamp: Option<Vec<i64>>,
    pub indicators: ChartIndicators,
}

#[derive(Debug, Deserialize, Default)]
pub struct ChartMeta {
    /// Seconds east of UTC for the exchange the symbol trades on.
    #[serde(default)]
    pub gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
pub struct ChartIndicators {
    pub quote: Vec<ChartQuote>,
}

/// Column-oriented OHLCV values. Yahoo sends `null` for missing cells.
#[derive(Debug, Deserialize)]
pub struct ChartQuote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

// --- Local CSV file ---

/// One line of a `Date,Open,High,Low,Close,Volume` file.
#[derive(Debug, Deserialize)]
pub struct CsvRow {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Open")]
    pub open: Option<f64>,
    #[serde(rename = "High")]
    pub high: Option<f64>,
    #[serde(rename = "Low")]
    pub low: Option<f64>,
    #[serde(rename = "Close")]
    pub close: Option<f64>,
    // Volume is often written as a float by spreadsheet tools.
    #[serde(rename = "Volume")]
    pub volume: Option<f64>,
}

impl From<CsvRow> for RawBar {
    fn from(row: CsvRow) -> Self {
        RawBar {
            date: row.date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume.filter(|v| v.is_finite() && *v >= 0.0).map(|v| v.round() as u64),
        }
    }
}
