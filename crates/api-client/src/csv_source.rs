// In crates/api-client/src/csv_source.rs

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use core_types::{Bar, Symbol};

use crate::error::{Result, SourceError};
use crate::types::{CsvRow, RawBar};
use crate::{sanitize, PriceSource};

/// Serves daily bars from a local `Date,Open,High,Low,Close,Volume` file.
///
/// The file is re-read on every fetch.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
    symbol: Symbol,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>, symbol: Symbol) -> Self {
        Self { path: path.into(), symbol }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PriceSource for CsvFileSource {
    fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    async fn fetch_daily_bars(&self) -> Result<Vec<Bar>> {
        tracing::info!(path = %self.path.display(), symbol = %self.symbol, "Reading daily bars from CSV.");
        let bytes = tokio::fs::read(&self.path).await?;
        let raw = parse_csv(&bytes)?;
        sanitize(&self.symbol, raw)
    }
}

/// Parses CSV bytes with a header row into raw bars.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<RawBar>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(bytes);

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, row)| {
            row.map(RawBar::from).map_err(|e| SourceError::MalformedRow {
                // Header is line 1.
                line: e.position().map(|p| p.line()).unwrap_or(idx as u64 + 2),
                reason: e.to_string(),
            })
        })
        .collect()
}
