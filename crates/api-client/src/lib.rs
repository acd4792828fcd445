// In crates/api-client/src/lib.rs

use std::sync::Arc;

use app_config::{MarketDataSettings, Provider};
use async_trait::async_trait;
use core_types::{Bar, Symbol};

pub mod csv_source;
pub mod error;
pub mod types;
pub mod yahoo;

// Re-export public types
pub use csv_source::CsvFileSource;
pub use error::{Result, SourceError};
pub use types::RawBar;
pub use yahoo::YahooClient;

/// A supplier of an ascending daily OHLCV series for one fixed symbol.
///
/// Implementations are interchangeable as long as they honour that shape.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// The symbol this source serves.
    fn symbol(&self) -> &Symbol;

    /// Fetches the full default window of daily bars, oldest first.
    async fn fetch_daily_bars(&self) -> Result<Vec<Bar>>;
}

/// Constructs the configured price source.
pub fn new(settings: &MarketDataSettings) -> Result<Arc<dyn PriceSource>> {
    let symbol = Symbol(settings.symbol.clone());
    let source: Arc<dyn PriceSource> = match settings.provider {
        Provider::Yahoo => Arc::new(YahooClient::new(&settings.base_url, symbol, &settings.range)?),
        Provider::Csv => {
            let path = settings.csv_path.as_deref().ok_or_else(|| SourceError::ClientBuildError(
                "csv provider selected without a csv_path".into(),
            ))?;
            Arc::new(CsvFileSource::new(path, symbol))
        }
    };
    Ok(source)
}

/// Resolves gaps in raw rows and enforces ascending, unique dates.
///
/// - rows with no values at all (non-trading days) are dropped;
/// - rows without a close are dropped with a warning;
/// - a missing open, high or low takes the row's close;
/// - a missing volume is 0;
/// - rows that still fail `Bar` validation (e.g. a non-positive close) are dropped with a warning.
///
/// When two rows share a date the later one wins.
pub fn sanitize(symbol: &Symbol, raw: Vec<RawBar>) -> Result<Vec<Bar>> {
    let mut bars = Vec::with_capacity(raw.len());
    let mut dropped = 0usize;

    for row in raw {
        if row.is_blank() {
            continue;
        }
        let Some(close) = row.close else {
            tracing::warn!(symbol = %symbol, date = %row.date, "Dropping bar without a close price.");
            dropped += 1;
            continue;
        };
        match Bar::new(
            row.date,
            row.open.unwrap_or(close),
            row.high.unwrap_or(close),
            row.low.unwrap_or(close),
            close,
            row.volume.unwrap_or(0),
        ) {
            Ok(bar) => bars.push(bar),
            Err(e) => {
                tracing::warn!(symbol = %symbol, error = %e, "Dropping invalid bar.");
                dropped += 1;
            }
        }
    }

    // Stable sort keeps source order among equal dates, so the last duplicate is kept.
    bars.sort_by_key(|b| b.date);
    bars.reverse();
    bars.dedup_by_key(|b| b.date);
    bars.reverse();

    if bars.is_empty() {
        return Err(SourceError::EmptySeries { symbol: symbol.0.clone() });
    }
    if dropped > 0 {
        tracing::warn!(symbol = %symbol, dropped, "Some upstream rows were unusable.");
    }
    Ok(bars)
}
