// In crates/api-client/src/yahoo.rs

use async_trait::async_trait;
use core_types::{Bar, Symbol};

use crate::error::{Result, SourceError};
use crate::types::{ChartResponse, RawBar};
use crate::{sanitize, PriceSource};

// Yahoo rejects requests without a browser-like user agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";

/// Fetches daily bars from Yahoo's v8 chart API.
#[derive(Debug, Clone)]
pub struct YahooClient {
    /// The persistent HTTP client.
    http_client: reqwest::Client,
    /// The base URL for the chart API (e.g. `https://query2.finance.yahoo.com`).
    base_url: String,
    symbol: Symbol,
    /// The history window, e.g. "1y" or "max".
    range: String,
}

impl YahooClient {
    pub fn new(base_url: &str, symbol: Symbol, range: &str) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SourceError::ClientBuildError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            symbol,
            range: range.to_string(),
        })
    }

    /// Builds the chart URL for the configured symbol and range.
    pub fn chart_url(&self) -> String {
        format!(
            "{}/v8/finance/chart/{}?range={}&interval=1d",
            self.base_url, self.symbol.0, self.range
        )
    }
}

#[async_trait]
impl PriceSource for YahooClient {
    fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    async fn fetch_daily_bars(&self) -> Result<Vec<Bar>> {
        let url = self.chart_url();
        tracing::info!(symbol = %self.symbol, range = %self.range, "Fetching daily bars from Yahoo.");

        let response = self.http_client.get(&url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        // Yahoo wraps failures in the same envelope, so try to decode the body first.
        let parsed = serde_json::from_str::<ChartResponse>(&text);
        let chart = match (status.is_success(), parsed) {
            (_, Ok(chart)) => chart,
            (true, Err(e)) => return Err(SourceError::DeserializationFailed(e)),
            (false, Err(_)) => {
                return Err(SourceError::Upstream {
                    code: status.as_u16().to_string(),
                    description: text.chars().take(200).collect(),
                });
            }
        };

        let raw = parse_chart(&self.symbol, chart)?;
        let bars = sanitize(&self.symbol, raw)?;
        tracing::info!(symbol = %self.symbol, bars = bars.len(), "Received daily bars.");
        Ok(bars)
    }
}

/// Turns the column-oriented chart payload into one `RawBar` per timestamp.
pub fn parse_chart(symbol: &Symbol, response: ChartResponse) -> Result<Vec<RawBar>> {
    if let Some(err) = response.chart.error {
        return Err(SourceError::Upstream { code: err.code, description: err.description });
    }

    let data = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| SourceError::EmptySeries { symbol: symbol.0.clone() })?;

    // A symbol with no trading history comes back without timestamps.
    let timestamps = data.timestamp.unwrap_or_default();
    let quote = data.indicators.quote.into_iter().next();

    // Daily bars are dated in the exchange's local time, not UTC.
    let offset = data.meta.gmtoffset;

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let date = chrono::DateTime::from_timestamp(ts + offset, 0)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| SourceError::MalformedRow {
                line: i as u64,
                reason: format!("invalid timestamp {}", ts),
            })?;

        let cell = |column: &Vec<Option<f64>>| column.get(i).copied().flatten();
        bars.push(match &quote {
            Some(q) => RawBar {
                date,
                open: cell(&q.open),
                high: cell(&q.high),
                low: cell(&q.low),
                close: cell(&q.close),
                volume: q.volume.get(i).copied().flatten(),
            },
            None => RawBar { date, ..RawBar::default() },
        });
    }

    Ok(bars)
}
