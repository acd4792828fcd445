// In crates/api-client/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to build the HTTP client: {0}")]
    ClientBuildError(String),
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(#[from] serde_json::Error),
    #[error("Upstream error: {code}: {description}")]
    Upstream { code: String, description: String },
    #[error("No price data returned for {symbol}")]
    EmptySeries { symbol: String },
    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },
    #[error("Failed to read price file: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SourceError>;
