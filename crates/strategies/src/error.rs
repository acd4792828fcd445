// In crates/strategies/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum StrategyError {
    #[error("Invalid strategy parameters: {0}")]
    InvalidParameters(String),
}

pub type Result<T> = std::result::Result<T, StrategyError>;
