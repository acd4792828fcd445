// In crates/backtester/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SimulationError {
    #[error("Column length mismatch: {signals} signals for {closes} closes")]
    LengthMismatch { signals: usize, closes: usize },

    #[error("Close at bar {index} must be positive and finite, got {value}")]
    InvalidClose { index: usize, value: f64 },
}

pub type Result<T> = std::result::Result<T, SimulationError>;
