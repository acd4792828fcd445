// In crates/engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Cannot run the pipeline on an empty price series")]
    EmptySeries,

    #[error("Bars must be strictly ascending by date; bar {index} ({date}) breaks the order")]
    Unordered { index: usize, date: chrono::NaiveDate },

    #[error("Signal engine failed: {0}")]
    Strategy(#[from] strategies::StrategyError),

    #[error("Position simulation failed: {0}")]
    Simulation(#[from] backtester::SimulationError),

    #[error("Failed to write the CSV dump: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
