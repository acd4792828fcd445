// In crates/strategies/src/lib.rs

//! The signal engine: rolling averages and the crossover signal derived from them.

pub mod error;
pub mod sma_crossover;

pub use error::{Result, StrategyError};
pub use sma_crossover::{rolling_mean, SignalFrame, SmaCrossover, FAST_WINDOW, SLOW_WINDOW};
