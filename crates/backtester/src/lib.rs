// In crates/backtester/src/lib.rs

pub mod error;
pub mod logger;

use core_types::Signal;
use tracing::debug;

pub use error::{Result, SimulationError};
pub use logger::{EquityLogger, SimulationFrame};

/// The notional the simulation starts with and redeploys on every position change.
pub const INITIAL_CASH: f64 = 1_000_000.0;

/// Replays a signal column as a lagged position schedule against the closes.
///
/// Every change of position buys (or sells) `initial_cash / close` units at the
/// current close, with no costs and without netting the units already held.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSimulator {
    initial_cash: f64,
}

impl Default for PositionSimulator {
    fn default() -> Self {
        Self { initial_cash: INITIAL_CASH }
    }
}

impl PositionSimulator {
    pub fn new(initial_cash: f64) -> Self {
        Self { initial_cash }
    }

    pub fn initial_cash(&self) -> f64 {
        self.initial_cash
    }

    /// Runs the simulation. `signals` and `closes` must have the same length.
    pub fn run(&self, signals: &[Signal], closes: &[f64]) -> Result<SimulationFrame> {
        if signals.len() != closes.len() {
            return Err(SimulationError::LengthMismatch {
                signals: signals.len(),
                closes: closes.len(),
            });
        }
        if let Some((index, &value)) = closes.iter().enumerate().find(|(_, c)| !(c.is_finite() && **c > 0.0)) {
            return Err(SimulationError::InvalidClose { index, value });
        }

        let mut logger = EquityLogger::with_capacity(closes.len());
        let mut units = 0.0;
        let mut spent = 0.0;
        let mut prev_position: Option<Signal> = None;
        let mut changes = 0usize;

        for (i, &close) in closes.iter().enumerate() {
            let position = i.checked_sub(1).map(|prev| signals[prev]);

            // The difference against an undefined position counts as no change.
            let delta_position = match (position, prev_position) {
                (Some(current), Some(previous)) => f64::from(current.value() - previous.value()),
                _ => 0.0,
            };
            if delta_position != 0.0 {
                changes += 1;
            }

            let prev_units = units;
            units += delta_position * self.initial_cash / close;
            spent += (units - prev_units) * close;

            logger.record_bar(position, units, self.initial_cash - spent, close);
            prev_position = position;
        }

        let frame = logger.finish();
        debug!(bars = frame.len(), position_changes = changes, "Position simulation finished.");
        Ok(frame)
    }
}
