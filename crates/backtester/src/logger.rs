// In crates/backtester/src/logger.rs

use core_types::Signal;

/// Records the per-bar state of the simulated account.
///
/// All columns grow together; `finish` hands them out as a [`SimulationFrame`].
#[derive(Debug, Default)]
pub struct EquityLogger {
    frame: SimulationFrame,
}

/// The position schedule and account columns, one entry per bar.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimulationFrame {
    /// The previous bar's signal; undefined on the first bar.
    pub position: Vec<Option<Signal>>,
    pub units: Vec<f64>,
    pub holdings: Vec<f64>,
    pub cash: Vec<f64>,
    pub equity: Vec<f64>,
}

impl SimulationFrame {
    pub fn len(&self) -> usize {
        self.equity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equity.is_empty()
    }
}

impl EquityLogger {
    pub fn with_capacity(bars: usize) -> Self {
        Self {
            frame: SimulationFrame {
                position: Vec::with_capacity(bars),
                units: Vec::with_capacity(bars),
                holdings: Vec::with_capacity(bars),
                cash: Vec::with_capacity(bars),
                equity: Vec::with_capacity(bars),
            },
        }
    }

    /// Records one bar. Holdings and equity are derived from the units, cash and close.
    pub fn record_bar(&mut self, position: Option<Signal>, units: f64, cash: f64, close: f64) {
        let holdings = units * close;
        self.frame.position.push(position);
        self.frame.units.push(units);
        self.frame.holdings.push(holdings);
        self.frame.cash.push(cash);
        self.frame.equity.push(holdings + cash);
    }

    pub fn finish(self) -> SimulationFrame {
        self.frame
    }
}
