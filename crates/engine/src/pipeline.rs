// In crates/engine/src/pipeline.rs

use backtester::{PositionSimulator, SimulationFrame};
use core_types::{Bar, Signal};
use strategies::{SignalFrame, SmaCrossover};
use tracing::info;

use crate::error::{EngineError, Result};

/// A price series together with every derived column.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedSeries {
    pub bars: Vec<Bar>,
    pub signals: SignalFrame,
    pub simulation: SimulationFrame,
}

/// A borrowed view of one bar of an [`AugmentedSeries`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AugmentedRow<'a> {
    pub bar: &'a Bar,
    pub sma_fast: Option<f64>,
    pub sma_slow: Option<f64>,
    pub signal: Signal,
    pub position: Option<Signal>,
    pub units: f64,
    pub holdings: f64,
    pub cash: f64,
    pub equity: f64,
}

impl AugmentedSeries {
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn row(&self, i: usize) -> Option<AugmentedRow<'_>> {
        let bar = self.bars.get(i)?;
        Some(AugmentedRow {
            bar,
            sma_fast: self.signals.sma_fast[i],
            sma_slow: self.signals.sma_slow[i],
            signal: self.signals.signal[i],
            position: self.simulation.position[i],
            units: self.simulation.units[i],
            holdings: self.simulation.holdings[i],
            cash: self.simulation.cash[i],
            equity: self.simulation.equity[i],
        })
    }

    /// Iterates the rows in ascending date order.
    pub fn rows(&self) -> impl Iterator<Item = AugmentedRow<'_>> + '_ {
        (0..self.len()).filter_map(move |i| self.row(i))
    }
}

/// Signal engine followed by position simulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline {
    strategy: SmaCrossover,
    simulator: PositionSimulator,
}

impl Pipeline {
    pub fn new(strategy: SmaCrossover, simulator: PositionSimulator) -> Self {
        Self { strategy, simulator }
    }

    /// Runs every derived-column stage over `bars`.
    ///
    /// The bars must be non-empty and strictly ascending by date.
    pub fn run(&self, bars: Vec<Bar>) -> Result<AugmentedSeries> {
        if bars.is_empty() {
            return Err(EngineError::EmptySeries);
        }
        if let Some(index) = bars.windows(2).position(|w| w[1].date <= w[0].date) {
            return Err(EngineError::Unordered { index: index + 1, date: bars[index + 1].date });
        }

        let signals = self.strategy.evaluate(&bars)?;
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let simulation = self.simulator.run(&signals.signal, &closes)?;

        info!(
            bars = bars.len(),
            crossovers = signals.crossover_count(),
            final_equity = simulation.equity.last().copied().unwrap_or_default(),
            "Pipeline finished."
        );

        Ok(AugmentedSeries { bars, signals, simulation })
    }
}

/// Runs the fixed 20/50 crossover with the default notional.
pub fn run_pipeline(bars: Vec<Bar>) -> Result<AugmentedSeries> {
    Pipeline::default().run(bars)
}
