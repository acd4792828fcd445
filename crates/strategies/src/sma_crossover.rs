// In crates/strategies/src/sma_crossover.rs

use crate::error::{Result, StrategyError};
use core_types::{Bar, Signal};
use ta::indicators::SimpleMovingAverage as Sma;
use ta::Next;

/// The fast SMA window (column `SMA20`).
pub const FAST_WINDOW: usize = 20;
/// The slow SMA window (column `SMA50`).
pub const SLOW_WINDOW: usize = 50;

/// The per-bar output of the signal engine. Every column has one entry per input bar.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignalFrame {
    /// `None` until `fast_window` closes are available.
    pub sma_fast: Vec<Option<f64>>,
    /// `None` until `slow_window` closes are available.
    pub sma_slow: Vec<Option<f64>>,
    pub signal: Vec<Signal>,
}

impl SignalFrame {
    pub fn len(&self) -> usize {
        self.signal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signal.is_empty()
    }

    /// Number of non-flat signals in the frame.
    pub fn crossover_count(&self) -> usize {
        self.signal.iter().filter(|s| !s.is_flat()).count()
    }
}

/// The two-window simple moving-average crossover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmaCrossover {
    fast_window: usize,
    slow_window: usize,
}

impl Default for SmaCrossover {
    fn default() -> Self {
        Self { fast_window: FAST_WINDOW, slow_window: SLOW_WINDOW }
    }
}

impl SmaCrossover {
    /// Creates a new crossover with explicit windows.
    ///
    /// The fast window must be non-zero and strictly shorter than the slow one.
    pub fn new(fast_window: usize, slow_window: usize) -> Result<Self> {
        if fast_window == 0 {
            return Err(StrategyError::InvalidParameters("Fast window must be at least 1".into()));
        }
        if fast_window >= slow_window {
            return Err(StrategyError::InvalidParameters(
                "Fast window must be shorter than the slow window".into(),
            ));
        }
        Ok(Self { fast_window, slow_window })
    }

    pub fn fast_window(&self) -> usize {
        self.fast_window
    }

    pub fn slow_window(&self) -> usize {
        self.slow_window
    }

    /// Computes both moving averages and the crossover signal for every bar.
    pub fn evaluate(&self, bars: &[Bar]) -> Result<SignalFrame> {
        if bars.len() < self.slow_window {
            tracing::warn!(
                bars = bars.len(),
                required = self.slow_window,
                "Not enough history for the slow SMA; every signal will be flat."
            );
        }

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let sma_fast = rolling_mean(&closes, self.fast_window)?;
        let sma_slow = rolling_mean(&closes, self.slow_window)?;

        let mut signal = vec![Signal::Flat; bars.len()];
        for i in 1..bars.len() {
            let (fast, slow) = (sma_fast[i], sma_slow[i]);
            let (prev_fast, prev_slow) = (sma_fast[i - 1], sma_slow[i - 1]);

            let cross_up = gt(fast, slow) && le(prev_fast, prev_slow);
            let cross_down = lt(fast, slow) && ge(prev_fast, prev_slow);

            signal[i] = if cross_up {
                Signal::Long
            } else if cross_down {
                Signal::Short
            } else {
                // No crossover on this bar.
                Signal::Flat
            };
        }

        let frame = SignalFrame { sma_fast, sma_slow, signal };
        tracing::debug!(bars = frame.len(), crossovers = frame.crossover_count(), "Signal frame computed.");
        Ok(frame)
    }
}

/// Trailing arithmetic mean over `window` values.
///
/// Entries before index `window - 1` have no full window and are `None`.
pub fn rolling_mean(values: &[f64], window: usize) -> Result<Vec<Option<f64>>> {
    let mut sma = Sma::new(window)
        .map_err(|_| StrategyError::InvalidParameters(format!("Invalid SMA window: {}", window)))?;

    Ok(values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            // `ta` reports a partial-window mean during warm-up, which we discard.
            let mean = sma.next(value);
            (i + 1 >= window).then_some(mean)
        })
        .collect())
}

// Comparisons against an undefined average are always false.

fn gt(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a > b)
}

fn lt(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a < b)
}

fn le(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a <= b)
}

fn ge(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a >= b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};

    fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(start + Days::new(i as u64), c, c, c, c, 1_000).unwrap())
            .collect()
    }

    #[test]
    fn rejects_inverted_windows() {
        assert!(SmaCrossover::new(50, 20).is_err());
        assert!(SmaCrossover::new(20, 20).is_err());
        assert!(SmaCrossover::new(0, 5).is_err());
        assert!(SmaCrossover::new(3, 5).is_ok());
    }

    #[test]
    fn rolling_mean_is_undefined_during_warm_up() {
        let means = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 3).unwrap();
        assert_eq!(means[0], None);
        assert_eq!(means[1], None);
        assert!((means[2].unwrap() - 2.0).abs() < 1e-12);
        assert!((means[3].unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn undefined_operands_compare_false() {
        assert!(!gt(None, Some(1.0)));
        assert!(!le(Some(1.0), None));
        assert!(!lt(None, None));
        assert!(!ge(None, Some(-1.0)));
        assert!(le(Some(1.0), Some(1.0)));
        assert!(ge(Some(1.0), Some(1.0)));
    }

    #[test]
    fn first_bar_never_signals() {
        let bars = bars_from_closes(&[10.0, 5.0, 20.0]);
        let frame = SmaCrossover::new(1, 2).unwrap().evaluate(&bars).unwrap();
        assert_eq!(frame.signal[0], Signal::Flat);
    }

    #[test]
    fn short_series_is_all_flat() {
        let closes: Vec<f64> = (0..30).map(|i| if i % 2 == 0 { 100.0 } else { 120.0 }).collect();
        let frame = SmaCrossover::default().evaluate(&bars_from_closes(&closes)).unwrap();
        assert_eq!(frame.len(), 30);
        assert!(frame.sma_slow.iter().all(Option::is_none));
        assert_eq!(frame.crossover_count(), 0);
    }

    #[test]
    fn detects_up_and_down_crossings() {
        // fast = 1-bar, slow = 2-bar: the fast line is just the close.
        let bars = bars_from_closes(&[10.0, 8.0, 12.0, 12.0, 6.0]);
        let frame = SmaCrossover::new(1, 2).unwrap().evaluate(&bars).unwrap();
        // i=1: slow=9, fast=8 (below), prev slow undefined -> flat
        // i=2: slow=10, fast=12 above; prev 8 <= 9 -> long
        // i=3: slow=12, fast=12 equal -> flat
        // i=4: slow=9, fast=6 below; prev 12 >= 12 -> short
        assert_eq!(
            frame.signal,
            vec![Signal::Flat, Signal::Flat, Signal::Long, Signal::Flat, Signal::Short]
        );
    }
}
