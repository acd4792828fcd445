//! Property tests for the signal engine.
//!
//! 1. Every defined SMA equals the mean of its trailing window.
//! 2. A signal fires exactly where the fast/slow spread changes side.

use chrono::{Days, NaiveDate};
use core_types::{Bar, Signal};
use proptest::prelude::*;
use strategies::{rolling_mean, SmaCrossover, FAST_WINDOW, SLOW_WINDOW};

fn arb_closes() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((10.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0), 1..160)
}

fn to_bars(closes: &[f64]) -> Vec<Bar> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Bar::new(start + Days::new(i as u64), c, c, c, c, 0).unwrap())
        .collect()
}

proptest! {
    #[test]
    fn sma_matches_trailing_window_mean(closes in arb_closes()) {
        for window in [FAST_WINDOW, SLOW_WINDOW] {
            let means = rolling_mean(&closes, window).unwrap();
            prop_assert_eq!(means.len(), closes.len());
            for (i, mean) in means.iter().enumerate() {
                if i + 1 < window {
                    prop_assert!(mean.is_none());
                } else {
                    let expected = closes[i + 1 - window..=i].iter().sum::<f64>() / window as f64;
                    let actual = mean.unwrap();
                    prop_assert!((actual - expected).abs() < 1e-9 * expected.abs().max(1.0));
                }
            }
        }
    }

    #[test]
    fn signals_fire_only_on_side_changes(closes in arb_closes()) {
        let frame = SmaCrossover::default().evaluate(&to_bars(&closes)).unwrap();
        prop_assert_eq!(frame.signal[0], Signal::Flat);

        for i in 1..frame.len() {
            let spread = frame.sma_fast[i].zip(frame.sma_slow[i]).map(|(f, s)| f - s);
            let prev = frame.sma_fast[i - 1].zip(frame.sma_slow[i - 1]).map(|(f, s)| f - s);
            let expected = match (prev, spread) {
                (Some(p), Some(c)) if p <= 0.0 && c > 0.0 => Signal::Long,
                (Some(p), Some(c)) if p >= 0.0 && c < 0.0 => Signal::Short,
                _ => Signal::Flat,
            };
            prop_assert_eq!(frame.signal[i], expected, "bar {}", i);
        }
    }
}
