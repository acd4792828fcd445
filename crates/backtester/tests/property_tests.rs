//! Property tests for the position simulator.
//!
//! 1. Position lags the signal by exactly one bar.
//! 2. Holdings = Units x Close and Equity = Holdings + Cash on every bar.
//! 3. The first bar always sits entirely in cash.

use backtester::{PositionSimulator, INITIAL_CASH};
use core_types::Signal;
use proptest::prelude::*;

fn arb_signal() -> impl Strategy<Value = Signal> {
    prop_oneof![Just(Signal::Short), Just(Signal::Flat), Just(Signal::Long)]
}

fn arb_inputs() -> impl Strategy<Value = (Vec<Signal>, Vec<f64>)> {
    (1usize..120).prop_flat_map(|n| {
        (
            prop::collection::vec(arb_signal(), n),
            prop::collection::vec(1.0..1_000.0_f64, n),
        )
    })
}

proptest! {
    #[test]
    fn position_is_previous_signal((signals, closes) in arb_inputs()) {
        let frame = PositionSimulator::default().run(&signals, &closes).unwrap();
        prop_assert_eq!(frame.position[0], None);
        for i in 1..signals.len() {
            prop_assert_eq!(frame.position[i], Some(signals[i - 1]));
        }
    }

    #[test]
    fn account_identities_hold((signals, closes) in arb_inputs()) {
        let frame = PositionSimulator::default().run(&signals, &closes).unwrap();
        for i in 0..closes.len() {
            prop_assert_eq!(frame.holdings[i], frame.units[i] * closes[i]);
            prop_assert_eq!(frame.equity[i], frame.holdings[i] + frame.cash[i]);
        }
    }

    #[test]
    fn first_bar_is_all_cash((signals, closes) in arb_inputs()) {
        let frame = PositionSimulator::default().run(&signals, &closes).unwrap();
        prop_assert_eq!(frame.units[0], 0.0);
        prop_assert_eq!(frame.cash[0], INITIAL_CASH);
        prop_assert_eq!(frame.equity[0], INITIAL_CASH);
    }
}
