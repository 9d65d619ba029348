//! Property tests for execution simulator invariants.
//!
//! Uses proptest to verify, over random price walks and signal sequences:
//! 1. Equity curve length is always bars + 1 and every mark is non-negative
//! 2. Trades never overlap and every exit is strictly after its entry
//! 3. All-flat signals leave the portfolio untouched
//! 4. The simulation is deterministic

use chrono::NaiveDate;
use proptest::prelude::*;

use edgelab_core::{run_backtest, EngineConfig, PriceBar, SignalState};

fn bars_from_walk(steps: &[f64]) -> Vec<PriceBar> {
    let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let mut close = 100.0;
    steps
        .iter()
        .enumerate()
        .map(|(i, &step)| {
            let open = close;
            close = (close * (1.0 + step)).max(1.0);
            PriceBar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) * 1.01,
                low: open.min(close) * 0.99,
                close,
                volume: 1000,
            }
        })
        .collect()
}

fn arb_walk() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-0.05..0.05_f64, 2..120)
}

fn arb_signals(len: usize) -> impl Strategy<Value = Vec<SignalState>> {
    prop::collection::vec(
        prop_oneof![Just(SignalState::Flat), Just(SignalState::Long)],
        len..=len,
    )
}

fn arb_atr(len: usize) -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(
        prop_oneof![Just(None), (0.1..5.0_f64).prop_map(Some)],
        len..=len,
    )
}

proptest! {
    /// Equity curve shape and positivity hold for any walk.
    #[test]
    fn equity_curve_is_well_formed(
        steps in arb_walk(),
    ) {
        let bars = bars_from_walk(&steps);
        let n = bars.len();
        let signals: Vec<SignalState> =
            (0..n).map(|t| if t % 3 == 0 { SignalState::Long } else { SignalState::Flat }).collect();
        let atr = vec![Some(1.0); n];
        let outcome = run_backtest(&bars, &signals, &atr, &EngineConfig::default()).unwrap();

        prop_assert_eq!(outcome.equity_curve.len(), n + 1);
        prop_assert_eq!(outcome.equity_curve[0], 100_000.0);
        for &mark in &outcome.equity_curve {
            prop_assert!(mark.is_finite());
            prop_assert!(mark >= 0.0, "negative equity mark: {mark}");
        }
    }

    /// At most one open trade at a time: closed trades never overlap, and
    /// every exit is strictly after its entry.
    #[test]
    fn trades_never_overlap(
        steps in arb_walk(),
        seed_signals in prop::collection::vec(prop::bool::ANY, 2..120),
    ) {
        let bars = bars_from_walk(&steps);
        let n = bars.len();
        let signals: Vec<SignalState> = (0..n)
            .map(|t| if seed_signals[t % seed_signals.len()] {
                SignalState::Long
            } else {
                SignalState::Flat
            })
            .collect();
        let atr = vec![Some(0.5); n];
        let outcome = run_backtest(&bars, &signals, &atr, &EngineConfig::default()).unwrap();

        for trade in &outcome.trades {
            prop_assert!(trade.exit_date > trade.entry_date);
        }
        for pair in outcome.trades.windows(2) {
            prop_assert!(
                pair[1].entry_date >= pair[0].exit_date,
                "overlapping trades: {:?} then {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    /// If no trigger ever fires, the portfolio is untouched.
    #[test]
    fn all_flat_signals_are_identity(
        steps in arb_walk(),
        atr_seed in (0.1..5.0_f64),
    ) {
        let bars = bars_from_walk(&steps);
        let n = bars.len();
        let signals = vec![SignalState::Flat; n];
        let atr = vec![Some(atr_seed); n];
        let outcome = run_backtest(&bars, &signals, &atr, &EngineConfig::default()).unwrap();

        prop_assert!(outcome.trades.is_empty());
        prop_assert!(outcome.equity_curve.iter().all(|&e| e == 100_000.0));
    }

    /// Identical inputs produce bit-identical outputs.
    #[test]
    fn simulation_is_deterministic(
        steps in arb_walk(),
    ) {
        let bars = bars_from_walk(&steps);
        let n = bars.len();
        let signals: Vec<SignalState> =
            (0..n).map(|t| if t % 2 == 0 { SignalState::Long } else { SignalState::Flat }).collect();
        let atr = vec![Some(1.0); n];
        let config = EngineConfig::default();

        let a = run_backtest(&bars, &signals, &atr, &config).unwrap();
        let b = run_backtest(&bars, &signals, &atr, &config).unwrap();

        prop_assert_eq!(a.equity_curve, b.equity_curve);
        prop_assert_eq!(a.trades.len(), b.trades.len());
        for (ta, tb) in a.trades.iter().zip(&b.trades) {
            prop_assert_eq!(ta.pnl_pct, tb.pnl_pct);
            prop_assert_eq!(ta.entry_date, tb.entry_date);
            prop_assert_eq!(ta.exit_date, tb.exit_date);
        }
    }

    /// ATR gaps (undefined columns) never break the engine: entries fall
    /// back to full-equity sizing and stops are simply skipped.
    #[test]
    fn undefined_atr_is_tolerated(
        steps in arb_walk(),
        atr in arb_atr(120),
        signals in arb_signals(120),
    ) {
        let bars = bars_from_walk(&steps);
        let n = bars.len();
        let outcome = run_backtest(
            &bars,
            &signals[..n],
            &atr[..n],
            &EngineConfig::default(),
        ).unwrap();

        prop_assert_eq!(outcome.equity_curve.len(), n + 1);
        prop_assert!(outcome.final_value().is_finite());
    }
}
