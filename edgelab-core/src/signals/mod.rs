//! Strategy signal generator — discrete triggers forward-filled to a
//! binary long/flat state per bar.
//!
//! A buy trigger flips the state to Long, a sell trigger to Flat; bars
//! with no trigger inherit the previous state. The state starts Flat, so
//! a sell before any buy is a no-op. When both conditions fire on the
//! same bar, the sell wins.

pub mod strategy;

pub use strategy::{Strategy, StrategyError};

use serde::{Deserialize, Serialize};

use crate::domain::PriceBar;
use crate::indicators::IndicatorFrame;

/// Per-bar position state. The closed enum keeps the "signal is binary"
/// invariant in the type rather than in a runtime check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalState {
    Flat,
    Long,
}

/// A discrete entry/exit trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Buy,
    Sell,
}

/// Evaluate the strategy's conditions on every bar.
pub fn triggers(
    strategy: Strategy,
    bars: &[PriceBar],
    frame: &IndicatorFrame,
) -> Vec<Option<Trigger>> {
    assert_eq!(frame.len(), bars.len(), "frame must align with bars");

    (0..bars.len())
        .map(|t| {
            if strategy.sell_trigger(bars, frame, t) {
                Some(Trigger::Sell)
            } else if strategy.buy_trigger(bars, frame, t) {
                Some(Trigger::Buy)
            } else {
                None
            }
        })
        .collect()
}

/// Generate the forward-filled binary signal sequence for a strategy.
pub fn generate_signals(
    strategy: Strategy,
    bars: &[PriceBar],
    frame: &IndicatorFrame,
) -> Vec<SignalState> {
    let mut state = SignalState::Flat;
    triggers(strategy, bars, frame)
        .into_iter()
        .map(|trigger| {
            match trigger {
                Some(Trigger::Buy) => state = SignalState::Long,
                Some(Trigger::Sell) => state = SignalState::Flat,
                None => {}
            }
            state
        })
        .collect()
}
