//! Execution simulator — the event-driven state machine that turns signals
//! into trades, cash, and an equity curve.
//!
//! Two states: Flat (no shares) and Long. Per bar t (0 ..= N-2), looking at
//! bar t and bar t+1:
//!
//! 1. Mark to market at bar t's close; append to the equity curve.
//! 2. Long: ratchet the high watermark with bar t's high, then check bar
//!    t+1 against the ATR trailing stop — open below the stop exits at the
//!    open (gap), a low below the stop exits at the stop (intraday).
//! 3. Long with a flat signal at t: exit at bar t+1's open. This overrides
//!    an intraday stop (which used an estimated fill) but not a gap exit
//!    (which already reflects the worse realized open).
//! 4. Exits settle `revenue - revenue * tax_rate` into cash and close the
//!    trade; at most one position is open at any time.
//! 5. Flat with a long signal at t: volatility-sized entry at bar t+1's
//!    open, debiting cost plus transaction fees.
//! 6. A final mark at the last bar's close; the curve also carries a
//!    leading pre-trade initial-capital point, so its length is N+1.
//!
//! The loop is inherently sequential (every decision depends on prior
//! state) and is never parallelized.

pub mod config;
mod position;
mod sizing;

pub use config::{ConfigError, EngineConfig};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{ExitReason, PriceBar, Trade};
use crate::signals::SignalState;
use position::OpenPosition;

/// Errors from the execution simulator.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("requested date range contains no bars")]
    EmptyRange,
    #[error("insufficient data: {bar_count} bars, need at least 2")]
    InsufficientData { bar_count: usize },
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result of one simulation: closed trades and the mark-to-market curve.
///
/// A run in which no trigger ever fired is a valid zero-trade outcome, not
/// an error: the trade list is empty and the curve is flat at the initial
/// capital.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestOutcome {
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<f64>,
}

impl BacktestOutcome {
    pub fn final_value(&self) -> f64 {
        *self
            .equity_curve
            .last()
            .expect("equity curve always has the initial-capital point")
    }
}

/// Select the sub-slice of bars inside `[start, end]` (inclusive, either
/// side optional). Bars are assumed date-ascending.
pub fn slice_date_range(
    bars: &[PriceBar],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<&[PriceBar], EngineError> {
    let lo = match start {
        Some(s) => bars.partition_point(|b| b.date < s),
        None => 0,
    };
    let hi = match end {
        Some(e) => bars.partition_point(|b| b.date <= e),
        None => bars.len(),
    };
    if lo >= hi {
        return Err(EngineError::EmptyRange);
    }
    Ok(&bars[lo..hi])
}

/// Run the execution state machine over aligned bars, signals, and the ATR
/// column.
pub fn run_backtest(
    bars: &[PriceBar],
    signals: &[SignalState],
    atr: &[Option<f64>],
    config: &EngineConfig,
) -> Result<BacktestOutcome, EngineError> {
    config.validate()?;

    let n = bars.len();
    if n < 2 {
        return Err(EngineError::InsufficientData { bar_count: n });
    }
    assert_eq!(signals.len(), n, "signals must align with bars");
    assert_eq!(atr.len(), n, "ATR column must align with bars");

    let mut cash = config.initial_capital;
    let mut open_position: Option<OpenPosition> = None;
    let mut trades = Vec::new();
    let mut equity_curve = Vec::with_capacity(n + 1);
    equity_curve.push(config.initial_capital);

    for t in 0..n - 1 {
        let bar = &bars[t];
        let next = &bars[t + 1];

        let held = open_position.as_ref().map(|p| p.shares).unwrap_or(0.0);
        equity_curve.push(cash + held * bar.close);

        if let Some(pos) = open_position.as_mut() {
            pos.observe_high(bar.high);

            let mut exit = pos.stop_exit(next, atr[t], config.atr_multiplier);
            if signals[t] == SignalState::Flat
                && !matches!(exit, Some((_, ExitReason::StopLossGap)))
            {
                exit = Some((next.open, ExitReason::SignalExit));
            }

            if let Some((exit_price, exit_reason)) = exit {
                let revenue = pos.shares * exit_price;
                let cost = revenue * config.tax_rate;
                cash += revenue - cost;

                let pnl_pct = (exit_price - pos.entry_price) / pos.entry_price * 100.0;
                trades.push(Trade {
                    entry_date: pos.entry_date,
                    entry_price: pos.entry_price,
                    exit_date: next.date,
                    exit_price,
                    pnl_pct,
                    result: Trade::classify(pnl_pct),
                    exit_reason,
                });
                open_position = None;
            }
        } else if signals[t] == SignalState::Long {
            // Flat ⇒ current equity is exactly cash.
            let shares = sizing::size_entry(cash, cash, next.open, atr[t], config);
            if shares > 0.0 {
                cash -= shares * next.open * (1.0 + config.tax_rate);
                open_position = Some(OpenPosition::open(shares, next.open, next.date));
            }
        }
    }

    let last = &bars[n - 1];
    let held = open_position.as_ref().map(|p| p.shares).unwrap_or(0.0);
    equity_curve.push(cash + held * last.close);

    Ok(BacktestOutcome {
        trades,
        equity_curve,
    })
}
