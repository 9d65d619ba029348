//! Backtest wiring — slices the range, computes indicators, generates
//! signals, runs the engine, and reduces the result to a report.
//!
//! This is the single-call entry point collaborators use; it performs no
//! I/O and owns no persistence.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use edgelab_core::indicators::{IndicatorFrame, IndicatorParams};
use edgelab_core::signals::generate_signals;
use edgelab_core::{run_backtest, slice_date_range, EngineConfig, EngineError, Strategy, Trade};

use crate::metrics::PerformanceReport;

/// Complete result of one strategy backtest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyBacktest {
    pub strategy: Strategy,
    pub trades: Vec<Trade>,
    /// Mark-to-market curve, leading pre-trade initial capital included.
    pub equity_curve: Vec<f64>,
    /// Buy-and-hold benchmark over the same range.
    pub market_curve: Vec<f64>,
    /// Close prices of the simulated range; the Monte Carlo return
    /// permutation scheme derives its daily returns from these.
    pub closes: Vec<f64>,
    pub report: PerformanceReport,
}

/// Run a full strategy backtest over an optional inclusive date range.
pub fn run_strategy_backtest(
    bars: &[edgelab_core::PriceBar],
    strategy: Strategy,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    params: &IndicatorParams,
    config: &EngineConfig,
) -> Result<StrategyBacktest, EngineError> {
    let window = slice_date_range(bars, start, end)?;
    let frame = IndicatorFrame::compute(window, params);
    let signals = generate_signals(strategy, window, &frame);
    let outcome = run_backtest(window, &signals, &frame.atr, config)?;

    let closes: Vec<f64> = window.iter().map(|b| b.close).collect();
    let market_curve = crate::metrics::market_curve(&closes, config.initial_capital);
    let report = PerformanceReport::compute(
        &outcome.equity_curve,
        &outcome.trades,
        &closes,
        config.initial_capital,
    );

    log::info!(
        "backtest complete: strategy={} bars={} trades={} return={:.2}%",
        strategy.as_str(),
        window.len(),
        outcome.trades.len(),
        report.strategy_return_pct
    );

    Ok(StrategyBacktest {
        strategy,
        trades: outcome.trades,
        equity_curve: outcome.equity_curve,
        market_curve,
        closes,
        report,
    })
}
