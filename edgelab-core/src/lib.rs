//! edgelab core — engine, domain types, indicators, signals, execution.
//!
//! This crate contains the simulation half of the system:
//! - Domain types (price bars, trades)
//! - Indicator pipeline (struct-of-arrays columns, explicit warm-up)
//! - Strategy signal generator (closed strategy enum, forward-filled state)
//! - Execution simulator (two-state machine with ATR trailing stops,
//!   next-bar fills, volatility sizing, transaction costs)
//!
//! Statistics (performance metrics, Monte Carlo resampling, significance)
//! live in `edgelab-stats`, which builds on these types. Neither crate
//! performs network, database, or session I/O: collaborators supply ordered
//! price history and configuration, and persist the output.

pub mod domain;
pub mod engine;
pub mod indicators;
pub mod signals;

pub use domain::{ExitReason, PriceBar, Trade, TradeResult};
pub use engine::{run_backtest, slice_date_range, BacktestOutcome, EngineConfig, EngineError};
pub use indicators::{IndicatorFrame, IndicatorParams};
pub use signals::{generate_signals, SignalState, Strategy, StrategyError};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: core types cross thread boundaries.
    ///
    /// The stats crate replays Monte Carlo trials on worker threads; if a
    /// type here stops being Send + Sync the build breaks immediately.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::PriceBar>();
        require_sync::<domain::PriceBar>();
        require_send::<domain::Trade>();
        require_sync::<domain::Trade>();
        require_send::<domain::ExitReason>();
        require_sync::<domain::ExitReason>();

        require_send::<indicators::IndicatorFrame>();
        require_sync::<indicators::IndicatorFrame>();
        require_send::<indicators::IndicatorParams>();
        require_sync::<indicators::IndicatorParams>();

        require_send::<signals::Strategy>();
        require_sync::<signals::Strategy>();
        require_send::<signals::SignalState>();
        require_sync::<signals::SignalState>();

        require_send::<engine::EngineConfig>();
        require_sync::<engine::EngineConfig>();
        require_send::<engine::BacktestOutcome>();
        require_sync::<engine::BacktestOutcome>();
    }

    /// Architecture contract: signal generation cannot see portfolio state.
    ///
    /// `generate_signals` takes bars and indicators only. There is no cash
    /// or position parameter, so strategies cannot condition on equity. The
    /// type system enforces it; this test documents the contract.
    #[test]
    fn signal_generation_has_no_portfolio_parameter() {
        fn _check(
            strategy: Strategy,
            bars: &[PriceBar],
            frame: &IndicatorFrame,
        ) -> Vec<SignalState> {
            generate_signals(strategy, bars, frame)
        }
    }
}
