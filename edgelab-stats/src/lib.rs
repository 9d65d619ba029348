//! edgelab stats — performance metrics, Monte Carlo resampling, and
//! statistical significance analysis.
//!
//! This crate builds on `edgelab-core` to provide:
//! - Single-call backtest wiring (slice → indicators → signals → engine →
//!   report) with a buy-and-hold benchmark
//! - Pure performance metrics (return, Sharpe, drawdown, win rate)
//! - A three-scheme Monte Carlo resampling engine with a sequential draw
//!   stage and parallel trial replay
//! - A significance analyzer: percentiles, confidence interval, VaR/CVaR,
//!   ruin probability, p-value, histogram, and a traffic-light rating
//!
//! No I/O happens here: callers supply bars and configs, and persist or
//! display the serialized results.

pub mod backtest;
pub mod metrics;
pub mod montecarlo;
pub mod significance;

pub use backtest::{run_strategy_backtest, StrategyBacktest};
pub use metrics::PerformanceReport;
pub use montecarlo::{
    analyze_backtest, run_monte_carlo, MethodCounts, MonteCarloError, ResampleMethod,
    SimulationConfig, SimulationResult,
};
pub use significance::{
    summarize, HistogramBin, MonteCarloAnalysis, Percentiles, RiskLight, SignalStrength,
};
