//! Monte Carlo resampling engine — regenerates alternate equity-curve
//! outcomes from the same trade/return data under three randomization
//! schemes:
//!
//! - **Position shuffle**: permute realized trade pnl% values without
//!   replacement and replay compounding trade by trade.
//! - **Return permutation**: permute the daily returns of the underlying
//!   price series without replacement and replay day by day. No discrete
//!   trades exist in this scheme, so its win rate is pinned at 0.5
//!   (random-walk assumption).
//! - **Bootstrap**: resample trade pnl% values with replacement, same
//!   count as the original trades.
//!
//! Trial allocation is `num_simulations / 3` per scheme with the remainder
//! (0–2 trials) assigned to the bootstrap, so the combined trial count
//! equals `num_simulations` exactly.
//!
//! Determinism: a single `StdRng`, seeded from `seed_used`, is consumed
//! sequentially in fixed method order to pre-draw every ordering; trial
//! replay then fans out on rayon workers with no shared mutable state and
//! joins before aggregation. Identical inputs and seed produce
//! bit-identical results at any thread count.

mod resample;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use edgelab_core::engine::ConfigError;
use edgelab_core::{EngineConfig, Trade};

use crate::metrics;
use crate::significance::{summarize, MonteCarloAnalysis};

/// Which resampling scheme produced a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleMethod {
    PositionShuffle,
    ReturnPermutation,
    Bootstrap,
}

impl ResampleMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResampleMethod::PositionShuffle => "position_shuffle",
            ResampleMethod::ReturnPermutation => "return_permutation",
            ResampleMethod::Bootstrap => "bootstrap",
        }
    }
}

/// Configuration of a Monte Carlo run. Immutable once the run starts.
///
/// A `seed` of 0 means "generate a fresh seed"; the seed actually used is
/// recorded in the analysis so any run can be replayed verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    pub num_simulations: usize,
    pub seed: u64,
    pub initial_capital: f64,
    pub risk_per_trade: f64,
    pub atr_multiplier: f64,
    pub tax_rate: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_simulations: 1000,
            seed: 0,
            initial_capital: 100_000.0,
            risk_per_trade: 0.02,
            atr_multiplier: 2.0,
            tax_rate: 0.001,
        }
    }
}

impl SimulationConfig {
    /// The execution-side subset, for driving the backtest that feeds this
    /// engine.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            initial_capital: self.initial_capital,
            risk_per_trade: self.risk_per_trade,
            atr_multiplier: self.atr_multiplier,
            tax_rate: self.tax_rate,
        }
    }

    pub fn validate(&self) -> Result<(), MonteCarloError> {
        if self.num_simulations == 0 {
            return Err(MonteCarloError::ZeroSimulations);
        }
        self.engine_config().validate()?;
        Ok(())
    }
}

/// Errors from the Monte Carlo engine.
#[derive(Debug, Error)]
pub enum MonteCarloError {
    #[error("num_simulations must be > 0")]
    ZeroSimulations,
    #[error("insufficient price history: {len} closes, need at least 2")]
    InsufficientPriceHistory { len: usize },
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// One Monte Carlo trial's outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub method: ResampleMethod,
    pub final_value: f64,
    pub total_return_pct: f64,
    pub max_drawdown_pct: f64,
    pub num_trades: usize,
    /// Fraction of winning steps. Pinned at 0.5 for return permutation.
    pub win_rate: f64,
    /// Annualized from the trial's per-step returns; trade-granularity
    /// curves are treated as daily for the sqrt(252) factor, mirroring the
    /// mixed-granularity convention of the combined pool.
    pub sharpe_ratio: f64,
    pub equity_curve: Vec<f64>,
}

/// Trials per scheme for a run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MethodCounts {
    pub position_shuffle: usize,
    pub return_permutation: usize,
    pub bootstrap: usize,
}

impl MethodCounts {
    /// Split `num_simulations` three ways; the remainder goes to the
    /// bootstrap so the total is exact.
    pub fn allocate(num_simulations: usize) -> Self {
        let base = num_simulations / 3;
        Self {
            position_shuffle: base,
            return_permutation: base,
            bootstrap: num_simulations - 2 * base,
        }
    }

    pub fn total(&self) -> usize {
        self.position_shuffle + self.return_permutation + self.bootstrap
    }
}

/// Run the full Monte Carlo analysis against a backtest's realized trades
/// and the close prices of its simulated range.
///
/// `original_return_pct` is the real strategy's return, which the
/// significance layer compares against the resampled distribution.
pub fn run_monte_carlo(
    trades: &[Trade],
    closes: &[f64],
    original_return_pct: f64,
    config: &SimulationConfig,
) -> Result<MonteCarloAnalysis, MonteCarloError> {
    config.validate()?;
    if closes.len() < 2 {
        return Err(MonteCarloError::InsufficientPriceHistory { len: closes.len() });
    }

    let seed_used = resolve_seed(config.seed);
    let pnls: Vec<f64> = trades.iter().map(|t| t.pnl_pct).collect();
    let returns = metrics::daily_returns(closes);
    let counts = MethodCounts::allocate(config.num_simulations);

    if pnls.is_empty() {
        log::warn!(
            "monte carlo over zero trades: shuffle and bootstrap trials degenerate to flat curves"
        );
    }

    // Sequential draw stage: the only consumer of randomness.
    let mut rng = StdRng::seed_from_u64(seed_used);
    let plan = resample::draw_plan(
        &mut rng,
        pnls.len(),
        returns.len(),
        (
            counts.position_shuffle,
            counts.return_permutation,
            counts.bootstrap,
        ),
    );

    // Parallel replay stage: pure computation over the pre-drawn plan.
    let initial = config.initial_capital;
    let shuffle_trials: Vec<SimulationResult> = plan
        .shuffle_orders
        .par_iter()
        .map(|order| trade_trial(ResampleMethod::PositionShuffle, &pnls, order, initial))
        .collect();
    let permutation_trials: Vec<SimulationResult> = plan
        .permutation_orders
        .par_iter()
        .map(|order| {
            let curve = resample::replay_returns(&returns, order, initial);
            trial_from_curve(ResampleMethod::ReturnPermutation, curve, 0, 0.5, initial)
        })
        .collect();
    let bootstrap_trials: Vec<SimulationResult> = plan
        .bootstrap_picks
        .par_iter()
        .map(|picks| trade_trial(ResampleMethod::Bootstrap, &pnls, picks, initial))
        .collect();

    let mut results =
        Vec::with_capacity(shuffle_trials.len() + permutation_trials.len() + bootstrap_trials.len());
    results.extend(shuffle_trials);
    results.extend(permutation_trials);
    results.extend(bootstrap_trials);

    log::info!(
        "monte carlo complete: {} trials (shuffle {}, permutation {}, bootstrap {}), seed {}",
        results.len(),
        counts.position_shuffle,
        counts.return_permutation,
        counts.bootstrap,
        seed_used
    );

    Ok(summarize(
        results,
        original_return_pct,
        seed_used,
        counts,
    ))
}

/// Convenience wrapper: analyze a finished backtest.
pub fn analyze_backtest(
    backtest: &crate::backtest::StrategyBacktest,
    config: &SimulationConfig,
) -> Result<MonteCarloAnalysis, MonteCarloError> {
    run_monte_carlo(
        &backtest.trades,
        &backtest.closes,
        backtest.report.strategy_return_pct,
        config,
    )
}

/// A trial built from a sequence of trade pnl% indices.
fn trade_trial(
    method: ResampleMethod,
    pnls: &[f64],
    picks: &[usize],
    initial: f64,
) -> SimulationResult {
    let curve = resample::replay_pnl(pnls, picks, initial);
    let wins = picks.iter().filter(|&&i| pnls[i] > 0.0).count();
    let win_rate = if picks.is_empty() {
        0.0
    } else {
        wins as f64 / picks.len() as f64
    };
    trial_from_curve(method, curve, picks.len(), win_rate, initial)
}

fn trial_from_curve(
    method: ResampleMethod,
    curve: Vec<f64>,
    num_trades: usize,
    win_rate: f64,
    initial: f64,
) -> SimulationResult {
    let final_value = curve.last().copied().unwrap_or(initial);
    SimulationResult {
        method,
        final_value,
        total_return_pct: metrics::return_pct(initial, final_value),
        max_drawdown_pct: metrics::max_drawdown_pct(&curve),
        num_trades,
        win_rate,
        sharpe_ratio: metrics::sharpe_ratio(&curve),
        equity_curve: curve,
    }
}

fn resolve_seed(seed: u64) -> u64 {
    if seed != 0 {
        return seed;
    }
    let mut rng = rand::thread_rng();
    loop {
        let fresh: u64 = rng.gen();
        if fresh != 0 {
            return fresh;
        }
    }
}
