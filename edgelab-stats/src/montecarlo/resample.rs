//! Random draw generation and trial replay.
//!
//! All randomness is consumed here, sequentially, from one seeded RNG in a
//! fixed method order (shuffle → permutation → bootstrap). The replay
//! functions are pure; once a plan exists, trials can be computed on any
//! number of threads with identical results.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Every random ordering for a run, drawn up front.
pub(crate) struct DrawPlan {
    /// One permutation of trade indices per position-shuffle trial.
    pub shuffle_orders: Vec<Vec<usize>>,
    /// One permutation of daily-return indices per return-permutation trial.
    pub permutation_orders: Vec<Vec<usize>>,
    /// One with-replacement index sample per bootstrap trial.
    pub bootstrap_picks: Vec<Vec<usize>>,
}

/// Draw the full plan. The draw order is part of the reproducibility
/// contract: for a given seed the t-th trial of each method always sees
/// the same ordering, regardless of how trials are later scheduled.
pub(crate) fn draw_plan(
    rng: &mut StdRng,
    n_trades: usize,
    n_returns: usize,
    counts: (usize, usize, usize),
) -> DrawPlan {
    let (n_shuffle, n_permutation, n_bootstrap) = counts;

    let shuffle_orders = (0..n_shuffle)
        .map(|_| {
            let mut order: Vec<usize> = (0..n_trades).collect();
            order.shuffle(rng);
            order
        })
        .collect();

    let permutation_orders = (0..n_permutation)
        .map(|_| {
            let mut order: Vec<usize> = (0..n_returns).collect();
            order.shuffle(rng);
            order
        })
        .collect();

    let bootstrap_picks = (0..n_bootstrap)
        .map(|_| {
            if n_trades == 0 {
                Vec::new()
            } else {
                (0..n_trades).map(|_| rng.gen_range(0..n_trades)).collect()
            }
        })
        .collect();

    DrawPlan {
        shuffle_orders,
        permutation_orders,
        bootstrap_picks,
    }
}

/// Replay a pnl% sequence in the given index order, compounding from the
/// initial capital trade by trade.
pub(crate) fn replay_pnl(pnls: &[f64], order: &[usize], initial: f64) -> Vec<f64> {
    let mut curve = Vec::with_capacity(order.len() + 1);
    let mut equity = initial;
    curve.push(equity);
    for &i in order {
        equity *= 1.0 + pnls[i] / 100.0;
        curve.push(equity);
    }
    curve
}

/// Replay daily returns (fractions) in the given index order, compounding
/// from the initial capital day by day.
pub(crate) fn replay_returns(returns: &[f64], order: &[usize], initial: f64) -> Vec<f64> {
    let mut curve = Vec::with_capacity(order.len() + 1);
    let mut equity = initial;
    curve.push(equity);
    for &i in order {
        equity *= 1.0 + returns[i];
        curve.push(equity);
    }
    curve
}
