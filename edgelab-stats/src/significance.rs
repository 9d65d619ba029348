//! Statistical significance analyzer — summarizes the resampled outcome
//! distribution into percentiles, a confidence interval, tail-risk
//! metrics, a p-value against the real strategy's return, and a
//! first-match rating ladder.
//!
//! The three resampling schemes contribute to one combined return pool
//! with equal per-trial weight; per-method counts are reported so a
//! caller can reweight if it wants different sample-size semantics.

use serde::{Deserialize, Serialize};

use crate::metrics::mean_f64;
use crate::montecarlo::{MethodCounts, SimulationResult};

/// Number of equal-width histogram bins.
pub const HISTOGRAM_BINS: usize = 20;

/// Transport caps: at most this many raw trials are serialized, and each
/// serialized equity curve is downsampled to at most this many points.
/// Internal statistics always use every trial.
pub const SAMPLE_RESULTS_CAP: usize = 100;
pub const EQUITY_POINTS_CAP: usize = 250;

/// A trial return below this percent counts toward the probability of ruin.
pub const RUIN_THRESHOLD_PCT: f64 = -50.0;

/// Summary percentiles of the combined trial return distribution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Percentiles {
    pub p5: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p95: f64,
}

/// One equal-width histogram bin over trial returns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// How clearly the real return stands out from the resampled distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalStrength {
    StrongSignal,
    ModerateSignal,
    WeakSignal,
    NoSignal,
}

/// Traffic-light risk rating paired with the signal strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLight {
    Green,
    Amber,
    Red,
}

/// Aggregate of one Monte Carlo analysis. Created once per call,
/// read-only thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonteCarloAnalysis {
    /// The seed the run actually used; replaying with it is bit-identical.
    pub seed_used: u64,
    pub num_trials: usize,
    pub method_counts: MethodCounts,
    pub original_return_pct: f64,
    pub mean_return_pct: f64,
    pub percentiles: Percentiles,
    /// 95% confidence interval of trial returns: [p5, p95].
    pub confidence_interval_95: (f64, f64),
    /// Value at Risk at 95%: the 5th-percentile trial return.
    pub var_95: f64,
    /// Conditional VaR: mean of trial returns at or below the VaR cutoff.
    pub cvar_95: f64,
    /// Fraction of trials returning below the ruin threshold.
    pub probability_of_ruin: f64,
    /// Percent of trials with a return >= the original strategy's return.
    pub p_value: f64,
    pub signal: SignalStrength,
    pub risk_light: RiskLight,
    pub interpretation: String,
    pub histogram: Vec<HistogramBin>,
    /// Capped sample of raw trials for transport; see `SAMPLE_RESULTS_CAP`.
    pub sample_results: Vec<SimulationResult>,
}

/// Reduce the full trial set to a `MonteCarloAnalysis`.
pub fn summarize(
    results: Vec<SimulationResult>,
    original_return_pct: f64,
    seed_used: u64,
    method_counts: MethodCounts,
) -> MonteCarloAnalysis {
    let returns: Vec<f64> = results.iter().map(|r| r.total_return_pct).collect();
    let mut sorted = returns.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let percentiles = Percentiles {
        p5: percentile_sorted(&sorted, 5.0),
        p25: percentile_sorted(&sorted, 25.0),
        p50: percentile_sorted(&sorted, 50.0),
        p75: percentile_sorted(&sorted, 75.0),
        p95: percentile_sorted(&sorted, 95.0),
    };

    let var_95 = percentiles.p5;
    let tail: Vec<f64> = sorted
        .iter()
        .copied()
        .take_while(|&v| v <= var_95)
        .collect();
    let cvar_95 = mean_f64(&tail);

    let n = returns.len();
    let probability_of_ruin = if n == 0 {
        0.0
    } else {
        returns.iter().filter(|&&r| r < RUIN_THRESHOLD_PCT).count() as f64 / n as f64
    };
    let p_value = if n == 0 {
        0.0
    } else {
        returns
            .iter()
            .filter(|&&r| r >= original_return_pct)
            .count() as f64
            / n as f64
            * 100.0
    };

    let (signal, risk_light) = rate(original_return_pct, &percentiles);
    let interpretation = interpret(signal, original_return_pct, &percentiles, n);

    MonteCarloAnalysis {
        seed_used,
        num_trials: n,
        method_counts,
        original_return_pct,
        mean_return_pct: mean_f64(&returns),
        percentiles,
        confidence_interval_95: (percentiles.p5, percentiles.p95),
        var_95,
        cvar_95,
        probability_of_ruin,
        p_value,
        signal,
        risk_light,
        interpretation,
        histogram: histogram(&returns, HISTOGRAM_BINS),
        sample_results: sample_trials(&results, SAMPLE_RESULTS_CAP),
    }
}

/// Rating ladder, checked top-down; first match wins.
fn rate(original_return_pct: f64, p: &Percentiles) -> (SignalStrength, RiskLight) {
    if original_return_pct > p.p95 {
        (SignalStrength::StrongSignal, RiskLight::Green)
    } else if original_return_pct > p.p75 {
        (SignalStrength::ModerateSignal, RiskLight::Green)
    } else if original_return_pct > p.p50 {
        (SignalStrength::WeakSignal, RiskLight::Amber)
    } else {
        (SignalStrength::NoSignal, RiskLight::Red)
    }
}

fn interpret(
    signal: SignalStrength,
    original_return_pct: f64,
    p: &Percentiles,
    n: usize,
) -> String {
    match signal {
        SignalStrength::StrongSignal => format!(
            "Strategy return of {original_return_pct:.2}% beats the 95th percentile \
             ({:.2}%) of {n} randomized trials; very unlikely to be chance.",
            p.p95
        ),
        SignalStrength::ModerateSignal => format!(
            "Strategy return of {original_return_pct:.2}% beats the 75th percentile \
             ({:.2}%) of {n} randomized trials; better than most random orderings.",
            p.p75
        ),
        SignalStrength::WeakSignal => format!(
            "Strategy return of {original_return_pct:.2}% is above the median \
             ({:.2}%) of {n} randomized trials but within the range explained by chance.",
            p.p50
        ),
        SignalStrength::NoSignal => format!(
            "Strategy return of {original_return_pct:.2}% does not beat the median \
             ({:.2}%) of {n} randomized trials; indistinguishable from chance.",
            p.p50
        ),
    }
}

/// Nearest-rank percentile over an ascending-sorted slice, `pct` in [0, 100].
pub fn percentile_sorted(sorted: &[f64], pct: f64) -> f64 {
    assert!((0.0..=100.0).contains(&pct), "percentile must be in [0, 100]");
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = (pct / 100.0 * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx]
}

/// Equal-width histogram. Bin counts always sum to the number of values;
/// a degenerate (constant) distribution collapses into a single bin.
fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max <= min {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + i as f64 * width,
            upper: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// Stride-sample trials across the combined pool and downsample each
/// equity curve for transport.
fn sample_trials(results: &[SimulationResult], cap: usize) -> Vec<SimulationResult> {
    let stride = results.len().div_ceil(cap).max(1);
    results
        .iter()
        .step_by(stride)
        .take(cap)
        .map(|r| SimulationResult {
            equity_curve: downsample_curve(&r.equity_curve, EQUITY_POINTS_CAP),
            ..r.clone()
        })
        .collect()
}

/// Keep every stride-th point, always including the last.
fn downsample_curve(curve: &[f64], cap: usize) -> Vec<f64> {
    if curve.len() <= cap {
        return curve.to_vec();
    }
    let stride = curve.len().div_ceil(cap);
    let mut out: Vec<f64> = curve.iter().step_by(stride).copied().collect();
    if (curve.len() - 1) % stride != 0 {
        out.push(*curve.last().unwrap());
    }
    out
}
