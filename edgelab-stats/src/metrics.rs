//! Performance metrics — pure functions that reduce an equity curve and
//! trade list to scalar statistics.
//!
//! Every metric is a pure function: equity curve and/or trade list in,
//! scalar out. No dependency on the engine or the resampling layer.

use serde::{Deserialize, Serialize};

use edgelab_core::Trade;

/// Flat performance record for a single backtest run, with the buy-and-hold
/// benchmark alongside the strategy result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub final_portfolio_value: f64,
    pub market_buy_hold_value: f64,
    pub strategy_return_pct: f64,
    pub market_return_pct: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown_pct: f64,
    pub num_trades: usize,
    pub win_rate: f64,
}

impl PerformanceReport {
    /// Compute all metrics from the strategy curve, its trades, and the
    /// close prices of the simulated range.
    ///
    /// A zero-trade run is a valid result, not an error: the report simply
    /// carries the untouched initial capital and an empty win rate.
    pub fn compute(
        equity_curve: &[f64],
        trades: &[Trade],
        closes: &[f64],
        initial_capital: f64,
    ) -> Self {
        let final_value = equity_curve.last().copied().unwrap_or(initial_capital);
        let market = market_curve(closes, initial_capital);
        let market_final = market.last().copied().unwrap_or(initial_capital);

        Self {
            final_portfolio_value: final_value,
            market_buy_hold_value: market_final,
            strategy_return_pct: return_pct(initial_capital, final_value),
            market_return_pct: return_pct(initial_capital, market_final),
            sharpe_ratio: sharpe_ratio(equity_curve),
            max_drawdown_pct: max_drawdown_pct(equity_curve),
            num_trades: trades.len(),
            win_rate: win_rate(trades),
        }
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// Percent return from initial to final value. Zero for degenerate initial.
pub fn return_pct(initial: f64, final_value: f64) -> f64 {
    if initial <= 0.0 {
        return 0.0;
    }
    (final_value - initial) / initial * 100.0
}

/// Buy-and-hold benchmark: `close[t] / close[0] * initial`.
pub fn market_curve(closes: &[f64], initial_capital: f64) -> Vec<f64> {
    let Some(&first) = closes.first() else {
        return Vec::new();
    };
    if first <= 0.0 {
        return vec![initial_capital; closes.len()];
    }
    closes.iter().map(|&c| c / first * initial_capital).collect()
}

/// Annualized Sharpe ratio from daily returns of the equity curve.
///
/// Sharpe = mean(daily returns) / std(daily returns) * sqrt(252).
/// Returns 0.0 when the return variance is zero or there are fewer than
/// 2 observations, never NaN.
pub fn sharpe_ratio(equity_curve: &[f64]) -> f64 {
    let returns = daily_returns(equity_curve);
    if returns.len() < 2 {
        return 0.0;
    }
    let mean = mean_f64(&returns);
    let std = std_dev(&returns);
    if std < 1e-15 {
        return 0.0;
    }
    (mean / std) * (252.0_f64).sqrt()
}

/// Maximum drawdown as a positive percent of the running peak.
///
/// Returns 0.0 for constant or monotonically increasing equity.
pub fn max_drawdown_pct(equity_curve: &[f64]) -> f64 {
    if equity_curve.len() < 2 {
        return 0.0;
    }
    let mut peak = equity_curve[0];
    let mut max_dd = 0.0_f64;

    for &eq in equity_curve {
        if eq > peak {
            peak = eq;
        }
        if peak > 0.0 {
            let dd = (peak - eq) / peak * 100.0;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Win rate: fraction of trades classified as winners. Zero when empty.
pub fn win_rate(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let winners = trades.iter().filter(|t| t.is_winner()).count();
    winners as f64 / trades.len() as f64
}

// ─── Helpers ────────────────────────────────────────────────────────

/// Simple returns between consecutive curve points.
pub fn daily_returns(equity_curve: &[f64]) -> Vec<f64> {
    if equity_curve.len() < 2 {
        return Vec::new();
    }
    equity_curve
        .windows(2)
        .map(|w| if w[0] > 0.0 { (w[1] - w[0]) / w[0] } else { 0.0 })
        .collect()
}

pub(crate) fn mean_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean_f64(values);
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use edgelab_core::{ExitReason, Trade};

    fn make_trade(pnl_pct: f64) -> Trade {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        Trade {
            entry_date: date,
            entry_price: 100.0,
            exit_date: date + chrono::Duration::days(5),
            exit_price: 100.0 * (1.0 + pnl_pct / 100.0),
            pnl_pct,
            result: Trade::classify(pnl_pct),
            exit_reason: ExitReason::SignalExit,
        }
    }

    // ── Return ──

    #[test]
    fn return_pct_basic() {
        assert!((return_pct(100_000.0, 110_000.0) - 10.0).abs() < 1e-10);
        assert!((return_pct(100_000.0, 90_000.0) + 10.0).abs() < 1e-10);
    }

    #[test]
    fn return_pct_degenerate_initial() {
        assert_eq!(return_pct(0.0, 110_000.0), 0.0);
    }

    // ── Market curve ──

    #[test]
    fn market_curve_scales_from_first_close() {
        let curve = market_curve(&[100.0, 110.0, 105.0], 100_000.0);
        assert!((curve[0] - 100_000.0).abs() < 1e-10);
        assert!((curve[1] - 110_000.0).abs() < 1e-10);
        assert!((curve[2] - 105_000.0).abs() < 1e-10);
    }

    #[test]
    fn market_curve_empty() {
        assert!(market_curve(&[], 100_000.0).is_empty());
    }

    // ── Sharpe ──

    #[test]
    fn sharpe_constant_equity_is_zero() {
        let eq = vec![100_000.0; 100];
        assert_eq!(sharpe_ratio(&eq), 0.0);
    }

    #[test]
    fn sharpe_constant_return_is_zero() {
        // Perfectly constant daily return → zero std → Sharpe = 0, not NaN
        let mut eq = vec![100_000.0];
        for i in 1..253 {
            eq.push(eq[i - 1] * 1.001);
        }
        assert_eq!(sharpe_ratio(&eq), 0.0);
    }

    #[test]
    fn sharpe_positive_for_uptrending_noise() {
        let mut eq = vec![100_000.0];
        for i in 1..253 {
            let r = if i % 2 == 0 { 1.002 } else { 1.0005 };
            eq.push(eq[i - 1] * r);
        }
        let s = sharpe_ratio(&eq);
        assert!(s > 5.0, "Sharpe should be high for steady gains, got {s}");
    }

    #[test]
    fn sharpe_single_point() {
        assert_eq!(sharpe_ratio(&[100_000.0]), 0.0);
    }

    // ── Drawdown ──

    #[test]
    fn max_drawdown_known() {
        let eq = vec![100_000.0, 110_000.0, 90_000.0, 95_000.0];
        // Peak 110k, trough 90k → 18.18%
        let expected = (110_000.0 - 90_000.0) / 110_000.0 * 100.0;
        assert!((max_drawdown_pct(&eq) - expected).abs() < 1e-10);
    }

    #[test]
    fn max_drawdown_monotonic_is_zero() {
        let eq: Vec<f64> = (0..100).map(|i| 100_000.0 + i as f64 * 100.0).collect();
        assert_eq!(max_drawdown_pct(&eq), 0.0);
    }

    #[test]
    fn max_drawdown_is_positive_percent() {
        let eq = vec![100_000.0, 50_000.0];
        assert!((max_drawdown_pct(&eq) - 50.0).abs() < 1e-10);
    }

    // ── Win rate ──

    #[test]
    fn win_rate_mixed() {
        let trades = vec![
            make_trade(5.0),
            make_trade(-2.0),
            make_trade(3.0),
            make_trade(-1.0),
        ];
        assert!((win_rate(&trades) - 0.5).abs() < 1e-10);
    }

    #[test]
    fn win_rate_empty() {
        assert_eq!(win_rate(&[]), 0.0);
    }

    // ── Aggregate report ──

    #[test]
    fn report_zero_trades_is_valid() {
        let eq = vec![100_000.0; 50];
        let closes = vec![100.0; 50];
        let report = PerformanceReport::compute(&eq, &[], &closes, 100_000.0);

        assert_eq!(report.num_trades, 0);
        assert_eq!(report.strategy_return_pct, 0.0);
        assert_eq!(report.final_portfolio_value, 100_000.0);
        assert!(report.sharpe_ratio.is_finite());
        assert!(report.max_drawdown_pct.is_finite());
    }

    #[test]
    fn report_benchmark_comparison() {
        // Market doubles; strategy stays flat
        let closes: Vec<f64> = (0..10).map(|i| 100.0 + i as f64 * (100.0 / 9.0)).collect();
        let eq = vec![100_000.0; 11];
        let report = PerformanceReport::compute(&eq, &[], &closes, 100_000.0);

        assert!((report.market_return_pct - 100.0).abs() < 1e-6);
        assert_eq!(report.strategy_return_pct, 0.0);
        assert!((report.market_buy_hold_value - 200_000.0).abs() < 1e-6);
    }

    #[test]
    fn report_serialization_roundtrip() {
        let report = PerformanceReport::compute(
            &[100_000.0, 101_000.0, 102_500.0],
            &[make_trade(2.5)],
            &[100.0, 101.0, 102.0],
            100_000.0,
        );
        let json = serde_json::to_string(&report).unwrap();
        let deser: PerformanceReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report.num_trades, deser.num_trades);
        assert!((report.strategy_return_pct - deser.strategy_return_pct).abs() < 1e-12);
    }
}
