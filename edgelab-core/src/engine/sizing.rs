//! Volatility-based position sizing.
//!
//! Risk a fixed fraction of current equity per trade, with the stop
//! distance at 2 ATRs:
//!
//! ```text
//! risk_budget   = equity * risk_per_trade
//! stop_distance = 2 * ATR
//! target_shares = risk_budget / stop_distance
//! ```
//!
//! Capped by what cash can actually buy at the fill price including the
//! transaction cost. When ATR is undefined (or zero — a zero stop distance
//! cannot size a position), the target falls back to the full-equity
//! purchase. A buy that cannot be afforded at all is rejected whole, never
//! partially filled.

use super::config::EngineConfig;

/// Stop distance in ATRs used by the sizing rule.
const SIZING_ATR_STOP: f64 = 2.0;

/// Shares to buy at `open`, or 0.0 when no position can be afforded.
pub(crate) fn size_entry(
    cash: f64,
    equity: f64,
    open: f64,
    atr: Option<f64>,
    config: &EngineConfig,
) -> f64 {
    if open <= 0.0 || cash <= 0.0 {
        return 0.0;
    }

    let max_affordable = cash / (open * (1.0 + config.tax_rate));

    let target = match atr {
        Some(a) if a > 0.0 => {
            let risk_budget = equity * config.risk_per_trade;
            risk_budget / (SIZING_ATR_STOP * a)
        }
        _ => max_affordable,
    };

    let shares = target.min(max_affordable);
    if shares.is_finite() && shares > 0.0 {
        shares
    } else {
        0.0
    }
}
