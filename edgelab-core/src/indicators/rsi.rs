//! Relative Strength Index (RSI).
//!
//! Average gains and losses from daily close deltas, smoothed with the
//! no-bias-correction recursive EWM at alpha = 1/period (Wilder decay),
//! seeded at the first delta. RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//! Warm-up: the first `period` values are undefined.
//!
//! Division guard (zero average loss would otherwise saturate the ratio):
//! both averages zero → 50; zero loss → 100; zero gain → 0.

use super::ema::wilder_ema;

/// RSI over close prices. Defined from index `period`.
pub fn rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    assert!(period >= 1, "RSI period must be >= 1");
    let n = closes.len();
    let mut out = vec![None; n];
    if n < period + 1 {
        return out;
    }

    // Delta series starts at bar 1; gains[i-1] belongs to bar i.
    let mut gains = Vec::with_capacity(n - 1);
    let mut losses = Vec::with_capacity(n - 1);
    for i in 1..n {
        let change = closes[i] - closes[i - 1];
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let avg_gain = wilder_ema(&gains, period);
    let avg_loss = wilder_ema(&losses, period);

    for i in period..n {
        out[i] = Some(rsi_value(avg_gain[i - 1], avg_loss[i - 1]));
    }

    out
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // no movement
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
