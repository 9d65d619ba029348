//! Exponentially weighted means, no bias correction.
//!
//! Recursive form: `ema[t] = ema[t-1] + alpha * (x[t] - ema[t-1])`, seeded
//! at the first value. Two parameterizations:
//! - `ema`: alpha = 2 / (span + 1) (MACD-style spans)
//! - `wilder_ema`: alpha = 1 / period (RSI/ADX smoothing)
//!
//! The recursive form is defined for every index; there is no hard warm-up
//! window, unlike the windowed indicators.

fn ewm(values: &[f64], alpha: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut prev = match values.first() {
        Some(&v) => v,
        None => return out,
    };
    out.push(prev);
    for &v in &values[1..] {
        prev += alpha * (v - prev);
        out.push(prev);
    }
    out
}

/// Span-parameterized EMA: alpha = 2 / (span + 1).
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    assert!(span >= 1, "EMA span must be >= 1");
    ewm(values, 2.0 / (span as f64 + 1.0))
}

/// Wilder-parameterized EMA: alpha = 1 / period.
pub fn wilder_ema(values: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "Wilder period must be >= 1");
    ewm(values, 1.0 / period as f64)
}
