//! Momentum — lookback price change, absolute and percent.
//!
//! momentum[t] = close[t] - close[t-period]
//! momentum_pct[t] = (close[t] / close[t-period] - 1) * 100
//! Warm-up: the first `period` values are undefined.

/// Absolute momentum over `period`.
pub fn momentum(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    assert!(period >= 1, "momentum period must be >= 1");
    let n = closes.len();
    let mut out = vec![None; n];
    for i in period..n {
        out[i] = Some(closes[i] - closes[i - period]);
    }
    out
}

/// Percent momentum over `period`. Undefined when the base price is zero.
pub fn momentum_pct(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    assert!(period >= 1, "momentum period must be >= 1");
    let n = closes.len();
    let mut out = vec![None; n];
    for i in period..n {
        let base = closes[i - period];
        if base != 0.0 {
            out[i] = Some((closes[i] / base - 1.0) * 100.0);
        }
    }
    out
}
