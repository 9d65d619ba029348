//! Bollinger Bands — SMA middle band ± stdev multiplier.
//!
//! Middle: SMA(close, period). Upper/lower: middle ± mult * trailing stdev.
//! Uses population stddev (divide by N).
//! Warm-up: the first `period - 1` values are undefined.

/// The three bands, aligned to the input index.
#[derive(Debug, Clone)]
pub struct BollingerOutput {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Bollinger bands over close prices.
pub fn bollinger(closes: &[f64], period: usize, multiplier: f64) -> BollingerOutput {
    assert!(period >= 1, "Bollinger period must be >= 1");
    let n = closes.len();
    let mut upper = vec![None; n];
    let mut middle = vec![None; n];
    let mut lower = vec![None; n];

    for t in period.saturating_sub(1)..n {
        let window = &closes[t + 1 - period..=t];
        let mean = window.iter().sum::<f64>() / period as f64;
        let variance = window.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / period as f64;
        let band = multiplier * variance.sqrt();

        middle[t] = Some(mean);
        upper[t] = Some(mean + band);
        lower[t] = Some(mean - band);
    }

    BollingerOutput {
        upper,
        middle,
        lower,
    }
}
