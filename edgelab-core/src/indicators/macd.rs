//! MACD — Moving Average Convergence Divergence.
//!
//! Line: EMA(fast) - EMA(slow). Signal: EMA(signal_span) of the line.
//! Histogram: line - signal. All EMAs use the no-bias-correction recursive
//! form seeded at the first value, so every column is defined from index 0.

use super::ema::ema;

/// The three MACD series, aligned to the input index.
#[derive(Debug, Clone)]
pub struct MacdOutput {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// MACD over close prices with the given spans (12/26/9 default upstream).
pub fn macd(closes: &[f64], fast_span: usize, slow_span: usize, signal_span: usize) -> MacdOutput {
    assert!(
        fast_span < slow_span,
        "MACD fast span must be shorter than slow span"
    );

    let fast = ema(closes, fast_span);
    let slow = ema(closes, slow_span);
    let line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal = ema(&line, signal_span);
    let histogram: Vec<f64> = line.iter().zip(&signal).map(|(l, s)| l - s).collect();

    MacdOutput {
        line,
        signal,
        histogram,
    }
}
