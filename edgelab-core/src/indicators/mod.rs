//! Indicator pipeline — derives technical indicator columns from a bar series.
//!
//! Columns are struct-of-arrays, all aligned to the bar index and computed
//! once before the bar loop. Windowed indicators are `Option<f64>` columns:
//! `None` means "not yet warmed up", a state explicitly distinct from zero.
//! The recursive EMA columns (MACD family) have no hard warm-up window and
//! are plain `f64`.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod momentum;
pub mod rsi;
pub mod sma;
pub mod volume;

pub use adx::{directional, DirectionalOutput};
pub use atr::{atr, true_range};
pub use bollinger::{bollinger, BollingerOutput};
pub use ema::{ema, wilder_ema};
pub use macd::{macd, MacdOutput};
pub use momentum::{momentum, momentum_pct};
pub use rsi::rsi;
pub use sma::sma;
pub use volume::{volume_sma, volume_spike};

use crate::domain::PriceBar;
use serde::{Deserialize, Serialize};

/// Lookback windows and multipliers for the full pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndicatorParams {
    pub sma_short: usize,
    pub sma_long: usize,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub atr_period: usize,
    pub adx_period: usize,
    pub volume_window: usize,
    pub volume_spike_factor: f64,
    pub momentum_period: usize,
    pub bollinger_period: usize,
    pub bollinger_width: f64,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            sma_short: 50,
            sma_long: 200,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            atr_period: 14,
            adx_period: 14,
            volume_window: 20,
            volume_spike_factor: 2.0,
            momentum_period: 10,
            bollinger_period: 20,
            bollinger_width: 2.0,
        }
    }
}

/// All indicator columns for one bar series, aligned by index.
#[derive(Debug, Clone)]
pub struct IndicatorFrame {
    pub sma_short: Vec<Option<f64>>,
    pub sma_long: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub macd: Vec<f64>,
    pub macd_signal: Vec<f64>,
    pub macd_histogram: Vec<f64>,
    pub atr: Vec<Option<f64>>,
    pub plus_di: Vec<Option<f64>>,
    pub minus_di: Vec<Option<f64>>,
    pub adx: Vec<Option<f64>>,
    pub volume_ma: Vec<Option<f64>>,
    pub volume_spike: Vec<bool>,
    pub momentum: Vec<Option<f64>>,
    pub momentum_pct: Vec<Option<f64>>,
    pub bollinger_upper: Vec<Option<f64>>,
    pub bollinger_middle: Vec<Option<f64>>,
    pub bollinger_lower: Vec<Option<f64>>,
}

impl IndicatorFrame {
    /// Compute every column over the full bar slice.
    pub fn compute(bars: &[PriceBar], params: &IndicatorParams) -> Self {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let volumes: Vec<u64> = bars.iter().map(|b| b.volume).collect();

        let macd_out = macd(&closes, params.macd_fast, params.macd_slow, params.macd_signal);
        let atr_col = atr(bars, params.atr_period);
        let dir = directional(bars, params.adx_period, &atr_col);
        let vol_ma = volume_sma(&volumes, params.volume_window);
        let vol_spike = volume_spike(&volumes, &vol_ma, params.volume_spike_factor);
        let bands = bollinger(&closes, params.bollinger_period, params.bollinger_width);

        Self {
            sma_short: sma(&closes, params.sma_short),
            sma_long: sma(&closes, params.sma_long),
            rsi: rsi(&closes, params.rsi_period),
            macd: macd_out.line,
            macd_signal: macd_out.signal,
            macd_histogram: macd_out.histogram,
            atr: atr_col,
            plus_di: dir.plus_di,
            minus_di: dir.minus_di,
            adx: dir.adx,
            volume_ma: vol_ma,
            volume_spike: vol_spike,
            momentum: momentum(&closes, params.momentum_period),
            momentum_pct: momentum_pct(&closes, params.momentum_period),
            bollinger_upper: bands.upper,
            bollinger_middle: bands.middle,
            bollinger_lower: bands.lower,
        }
    }

    /// Number of bars the frame covers.
    pub fn len(&self) -> usize {
        self.macd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<PriceBar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000,
            }
        })
        .collect()
}

/// Create bars from explicit (open, high, low, close) tuples for testing.
#[cfg(test)]
pub fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<PriceBar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| PriceBar {
            date: base_date + chrono::Duration::days(i as i64),
            open,
            high,
            low,
            close,
            volume: 1000,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_columns_align() {
        let bars = make_bars(&(0..60).map(|i| 100.0 + i as f64 * 0.5).collect::<Vec<_>>());
        let params = IndicatorParams {
            sma_short: 5,
            sma_long: 20,
            ..IndicatorParams::default()
        };
        let frame = IndicatorFrame::compute(&bars, &params);

        assert_eq!(frame.len(), bars.len());
        assert_eq!(frame.sma_short.len(), bars.len());
        assert_eq!(frame.adx.len(), bars.len());
        assert_eq!(frame.volume_spike.len(), bars.len());
        assert_eq!(frame.bollinger_lower.len(), bars.len());
    }

    #[test]
    fn warmup_is_none_not_zero() {
        let bars = make_bars(&(0..30).map(|i| 100.0 + i as f64).collect::<Vec<_>>());
        let params = IndicatorParams {
            sma_short: 10,
            sma_long: 20,
            ..IndicatorParams::default()
        };
        let frame = IndicatorFrame::compute(&bars, &params);

        assert!(frame.sma_short[8].is_none());
        assert!(frame.sma_short[9].is_some());
        assert!(frame.rsi[13].is_none());
        assert!(frame.rsi[14].is_some());
        assert!(frame.atr[13].is_none());
        assert!(frame.atr[14].is_some());
    }

    #[test]
    fn frame_on_empty_bars() {
        let frame = IndicatorFrame::compute(&[], &IndicatorParams::default());
        assert!(frame.is_empty());
        assert_eq!(frame.len(), 0);
    }
}
