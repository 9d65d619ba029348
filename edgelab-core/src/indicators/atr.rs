//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|), undefined
//! for the first bar (no previous close). ATR is the trailing simple mean of
//! TR over `period`, defined from index `period`.

use crate::domain::PriceBar;

/// True Range series. `None` at index 0.
pub fn true_range(bars: &[PriceBar]) -> Vec<Option<f64>> {
    let n = bars.len();
    let mut tr = vec![None; n];

    for i in 1..n {
        let h = bars[i].high;
        let l = bars[i].low;
        let pc = bars[i - 1].close;
        tr[i] = Some((h - l).max((h - pc).abs()).max((l - pc).abs()));
    }

    tr
}

/// Trailing mean over a window, defined only where the whole window is defined.
///
/// Shared by ATR (mean of TR) and ADX (mean of DX).
pub(crate) fn trailing_mean(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    assert!(period >= 1, "window must be >= 1");
    let n = values.len();
    let mut out = vec![None; n];

    for t in (period - 1)..n {
        let window = &values[t + 1 - period..=t];
        if window.iter().all(|v| v.is_some()) {
            let sum: f64 = window.iter().map(|v| v.unwrap()).sum();
            out[t] = Some(sum / period as f64);
        }
    }

    out
}

/// ATR over `period`: trailing simple mean of the True Range.
pub fn atr(bars: &[PriceBar], period: usize) -> Vec<Option<f64>> {
    assert!(period >= 1, "ATR period must be >= 1");
    trailing_mean(&true_range(bars), period)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_ohlc_bars, DEFAULT_EPSILON};

    #[test]
    fn true_range_basic() {
        let bars = make_ohlc_bars(&[
            (100.0, 105.0, 95.0, 102.0),  // first bar: undefined
            (102.0, 108.0, 100.0, 106.0), // TR = max(8, |108-102|, |100-102|) = 8
            (106.0, 107.0, 98.0, 99.0),   // TR = max(9, |107-106|, |98-106|) = 9
        ]);
        let tr = true_range(&bars);
        assert!(tr[0].is_none());
        assert_approx(tr[1].unwrap(), 8.0, DEFAULT_EPSILON);
        assert_approx(tr[2].unwrap(), 9.0, DEFAULT_EPSILON);
    }

    #[test]
    fn true_range_gap_up() {
        // Gap up: prev close 100, current bar 115-108 → TR spans the gap
        let bars = make_ohlc_bars(&[
            (98.0, 102.0, 97.0, 100.0),
            (110.0, 115.0, 108.0, 112.0), // TR = max(7, |115-100|, |108-100|) = 15
        ]);
        let tr = true_range(&bars);
        assert_approx(tr[1].unwrap(), 15.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_period_3() {
        let bars = make_ohlc_bars(&[
            (100.0, 105.0, 95.0, 102.0),
            (102.0, 108.0, 100.0, 106.0), // TR = 8
            (106.0, 107.0, 98.0, 99.0),   // TR = 9
            (99.0, 103.0, 97.0, 101.0),   // TR = 6
            (101.0, 106.0, 100.0, 105.0), // TR = 6
        ]);
        let result = atr(&bars, 3);
        assert!(result[0].is_none());
        assert!(result[1].is_none());
        assert!(result[2].is_none());
        // First full TR window is [8, 9, 6]; next is [9, 6, 6]
        assert_approx(result[3].unwrap(), 23.0 / 3.0, DEFAULT_EPSILON);
        assert_approx(result[4].unwrap(), 7.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_constant_price_is_zero() {
        let bars = make_ohlc_bars(&[(100.0, 100.0, 100.0, 100.0); 6]);
        let result = atr(&bars, 3);
        assert_approx(result[5].unwrap(), 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_too_few_bars() {
        let bars = make_ohlc_bars(&[(100.0, 105.0, 95.0, 102.0)]);
        assert!(atr(&bars, 3).iter().all(|v| v.is_none()));
    }
}
