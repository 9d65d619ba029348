//! ADX / DI — Average Directional Index and Directional Indicators.
//!
//! Steps:
//! 1. +DM = max(high[t] - high[t-1], 0); -DM = max(low[t-1] - low[t], 0)
//! 2. Smooth both with the Wilder alpha = 1/period recursive EWM
//! 3. ±DI = 100 * smoothed DM / ATR (defined where ATR is defined)
//! 4. DX = 100 * |+DI - -DI| / (+DI + -DI), zero denominator → 0
//! 5. ADX = trailing simple mean of DX over `period`
//!
//! Warm-up: DI from index `period` (with ATR), ADX from roughly 2x period.

use crate::domain::PriceBar;
use crate::indicators::atr::trailing_mean;
use crate::indicators::ema::wilder_ema;

/// The directional series: +DI, -DI, and ADX, aligned to the bar index.
#[derive(Debug, Clone)]
pub struct DirectionalOutput {
    pub plus_di: Vec<Option<f64>>,
    pub minus_di: Vec<Option<f64>>,
    pub adx: Vec<Option<f64>>,
}

/// Compute +DI / -DI / ADX. Takes the precomputed ATR column so the two
/// indicators share one TR pass.
pub fn directional(bars: &[PriceBar], period: usize, atr: &[Option<f64>]) -> DirectionalOutput {
    assert!(period >= 1, "ADX period must be >= 1");
    let n = bars.len();
    assert_eq!(atr.len(), n, "ATR column must align with bars");

    let mut plus_di = vec![None; n];
    let mut minus_di = vec![None; n];
    let mut dx = vec![None; n];

    // DM series starts at bar 1; plus_dm[i-1] belongs to bar i.
    let mut plus_dm = Vec::with_capacity(n.saturating_sub(1));
    let mut minus_dm = Vec::with_capacity(n.saturating_sub(1));
    for i in 1..n {
        plus_dm.push((bars[i].high - bars[i - 1].high).max(0.0));
        minus_dm.push((bars[i - 1].low - bars[i].low).max(0.0));
    }

    let smooth_plus = wilder_ema(&plus_dm, period);
    let smooth_minus = wilder_ema(&minus_dm, period);

    for i in 1..n {
        let Some(a) = atr[i] else { continue };
        let (p, m) = if a > 0.0 {
            (100.0 * smooth_plus[i - 1] / a, 100.0 * smooth_minus[i - 1] / a)
        } else {
            (0.0, 0.0) // zero range ⇒ no directional movement either
        };
        plus_di[i] = Some(p);
        minus_di[i] = Some(m);

        let di_sum = p + m;
        dx[i] = Some(if di_sum == 0.0 {
            0.0
        } else {
            100.0 * (p - m).abs() / di_sum
        });
    }

    DirectionalOutput {
        plus_di,
        minus_di,
        adx: trailing_mean(&dx, period),
    }
}
