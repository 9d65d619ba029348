//! Open position state and trailing stop evaluation.

use chrono::NaiveDate;

use crate::domain::{ExitReason, PriceBar};

/// The Long half of the engine's two-state machine.
#[derive(Debug, Clone)]
pub(crate) struct OpenPosition {
    pub shares: f64,
    pub entry_price: f64,
    pub entry_date: NaiveDate,
    /// Highest high observed since entry; the trailing stop ratchets off it.
    pub highest_price: f64,
}

impl OpenPosition {
    pub fn open(shares: f64, entry_price: f64, entry_date: NaiveDate) -> Self {
        Self {
            shares,
            entry_price,
            entry_date,
            highest_price: entry_price,
        }
    }

    /// Ratchet the reference high. The stop only ever tightens.
    pub fn observe_high(&mut self, high: f64) {
        if high > self.highest_price {
            self.highest_price = high;
        }
    }

    /// Trailing stop level: highest high since entry minus `multiplier` ATRs.
    /// Undefined while ATR is warming up or stop management is disabled.
    pub fn stop_price(&self, atr: Option<f64>, multiplier: f64) -> Option<f64> {
        if multiplier <= 0.0 {
            return None;
        }
        atr.map(|a| self.highest_price - multiplier * a)
    }

    /// Check the next bar against the trailing stop.
    ///
    /// Opening below the stop is a gap: the fill happens at the open, worse
    /// than the stop itself. Otherwise a low below the stop fills at the
    /// stop price, an estimate of the intraday exit.
    pub fn stop_exit(
        &self,
        next: &PriceBar,
        atr: Option<f64>,
        multiplier: f64,
    ) -> Option<(f64, ExitReason)> {
        let stop = self.stop_price(atr, multiplier)?;
        if next.open < stop {
            Some((next.open, ExitReason::StopLossGap))
        } else if next.low < stop {
            Some((stop, ExitReason::StopLossIntraday))
        } else {
            None
        }
    }
}
