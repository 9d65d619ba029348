//! The closed set of strategy kinds and their buy/sell conditions.
//!
//! Each variant carries its own predicate pair over the indicator frame.
//! Crossovers are detected as "condition true today AND false yesterday";
//! a condition over an indicator that is still warming up on either day
//! does not fire. Unknown strategy names are rejected at construction.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::PriceBar;
use crate::indicators::IndicatorFrame;

/// Strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    GoldenCross,
    Rsi,
    Macd,
    Composite,
    Momentum,
    MeanReversion,
    Breakout,
}

/// Errors from strategy construction.
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error(
        "unknown strategy '{0}' (expected one of: golden_cross, rsi, macd, \
         composite, momentum, mean_reversion, breakout)"
    )]
    InvalidStrategy(String),
}

impl Strategy {
    pub const ALL: [Strategy; 7] = [
        Strategy::GoldenCross,
        Strategy::Rsi,
        Strategy::Macd,
        Strategy::Composite,
        Strategy::Momentum,
        Strategy::MeanReversion,
        Strategy::Breakout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::GoldenCross => "golden_cross",
            Strategy::Rsi => "rsi",
            Strategy::Macd => "macd",
            Strategy::Composite => "composite",
            Strategy::Momentum => "momentum",
            Strategy::MeanReversion => "mean_reversion",
            Strategy::Breakout => "breakout",
        }
    }

    /// Buy condition at bar `t`.
    pub(crate) fn buy_trigger(&self, bars: &[PriceBar], frame: &IndicatorFrame, t: usize) -> bool {
        match self {
            Strategy::GoldenCross => golden_cross_up(frame, t),
            Strategy::Rsi => rsi_crossed_below(frame, t, 30.0),
            Strategy::Macd => macd_crossed_up(frame, t),
            Strategy::Composite => {
                (golden_cross_up(frame, t) || macd_crossed_up(frame, t))
                    && volume_above_ma(bars, frame, t, 1.0)
                    && defined_gt(frame.adx[t], Some(20.0))
                    && defined_gt(frame.plus_di[t], frame.minus_di[t])
            }
            Strategy::Momentum => {
                close_above(bars, &frame.sma_short, t)
                    && defined_gt(frame.momentum_pct[t], Some(2.0))
                    && volume_above_ma(bars, frame, t, 1.0)
            }
            Strategy::MeanReversion => {
                close_below(bars, &frame.bollinger_lower, t)
                    && defined_lt(frame.rsi[t], Some(35.0))
            }
            Strategy::Breakout => {
                price_crossed_above(bars, &frame.sma_short, t)
                    && volume_above_ma(bars, frame, t, 1.5)
                    && defined_gt(frame.adx[t], Some(25.0))
            }
        }
    }

    /// Sell condition at bar `t`. Wins over a simultaneous buy trigger.
    pub(crate) fn sell_trigger(&self, bars: &[PriceBar], frame: &IndicatorFrame, t: usize) -> bool {
        match self {
            Strategy::GoldenCross => golden_cross_down(frame, t),
            Strategy::Rsi => rsi_crossed_above(frame, t, 70.0),
            Strategy::Macd => macd_crossed_down(frame, t),
            Strategy::Composite => defined_lt(frame.plus_di[t], frame.minus_di[t]),
            Strategy::Momentum => {
                defined_lt(frame.momentum_pct[t], Some(-1.0))
                    || close_below(bars, &frame.sma_short, t)
            }
            Strategy::MeanReversion => {
                close_above(bars, &frame.bollinger_upper, t)
                    || defined_gt(frame.rsi[t], Some(65.0))
            }
            Strategy::Breakout => {
                close_below(bars, &frame.sma_short, t)
                    && defined_gt(frame.minus_di[t], frame.plus_di[t])
            }
        }
    }
}

impl FromStr for Strategy {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "golden_cross" => Ok(Strategy::GoldenCross),
            "rsi" => Ok(Strategy::Rsi),
            "macd" => Ok(Strategy::Macd),
            "composite" => Ok(Strategy::Composite),
            "momentum" => Ok(Strategy::Momentum),
            "mean_reversion" => Ok(Strategy::MeanReversion),
            "breakout" => Ok(Strategy::Breakout),
            other => Err(StrategyError::InvalidStrategy(other.to_string())),
        }
    }
}

// ── Condition helpers ────────────────────────────────────────────────

/// Both defined and a > b.
fn defined_gt(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a > b)
}

/// Both defined and a < b.
fn defined_lt(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a < b)
}

/// Crossover: condition defined-true today, defined-false yesterday.
fn crossed(today: Option<bool>, yesterday: Option<bool>) -> bool {
    today == Some(true) && yesterday == Some(false)
}

fn ma_relation(frame: &IndicatorFrame, t: usize) -> Option<bool> {
    Some(frame.sma_short[t]? > frame.sma_long[t]?)
}

fn golden_cross_up(frame: &IndicatorFrame, t: usize) -> bool {
    t >= 1 && crossed(ma_relation(frame, t), ma_relation(frame, t - 1))
}

fn golden_cross_down(frame: &IndicatorFrame, t: usize) -> bool {
    t >= 1
        && crossed(
            ma_relation(frame, t).map(|above| !above),
            ma_relation(frame, t - 1).map(|above| !above),
        )
}

fn macd_crossed_up(frame: &IndicatorFrame, t: usize) -> bool {
    t >= 1
        && frame.macd[t] > frame.macd_signal[t]
        && frame.macd[t - 1] <= frame.macd_signal[t - 1]
}

fn macd_crossed_down(frame: &IndicatorFrame, t: usize) -> bool {
    t >= 1
        && frame.macd[t] < frame.macd_signal[t]
        && frame.macd[t - 1] >= frame.macd_signal[t - 1]
}

fn rsi_crossed_below(frame: &IndicatorFrame, t: usize, level: f64) -> bool {
    t >= 1
        && crossed(
            frame.rsi[t].map(|r| r < level),
            frame.rsi[t - 1].map(|r| r < level),
        )
}

fn rsi_crossed_above(frame: &IndicatorFrame, t: usize, level: f64) -> bool {
    t >= 1
        && crossed(
            frame.rsi[t].map(|r| r > level),
            frame.rsi[t - 1].map(|r| r > level),
        )
}

fn price_crossed_above(bars: &[PriceBar], ma: &[Option<f64>], t: usize) -> bool {
    t >= 1
        && crossed(
            ma[t].map(|m| bars[t].close > m),
            ma[t - 1].map(|m| bars[t - 1].close > m),
        )
}

fn close_above(bars: &[PriceBar], column: &[Option<f64>], t: usize) -> bool {
    column[t].map(|v| bars[t].close > v).unwrap_or(false)
}

fn close_below(bars: &[PriceBar], column: &[Option<f64>], t: usize) -> bool {
    column[t].map(|v| bars[t].close < v).unwrap_or(false)
}

fn volume_above_ma(bars: &[PriceBar], frame: &IndicatorFrame, t: usize, factor: f64) -> bool {
    frame.volume_ma[t]
        .map(|m| bars[t].volume as f64 > factor * m)
        .unwrap_or(false)
}
