//! Trade — a completed round-trip: entry → exit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Win/loss classification of a closed trade.
///
/// A trade with exactly zero pnl counts as a loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeResult {
    Win,
    Loss,
}

/// Why a position was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitReason {
    /// The strategy signal turned flat; exit at the next bar's open.
    #[serde(rename = "Signal Exit")]
    SignalExit,
    /// The next bar opened below the trailing stop; exit at that open,
    /// which is worse than the stop itself.
    #[serde(rename = "Stop Loss (Gap)")]
    StopLossGap,
    /// The next bar traded through the trailing stop intraday; exit at the
    /// stop price (an estimate of the realized fill).
    #[serde(rename = "Stop Loss (Intraday)")]
    StopLossIntraday,
}

impl ExitReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExitReason::SignalExit => "Signal Exit",
            ExitReason::StopLossGap => "Stop Loss (Gap)",
            ExitReason::StopLossIntraday => "Stop Loss (Intraday)",
        }
    }
}

/// A complete round-trip trade record.
///
/// Created when a position opens and closed exactly once; the engine holds
/// at most one open position at any time, so trades never overlap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub entry_date: NaiveDate,
    pub entry_price: f64,
    pub exit_date: NaiveDate,
    pub exit_price: f64,
    /// Percent return on the entry price, before transaction costs.
    pub pnl_pct: f64,
    pub result: TradeResult,
    pub exit_reason: ExitReason,
}

impl Trade {
    /// Classify a pnl percentage: strictly positive is a win.
    pub fn classify(pnl_pct: f64) -> TradeResult {
        if pnl_pct > 0.0 {
            TradeResult::Win
        } else {
            TradeResult::Loss
        }
    }

    pub fn is_winner(&self) -> bool {
        self.result == TradeResult::Win
    }
}
