//! Performance aggregation — pure functions from a finished run to
//! summary statistics. Every reported field is rounded to 2 decimals.

use crate::domain::state::round2;
use crate::domain::{RunState, Trade};
use serde::{Deserialize, Serialize};

/// Aggregate statistics for one backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub win_rate: f64,
    pub total_return: f64,
    pub total_return_percent: f64,
    pub final_balance: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    /// Gross wins over gross losses; `None` when there are no losing
    /// trades (serialized as null rather than a sentinel).
    pub profit_factor: Option<f64>,
    pub max_drawdown: f64,
    pub max_drawdown_percent: f64,
}

impl Summary {
    /// Reduce a completed run into summary statistics.
    pub fn compute(state: &RunState, initial_capital: f64) -> Self {
        let trades = &state.trades;
        // A trade with result_usd == 0 belongs to neither bucket.
        let winners: Vec<&Trade> = trades.iter().filter(|t| t.result_usd > 0.0).collect();
        let losers: Vec<&Trade> = trades.iter().filter(|t| t.result_usd < 0.0).collect();

        let win_rate = if trades.is_empty() {
            0.0
        } else {
            winners.len() as f64 / trades.len() as f64 * 100.0
        };

        let gross_win: f64 = winners.iter().map(|t| t.result_usd).sum();
        let gross_loss: f64 = losers.iter().map(|t| t.result_usd.abs()).sum();

        let avg_win = if winners.is_empty() {
            0.0
        } else {
            gross_win / winners.len() as f64
        };
        let avg_loss = if losers.is_empty() {
            0.0
        } else {
            gross_loss / losers.len() as f64
        };

        let profit_factor = if losers.is_empty() {
            None
        } else {
            Some(round2(gross_win / gross_loss))
        };

        let final_balance = state.current_balance;
        let total_return = final_balance - initial_capital;
        let (max_drawdown, max_drawdown_percent) =
            balance_drawdown(&state.balance_curve(initial_capital));

        Self {
            total_trades: trades.len(),
            winning_trades: winners.len(),
            losing_trades: losers.len(),
            win_rate: round2(win_rate),
            total_return: round2(total_return),
            total_return_percent: round2(total_return / initial_capital * 100.0),
            final_balance: round2(final_balance),
            avg_win: round2(avg_win),
            avg_loss: round2(avg_loss),
            profit_factor,
            max_drawdown: round2(max_drawdown),
            max_drawdown_percent: round2(max_drawdown_percent),
        }
    }
}

/// Peak-to-trough decline of the balance curve, as a positive USD
/// amount and as percent of the peak at the time. Returns (0, 0) for a
/// flat or monotonically rising curve.
fn balance_drawdown(curve: &[f64]) -> (f64, f64) {
    let mut peak = f64::MIN;
    let mut max_dd = 0.0_f64;
    let mut max_dd_pct = 0.0_f64;

    for &balance in curve {
        if balance > peak {
            peak = balance;
        }
        let dd = peak - balance;
        if dd > max_dd {
            max_dd = dd;
            max_dd_pct = if peak > 0.0 { dd / peak * 100.0 } else { 0.0 };
        }
    }
    (max_dd, max_dd_pct)
}
