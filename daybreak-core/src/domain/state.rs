//! RunState — one backtest's balance, trades, and per-day outcomes.
//!
//! The state is threaded as a value through an explicit left-fold over
//! days, never mutated in place behind shared references. Each simulated
//! trade consumes the balance the previous trade left behind.

use super::trade::Trade;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome recorded for one calendar day of the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayOutcome {
    pub executed: bool,
    pub balance_before: f64,
    pub balance_after: f64,
    /// Leveraged return on capital for the day, 0 when no trade executed.
    pub daily_return: f64,
    pub trade: Option<Trade>,
}

impl DayOutcome {
    /// A day with no signal: balance carries through unchanged.
    pub fn flat(balance: f64) -> Self {
        Self {
            executed: false,
            balance_before: balance,
            balance_after: balance,
            daily_return: 0.0,
            trade: None,
        }
    }
}

/// Accumulated state of one backtest run. Owned exclusively by that run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub current_balance: f64,
    pub trades: Vec<Trade>,
    pub daily: BTreeMap<NaiveDate, DayOutcome>,
}

impl RunState {
    pub fn new(initial_capital: f64) -> Self {
        Self {
            current_balance: initial_capital,
            trades: Vec::new(),
            daily: BTreeMap::new(),
        }
    }

    /// Record a day without a signal; the balance is untouched.
    pub fn record_flat_day(mut self, date: NaiveDate) -> Self {
        self.daily.insert(date, DayOutcome::flat(self.current_balance));
        self
    }

    /// Fold one closed trade into the state.
    ///
    /// The new balance is `current + result_usd`, rounded to 2 decimals
    /// exactly once per trade. `balance_before` is recomputed as
    /// `balance_after − result_usd` so the accounting identity
    /// `balance_after == balance_before + result_usd` holds bit-for-bit.
    pub fn record_trade(mut self, trade: Trade) -> Self {
        let balance_after = round2(self.current_balance + trade.result_usd);
        let outcome = DayOutcome {
            executed: true,
            balance_before: balance_after - trade.result_usd,
            balance_after,
            daily_return: trade.result_percent,
            trade: Some(trade.clone()),
        };
        self.daily.insert(trade.signal.date, outcome);
        self.trades.push(trade);
        self.current_balance = balance_after;
        self
    }

    /// Balance curve for drawdown computation: initial balance followed
    /// by each day's closing balance, in date order.
    pub fn balance_curve(&self, initial_capital: f64) -> Vec<f64> {
        let mut curve = Vec::with_capacity(self.daily.len() + 1);
        curve.push(initial_capital);
        curve.extend(self.daily.values().map(|d| d.balance_after));
        curve
    }
}

/// Round to 2 decimal places. Applied exactly once per trade when the
/// balance updates; rounding order matters for compounding fidelity.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
