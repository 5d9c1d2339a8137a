//! Trade simulation — the leveraged exit state machine.
//!
//! A trade opens on a signal and closes exactly once:
//! `OPEN → {TIME, SL, TP, DATA_EXHAUSTION}`. Exit rules are an ordered
//! list of checks evaluated top-down on each bar after the entry bar;
//! the first match wins and the checks are never combined, so a bar
//! that would trigger both the time stop and the stop-loss closes as
//! TIME.

use crate::config::StrategyParams;
use crate::domain::{Bar, Direction, ExitReason, Signal, Trade};
use chrono::{DateTime, Utc};

/// An open position awaiting an exit.
#[derive(Debug, Clone)]
pub struct OpenTrade {
    pub direction: Direction,
    pub entry_price: f64,
    pub entry_time: DateTime<Utc>,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub max_hours: f64,
}

/// A matched exit: price, time, and the single reason assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct Exit {
    pub price: f64,
    pub time: DateTime<Utc>,
    pub reason: ExitReason,
}

type ExitCheck = fn(&OpenTrade, &Bar) -> Option<Exit>;

/// Exit rules in priority order. Reordering this list changes strategy
/// semantics; each rule is independently testable below.
const EXIT_RULES: &[ExitCheck] = &[time_stop, stop_loss, take_profit];

/// TIME: holding time from entry open to this bar's open reached the cap.
/// Closes at the bar's close.
fn time_stop(open: &OpenTrade, bar: &Bar) -> Option<Exit> {
    if hours_between(open.entry_time, bar.open_time) >= open.max_hours {
        Some(Exit {
            price: bar.close,
            time: bar.open_time,
            reason: ExitReason::Time,
        })
    } else {
        None
    }
}

/// SL: the bar's adverse extreme touched the stop. Closes at the stop
/// price itself, not the bar's low/high.
fn stop_loss(open: &OpenTrade, bar: &Bar) -> Option<Exit> {
    let hit = match open.direction {
        Direction::Long => bar.low <= open.stop_loss,
        Direction::Short => bar.high >= open.stop_loss,
    };
    hit.then(|| Exit {
        price: open.stop_loss,
        time: bar.open_time,
        reason: ExitReason::StopLoss,
    })
}

/// TP: the bar's favorable extreme touched the target. Closes at the
/// take-profit price.
fn take_profit(open: &OpenTrade, bar: &Bar) -> Option<Exit> {
    let hit = match open.direction {
        Direction::Long => bar.high >= open.take_profit,
        Direction::Short => bar.low <= open.take_profit,
    };
    hit.then(|| Exit {
        price: open.take_profit,
        time: bar.open_time,
        reason: ExitReason::TakeProfit,
    })
}

/// Run the ordered rules against one bar; first match wins.
pub fn evaluate_exit(open: &OpenTrade, bar: &Bar) -> Option<Exit> {
    EXIT_RULES.iter().find_map(|rule| rule(open, bar))
}

fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_seconds() as f64 / 3600.0
}

/// Simulate one signal against all bars after its entry bar.
///
/// `balance_at_entry` is the running balance the previous trade left
/// behind; position size and the risk-to-price conversion are computed
/// once here, so compounding changes sizing trade to trade. If no bar
/// in the remaining sequence triggers an exit, the trade closes at the
/// last supplied bar's close with reason DATA_EXHAUSTION — end of
/// supplied data, not end of calendar day.
pub fn simulate_trade(
    id: usize,
    signal: &Signal,
    bars: &[Bar],
    balance_at_entry: f64,
    params: &StrategyParams,
) -> Trade {
    let entry_bar = &bars[signal.source_bar_index];
    let entry = signal.entry_price;
    let position_size = balance_at_entry * params.leverage;

    // Percent-of-capital risk divided by leverage gives the price delta.
    let sl_delta = (params.stop_loss_percent / params.leverage) / 100.0 * entry;
    let tp_delta = (params.take_profit_percent / params.leverage) / 100.0 * entry;
    let (stop_loss, take_profit) = match signal.direction {
        Direction::Long => (entry - sl_delta, entry + tp_delta),
        Direction::Short => (entry + sl_delta, entry - tp_delta),
    };

    let open = OpenTrade {
        direction: signal.direction,
        entry_price: entry,
        entry_time: entry_bar.open_time,
        stop_loss,
        take_profit,
        max_hours: params.max_hours,
    };

    let remaining = &bars[signal.source_bar_index + 1..];
    let exit = remaining
        .iter()
        .find_map(|bar| evaluate_exit(&open, bar))
        .unwrap_or_else(|| {
            // The window is "all bars after entry"; when it never
            // triggers, the final supplied bar closes the trade. With no
            // bars after entry, the entry bar itself is the last bar.
            let last = remaining.last().unwrap_or(entry_bar);
            Exit {
                price: last.close,
                time: last.open_time,
                reason: ExitReason::DataExhaustion,
            }
        });

    let price_move_percent = match signal.direction {
        Direction::Long => (exit.price - entry) / entry * 100.0,
        Direction::Short => (entry - exit.price) / entry * 100.0,
    };
    let result_usd = price_move_percent / 100.0 * balance_at_entry * params.leverage;
    let result_percent = price_move_percent * params.leverage;

    Trade {
        id,
        signal: signal.clone(),
        direction: signal.direction,
        entry_price: entry,
        entry_time: open.entry_time,
        position_size,
        stop_loss,
        take_profit,
        exit_price: exit.price,
        exit_time: exit.time,
        exit_reason: exit.reason,
        result_usd,
        result_percent,
        duration_hours: hours_between(open.entry_time, exit.time),
    }
}
