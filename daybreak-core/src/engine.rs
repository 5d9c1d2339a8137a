//! Full pipeline: bars → levels → signals → sequential trade fold.

use crate::config::StrategyParams;
use crate::domain::{Bar, RunState, Signal};
use crate::error::EngineError;
use crate::levels::{self, DayLevels};
use crate::schedule;
use crate::simulate;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Everything a caller needs to build a report from one run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub state: RunState,
    pub signals: Vec<Signal>,
    pub levels: BTreeMap<NaiveDate, DayLevels>,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub total_days: usize,
}

/// Run the whole backtest over an ordered bar sequence.
///
/// Parameters are validated first and bar ordering is checked before
/// any simulation; at least two distinct calendar days are required,
/// since the first day has no reference levels. Trades are simulated as
/// a left-fold over days in chronological order — trade N's position
/// size reads the balance trade N−1 left, which makes the sequential
/// ordering a correctness requirement, not an optimization.
pub fn run_backtest(bars: &[Bar], params: &StrategyParams) -> Result<RunOutput, EngineError> {
    params.validate()?;

    for (index, pair) in bars.windows(2).enumerate() {
        if pair[1].open_time <= pair[0].open_time {
            return Err(EngineError::UnorderedBars { index: index + 1 });
        }
    }

    let levels = levels::day_levels(bars);
    if levels.len() < 2 {
        return Err(EngineError::InsufficientData { days: levels.len() });
    }

    let signals = schedule::scan(bars, &levels);
    let mut by_date: BTreeMap<NaiveDate, &Signal> =
        signals.iter().map(|s| (s.date, s)).collect();

    let mut state = RunState::new(params.initial_capital);
    for date in levels.keys() {
        state = match by_date.remove(date) {
            Some(signal) => {
                let id = state.trades.len() + 1;
                let trade =
                    simulate::simulate_trade(id, signal, bars, state.current_balance, params);
                state.record_trade(trade)
            }
            None => state.record_flat_day(*date),
        };
    }

    let first_date = *levels.keys().next().expect("levels checked non-empty");
    let last_date = *levels.keys().next_back().expect("levels checked non-empty");
    Ok(RunOutput {
        total_days: levels.len(),
        first_date,
        last_date,
        state,
        signals,
        levels,
    })
}
