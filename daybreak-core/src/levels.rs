//! Daily reference levels — each day's high/low plus the previous day's.
//!
//! The previous day is the previous day *in the series*, not the
//! calendar-adjacent day: with gaps in the data, a Monday's reference
//! levels may come from the prior Friday.

use crate::domain::Bar;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// High/low of one calendar day together with the previous day's levels.
///
/// `previous_*` are `None` for the first day in the series; no signal is
/// possible on that day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayLevels {
    pub date: NaiveDate,
    pub current_high: f64,
    pub current_low: f64,
    pub previous_high: Option<f64>,
    pub previous_low: Option<f64>,
}

/// Group an ordered bar sequence by UTC calendar day and compute each
/// day's levels. Empty input yields an empty map (no signals possible);
/// this function never errors.
pub fn day_levels(bars: &[Bar]) -> BTreeMap<NaiveDate, DayLevels> {
    let mut levels: BTreeMap<NaiveDate, DayLevels> = BTreeMap::new();
    let mut previous: Option<(f64, f64)> = None;
    let mut current: Option<DayLevels> = None;

    for bar in bars {
        let date = bar.date();
        match current.as_mut() {
            Some(day) if day.date == date => {
                day.current_high = day.current_high.max(bar.high);
                day.current_low = day.current_low.min(bar.low);
            }
            _ => {
                if let Some(done) = current.take() {
                    previous = Some((done.current_high, done.current_low));
                    levels.insert(done.date, done);
                }
                current = Some(DayLevels {
                    date,
                    current_high: bar.high,
                    current_low: bar.low,
                    previous_high: previous.map(|(h, _)| h),
                    previous_low: previous.map(|(_, l)| l),
                });
            }
        }
    }
    if let Some(done) = current {
        levels.insert(done.date, done);
    }
    levels
}
