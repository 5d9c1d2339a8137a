//! Signal scheduling — one signal per calendar day, first breakout wins.

use crate::detect;
use crate::domain::{Bar, Signal};
use crate::levels::DayLevels;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Walk bars in time order, classify each against its day's previous-day
/// levels, and emit at most one [`Signal`] per calendar date.
///
/// Once a date has signaled, every later bar that day is suppressed —
/// including breakouts in the opposite direction. Output is
/// chronological and date-unique. The first day of the series never
/// signals because its previous-day levels are `None`.
pub fn scan(bars: &[Bar], levels: &BTreeMap<NaiveDate, DayLevels>) -> Vec<Signal> {
    let mut signals = Vec::new();
    let mut signaled: BTreeSet<NaiveDate> = BTreeSet::new();

    for (index, bar) in bars.iter().enumerate() {
        let date = bar.date();
        if signaled.contains(&date) {
            continue;
        }
        let Some(day) = levels.get(&date) else {
            continue;
        };
        if let Some(breakout) = detect::detect(bar, day.previous_high, day.previous_low) {
            signals.push(Signal {
                date,
                direction: breakout.direction,
                entry_price: bar.close,
                reference_level: breakout.reference_level,
                reason: breakout.reason.to_string(),
                source_bar_index: index,
            });
            signaled.insert(date);
        }
    }
    signals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;
    use crate::levels::day_levels;
    use chrono::{TimeZone, Utc};

    fn bar(day: u32, hour: u32, open: f64, high: f64, low: f64, close: f64) -> Bar {
        Bar {
            open_time: Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap(),
            open,
            high,
            low,
            close,
            volume: 10.0,
        }
    }

    /// Day 2 establishes levels high=105 / low=95; later days break them.
    fn seed_day() -> Vec<Bar> {
        vec![bar(2, 0, 100.0, 105.0, 95.0, 100.0)]
    }

    #[test]
    fn first_day_never_signals() {
        let bars = vec![bar(2, 0, 100.0, 120.0, 80.0, 110.0)];
        let levels = day_levels(&bars);
        assert!(scan(&bars, &levels).is_empty());
    }

    #[test]
    fn emits_signal_with_bar_close_as_entry() {
        let mut bars = seed_day();
        bars.push(bar(3, 0, 106.0, 108.0, 104.0, 107.5));
        let levels = day_levels(&bars);
        let signals = scan(&bars, &levels);
        assert_eq!(signals.len(), 1);
        let signal = &signals[0];
        assert_eq!(signal.direction, Direction::Long);
        assert_eq!(signal.entry_price, 107.5);
        assert_eq!(signal.reference_level, 105.0);
        assert_eq!(signal.source_bar_index, 1);
    }

    #[test]
    fn second_breakout_same_day_is_suppressed() {
        let mut bars = seed_day();
        // Hour 0: long breakout above 105. Hour 1: would-be short below 95.
        bars.push(bar(3, 0, 106.0, 108.0, 104.0, 107.0));
        bars.push(bar(3, 1, 94.0, 95.5, 92.0, 93.0));
        let levels = day_levels(&bars);
        let signals = scan(&bars, &levels);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].direction, Direction::Long);
        assert_eq!(signals[0].source_bar_index, 1);
    }

    #[test]
    fn undirected_breakout_leaves_day_open_for_later_bars() {
        let mut bars = seed_day();
        // Hour 0: high breakout with straddling body — detected, no signal.
        bars.push(bar(3, 0, 104.0, 107.0, 103.0, 106.0));
        // Hour 1: clean long breakout.
        bars.push(bar(3, 1, 106.0, 109.0, 105.5, 108.0));
        let levels = day_levels(&bars);
        let signals = scan(&bars, &levels);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].source_bar_index, 2);
    }

    #[test]
    fn one_signal_per_day_across_days() {
        let mut bars = seed_day();
        bars.push(bar(3, 0, 106.0, 108.0, 104.0, 107.0)); // long, day 3
        bars.push(bar(3, 5, 110.0, 112.0, 109.0, 111.0)); // suppressed
        bars.push(bar(4, 2, 94.0, 95.0, 90.0, 91.0)); // short, day 4
        let levels = day_levels(&bars);
        let signals = scan(&bars, &levels);
        assert_eq!(signals.len(), 2);
        assert!(signals[0].date < signals[1].date);
        assert_eq!(signals[1].direction, Direction::Short);
    }
}
