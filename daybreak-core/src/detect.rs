//! Breakout classification — a pure function over one bar and the
//! previous day's levels.

use crate::domain::{Bar, Direction};

/// A classified breakout with an entry direction.
///
/// Carries everything the scheduler needs to build a [`crate::domain::Signal`]
/// except the bar's own date, close, and index.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakout {
    pub direction: Direction,
    pub reference_level: f64,
    pub reason: &'static str,
}

pub const REASON_BODY_ABOVE_HIGH: &str = "body above previous high";
pub const REASON_WICK_ABOVE_HIGH: &str = "body below previous high, wick touched above";
pub const REASON_BODY_BELOW_LOW: &str = "body below previous low";
pub const REASON_WICK_BELOW_LOW: &str = "body above previous low, wick touched below";

/// Classify a bar against the previous day's high/low.
///
/// The high-breakout branch is checked first and, once its trigger
/// condition holds, the low branch is never evaluated — even if the bar
/// pierces both levels. That ordering is a deliberate tie-break.
///
/// A bar whose body straddles or exactly touches the broken level is a
/// detected breakout with no tradable direction, so it yields `None`.
pub fn detect(bar: &Bar, previous_high: Option<f64>, previous_low: Option<f64>) -> Option<Breakout> {
    let (ph, pl) = (previous_high?, previous_low?);

    if bar.high > ph {
        if bar.open > ph && bar.close > ph {
            // Body cleared the level: trend continuation long.
            return Some(Breakout {
                direction: Direction::Long,
                reference_level: ph,
                reason: REASON_BODY_ABOVE_HIGH,
            });
        }
        if bar.open < ph && bar.close < ph {
            // Only the wick pierced: counter-trend fade short.
            return Some(Breakout {
                direction: Direction::Short,
                reference_level: ph,
                reason: REASON_WICK_ABOVE_HIGH,
            });
        }
        return None;
    }

    if bar.low < pl {
        if bar.open < pl && bar.close < pl {
            return Some(Breakout {
                direction: Direction::Short,
                reference_level: pl,
                reason: REASON_BODY_BELOW_LOW,
            });
        }
        if bar.open > pl && bar.close > pl {
            return Some(Breakout {
                direction: Direction::Long,
                reference_level: pl,
                reason: REASON_WICK_BELOW_LOW,
            });
        }
        return None;
    }

    None
}
