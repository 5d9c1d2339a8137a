//! Signal — a breakout entry decision, immutable once created.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "LONG",
            Direction::Short => "SHORT",
        }
    }
}

/// One entry signal, emitted by the scheduler. At most one per calendar
/// date; entry price is always the triggering bar's close.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub date: NaiveDate,
    pub direction: Direction,
    pub entry_price: f64,
    /// The previous-day level the bar broke through.
    pub reference_level: f64,
    /// Human-readable classification, e.g. "body above previous high".
    pub reason: String,
    /// Index of the triggering bar in the input sequence.
    pub source_bar_index: usize,
}
