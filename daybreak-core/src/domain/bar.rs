//! Bar — one hourly OHLCV sample.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV bar for a single symbol over one hour.
///
/// Input sequences are strictly ascending in `open_time`. No gap-filling
/// is performed anywhere in the pipeline; missing bars are simply absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub open_time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Calendar day this bar belongs to (UTC day boundary).
    pub fn date(&self) -> NaiveDate {
        self.open_time.date_naive()
    }

    /// Basic OHLC sanity check: high is the ceiling, low is the floor.
    pub fn is_sane(&self) -> bool {
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
    }
}
