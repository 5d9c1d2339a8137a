//! Structured engine errors.
//!
//! Every core failure is a deterministic function of the input; nothing
//! here is transient and nothing is retried. Retries belong to the data
//! providers in [`crate::data`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Fewer than two distinct calendar days: the first day has no
    /// previous-day levels, so no signal is ever possible.
    #[error("insufficient data: {days} distinct day(s), need at least 2")]
    InsufficientData { days: usize },

    /// A strategy parameter was non-positive. Values are never clamped
    /// or defaulted inside the core.
    #[error("invalid configuration: {name} must be > 0, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// Bar sequence is not strictly ascending in open time.
    #[error("bar sequence out of order at index {index}")]
    UnorderedBars { index: usize },
}
