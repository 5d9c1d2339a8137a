//! Data provider trait and structured error types.

use crate::domain::Bar;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (HTTP {status})")]
    RateLimited { status: u16 },

    #[error("provider returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("provider returned no bars for {symbol} in the requested range")]
    EmptyResponse { symbol: String },

    #[error("invalid date range: start {start} is not before end {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// Trait for hourly bar providers (Binance, synthetic, test doubles).
///
/// Implementations must return bars strictly ascending in open time
/// with duplicates removed; the engine rejects unordered input rather
/// than re-sorting it.
pub trait BarProvider {
    fn fetch_bars(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Bar>, DataError>;
}
