//! Daybreak Core — previous-day-level breakout backtesting engine.
//!
//! This crate contains the heart of the backtester:
//! - Domain types (bars, daily levels, signals, trades, run state)
//! - Daily reference-level calculation
//! - Breakout classification (pure function over one bar)
//! - One-signal-per-day scheduling
//! - Leveraged trade simulation with capital compounding
//! - Performance aggregation
//! - Data providers (Binance klines, seeded synthetic bars)
//!
//! The pipeline is fully sequential: bars → levels → signals → trades.
//! Trade N's position size reads the balance trade N−1 left behind, so
//! signals are simulated strictly in chronological order.

pub mod config;
pub mod data;
pub mod detect;
pub mod domain;
pub mod engine;
pub mod error;
pub mod levels;
pub mod schedule;
pub mod simulate;
pub mod stats;

pub use config::StrategyParams;
pub use engine::{run_backtest, RunOutput};
pub use error::EngineError;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: pipeline types are Send + Sync, so independent
    /// runs can be farmed out to threads without retrofitting.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::Signal>();
        require_sync::<domain::Signal>();
        require_send::<domain::Trade>();
        require_sync::<domain::Trade>();
        require_send::<domain::RunState>();
        require_sync::<domain::RunState>();
        require_send::<levels::DayLevels>();
        require_sync::<levels::DayLevels>();
        require_send::<config::StrategyParams>();
        require_sync::<config::StrategyParams>();
        require_send::<stats::Summary>();
        require_sync::<stats::Summary>();
        require_send::<RunOutput>();
        require_sync::<RunOutput>();
    }
}
