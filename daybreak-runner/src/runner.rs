//! Backtest runner — wires config, core pipeline, and report assembly.

use daybreak_core::data::DataError;
use daybreak_core::domain::Bar;
use daybreak_core::{run_backtest as run_core, EngineError};
use thiserror::Error;

use crate::config::{BacktestConfig, ConfigError};
use crate::report::BacktestReport;

/// Strategy name recorded in report metadata.
pub const STRATEGY_NAME: &str = "previous-day-breakout";

#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Data(#[from] DataError),
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Run one backtest over pre-fetched bars.
///
/// The bars must already be ordered; fetching (and all its retry
/// semantics) happens in the data providers, never here.
pub fn run_backtest(config: &BacktestConfig, bars: &[Bar]) -> Result<BacktestReport, RunError> {
    config.check_dates()?;
    let output = run_core(bars, &config.strategy)?;
    Ok(BacktestReport::assemble(
        &config.backtest.symbol,
        STRATEGY_NAME,
        &config.strategy,
        &output,
    ))
}
