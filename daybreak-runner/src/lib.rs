//! Daybreak Runner — backtest orchestration around `daybreak-core`.
//!
//! Loads a TOML run configuration, drives the core pipeline, assembles
//! the externally-facing report (field names are a compatibility
//! contract with downstream export consumers), and writes artifacts.

pub mod config;
pub mod export;
pub mod report;
pub mod runner;

pub use config::{BacktestConfig, ConfigError};
pub use export::{export_report, ArtifactPaths};
pub use report::{BacktestReport, DailyResult, ReportMetadata, ReportSummary, TradeDetail};
pub use runner::{run_backtest, RunError, STRATEGY_NAME};
