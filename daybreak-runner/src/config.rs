//! Serializable backtest configuration (TOML).

use chrono::NaiveDate;
use daybreak_core::StrategyParams;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("start_date {start} is not before end_date {end}")]
    BadDateRange { start: NaiveDate, end: NaiveDate },
}

/// One backtest run, fully described: symbol, date range, and strategy
/// parameters. Two identical configs always produce identical results,
/// so the content hash in [`BacktestConfig::run_id`] can identify runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    pub backtest: BacktestSection,
    pub strategy: StrategyParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestSection {
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl BacktestConfig {
    pub fn new(symbol: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            backtest: BacktestSection {
                symbol: symbol.into(),
                start_date,
                end_date,
            },
            strategy: StrategyParams::default(),
        }
    }

    /// Load from a TOML file and validate the date range. Strategy
    /// parameter validation stays in the core, which rejects
    /// non-positive values before simulating.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        config.check_dates()?;
        Ok(config)
    }

    pub fn check_dates(&self) -> Result<(), ConfigError> {
        if self.backtest.start_date >= self.backtest.end_date {
            return Err(ConfigError::BadDateRange {
                start: self.backtest.start_date,
                end: self.backtest.end_date,
            });
        }
        Ok(())
    }

    /// Deterministic content-addressed identifier for this run.
    pub fn run_id(&self) -> String {
        let json = serde_json::to_string(self).expect("BacktestConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BacktestConfig {
        BacktestConfig::new(
            "BTCUSDT",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
    }

    #[test]
    fn parses_toml() {
        let text = r#"
            [backtest]
            symbol = "BTCUSDT"
            start_date = "2024-01-01"
            end_date = "2024-03-01"

            [strategy]
            initial_capital = 1000.0
            leverage = 5.0
            max_hours = 48.0
            stop_loss_percent = 10.0
            take_profit_percent = 20.0
        "#;
        let config: BacktestConfig = toml::from_str(text).unwrap();
        assert_eq!(config.backtest.symbol, "BTCUSDT");
        assert_eq!(config.strategy.leverage, 5.0);
        assert!(config.check_dates().is_ok());
    }

    #[test]
    fn rejects_inverted_dates() {
        let mut config = sample();
        config.backtest.end_date = config.backtest.start_date;
        assert!(matches!(
            config.check_dates().unwrap_err(),
            ConfigError::BadDateRange { .. }
        ));
    }

    #[test]
    fn run_id_is_stable_and_content_sensitive() {
        let a = sample();
        let b = sample();
        assert_eq!(a.run_id(), b.run_id());

        let mut c = sample();
        c.strategy.leverage = 10.0;
        assert_ne!(a.run_id(), c.run_id());
    }
}
