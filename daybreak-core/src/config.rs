//! Strategy parameters for a single backtest run.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// All tunable parameters of the breakout strategy.
///
/// Validation rejects non-positive values before any simulation starts;
/// the core never clamps or substitutes defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyParams {
    pub initial_capital: f64,
    /// Position size multiplier; also scales price moves into returns.
    pub leverage: f64,
    /// Max holding time before the time stop closes the trade.
    pub max_hours: f64,
    /// Stop-loss risk as percent of capital (converted to a price delta
    /// by dividing by leverage).
    pub stop_loss_percent: f64,
    /// Take-profit target as percent of capital.
    pub take_profit_percent: f64,
}

impl StrategyParams {
    pub fn validate(&self) -> Result<(), EngineError> {
        let checks = [
            ("initial_capital", self.initial_capital),
            ("leverage", self.leverage),
            ("max_hours", self.max_hours),
            ("stop_loss_percent", self.stop_loss_percent),
            ("take_profit_percent", self.take_profit_percent),
        ];
        for (name, value) in checks {
            if !(value > 0.0) {
                return Err(EngineError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

impl Default for StrategyParams {
    /// Defaults of the original strategy: 1000 USD, 5x leverage, 48h
    /// time stop, 10% stop-loss, 20% take-profit (percent of capital).
    fn default() -> Self {
        Self {
            initial_capital: 1000.0,
            leverage: 5.0,
            max_hours: 48.0,
            stop_loss_percent: 10.0,
            take_profit_percent: 20.0,
        }
    }
}
