//! The externally-facing result object.
//!
//! Field names here are a compatibility contract with existing export
//! consumers — every serde rename is deliberate and must not change.

use chrono::NaiveDate;
use daybreak_core::domain::state::round2;
use daybreak_core::domain::{DayOutcome, Trade};
use daybreak_core::stats::Summary;
use daybreak_core::{RunOutput, StrategyParams};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete result of one backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestReport {
    pub metadata: ReportMetadata,
    pub daily_results: BTreeMap<NaiveDate, DailyResult>,
    pub summary: ReportSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: usize,
    pub strategy: String,
    pub parameters: ReportParameters,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportParameters {
    pub initial_capital: f64,
    pub leverage: f64,
    pub max_hours: f64,
    pub stop_loss_percent: f64,
    pub take_profit_percent: f64,
}

impl From<&StrategyParams> for ReportParameters {
    fn from(params: &StrategyParams) -> Self {
        Self {
            initial_capital: params.initial_capital,
            leverage: params.leverage,
            max_hours: params.max_hours,
            stop_loss_percent: params.stop_loss_percent,
            take_profit_percent: params.take_profit_percent,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyResult {
    pub trade_executed: bool,
    pub balance_before: f64,
    pub balance_after: f64,
    pub daily_return: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade: Option<TradeDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeDetail {
    pub id: usize,
    pub direction: String,
    pub entry_price: f64,
    pub exit_price: f64,
    pub exit_reason: String,
    pub duration_hours: f64,
    #[serde(rename = "resultUSD")]
    pub result_usd: f64,
    pub result_percent: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
}

impl From<&Trade> for TradeDetail {
    fn from(trade: &Trade) -> Self {
        Self {
            id: trade.id,
            direction: trade.direction.as_str().to_string(),
            entry_price: trade.entry_price,
            exit_price: trade.exit_price,
            exit_reason: trade.exit_reason.as_str().to_string(),
            duration_hours: round2(trade.duration_hours),
            result_usd: round2(trade.result_usd),
            result_percent: round2(trade.result_percent),
            stop_loss: trade.stop_loss,
            take_profit: trade.take_profit,
        }
    }
}

impl From<&DayOutcome> for DailyResult {
    fn from(day: &DayOutcome) -> Self {
        Self {
            trade_executed: day.executed,
            balance_before: round2(day.balance_before),
            balance_after: round2(day.balance_after),
            daily_return: round2(day.daily_return),
            trade: day.trade.as_ref().map(TradeDetail::from),
        }
    }
}

/// Summary block with the exact downstream field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub win_rate: f64,
    pub total_return: f64,
    pub total_return_percent: f64,
    pub final_balance: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    /// `null` when the run has no losing trades.
    pub profit_factor: Option<f64>,
    pub max_drawdown: f64,
    pub max_drawdown_percent: f64,
}

impl From<&Summary> for ReportSummary {
    fn from(summary: &Summary) -> Self {
        Self {
            total_trades: summary.total_trades,
            winning_trades: summary.winning_trades,
            losing_trades: summary.losing_trades,
            win_rate: summary.win_rate,
            total_return: summary.total_return,
            total_return_percent: summary.total_return_percent,
            final_balance: summary.final_balance,
            avg_win: summary.avg_win,
            avg_loss: summary.avg_loss,
            profit_factor: summary.profit_factor,
            max_drawdown: summary.max_drawdown,
            max_drawdown_percent: summary.max_drawdown_percent,
        }
    }
}

impl BacktestReport {
    /// Assemble the report from a finished core run.
    pub fn assemble(
        symbol: &str,
        strategy_name: &str,
        params: &StrategyParams,
        output: &RunOutput,
    ) -> Self {
        let summary = Summary::compute(&output.state, params.initial_capital);
        Self {
            metadata: ReportMetadata {
                symbol: symbol.to_string(),
                start_date: output.first_date,
                end_date: output.last_date,
                total_days: output.total_days,
                strategy: strategy_name.to_string(),
                parameters: params.into(),
            },
            daily_results: output
                .state
                .daily
                .iter()
                .map(|(date, day)| (*date, DailyResult::from(day)))
                .collect(),
            summary: ReportSummary::from(&summary),
        }
    }
}
