//! Trade — a completed round trip, created exactly once per signal.

use super::signal::{Direction, Signal};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Why a trade closed. Exactly one reason is assigned per trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitReason {
    /// Max holding time reached; closed at that bar's close.
    #[serde(rename = "TIME")]
    Time,
    /// Stop-loss touched; closed at the stop price, not the bar extreme.
    #[serde(rename = "SL")]
    StopLoss,
    /// Take-profit touched; closed at the take-profit price.
    #[serde(rename = "TP")]
    TakeProfit,
    /// Ran out of supplied bars; closed at the last available close.
    #[serde(rename = "DATA_EXHAUSTION")]
    DataExhaustion,
}

impl ExitReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExitReason::Time => "TIME",
            ExitReason::StopLoss => "SL",
            ExitReason::TakeProfit => "TP",
            ExitReason::DataExhaustion => "DATA_EXHAUSTION",
        }
    }
}

/// A closed leveraged trade. Immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: usize,
    pub signal: Signal,
    pub direction: Direction,
    pub entry_price: f64,
    pub entry_time: DateTime<Utc>,
    /// Notional exposure: balance at entry × leverage.
    pub position_size: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub exit_price: f64,
    pub exit_time: DateTime<Utc>,
    pub exit_reason: ExitReason,
    /// Profit/loss in account currency.
    pub result_usd: f64,
    /// Leveraged return on capital in percent (price move × leverage).
    pub result_percent: f64,
    pub duration_hours: f64,
}

impl Trade {
    pub fn is_winner(&self) -> bool {
        self.result_usd > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_trade() -> Trade {
        let entry_time = Utc.with_ymd_and_hms(2024, 1, 3, 9, 0, 0).unwrap();
        Trade {
            id: 1,
            signal: Signal {
                date: entry_time.date_naive(),
                direction: Direction::Long,
                entry_price: 100.0,
                reference_level: 99.0,
                reason: "body above previous high".into(),
                source_bar_index: 33,
            },
            direction: Direction::Long,
            entry_price: 100.0,
            entry_time,
            position_size: 500.0,
            stop_loss: 98.0,
            take_profit: 104.0,
            exit_price: 104.0,
            exit_time: Utc.with_ymd_and_hms(2024, 1, 3, 15, 0, 0).unwrap(),
            exit_reason: ExitReason::TakeProfit,
            result_usd: 20.0,
            result_percent: 20.0,
            duration_hours: 6.0,
        }
    }

    #[test]
    fn is_winner() {
        assert!(sample_trade().is_winner());
    }

    #[test]
    fn exit_reason_wire_names() {
        assert_eq!(serde_json::to_string(&ExitReason::Time).unwrap(), "\"TIME\"");
        assert_eq!(serde_json::to_string(&ExitReason::StopLoss).unwrap(), "\"SL\"");
        assert_eq!(serde_json::to_string(&ExitReason::TakeProfit).unwrap(), "\"TP\"");
        assert_eq!(
            serde_json::to_string(&ExitReason::DataExhaustion).unwrap(),
            "\"DATA_EXHAUSTION\""
        );
    }

    #[test]
    fn trade_serialization_roundtrip() {
        let trade = sample_trade();
        let json = serde_json::to_string(&trade).unwrap();
        let deser: Trade = serde_json::from_str(&json).unwrap();
        assert_eq!(deser.id, 1);
        assert_eq!(deser.exit_reason, ExitReason::TakeProfit);
        assert_eq!(deser.result_usd, 20.0);
    }
}
