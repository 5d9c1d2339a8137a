//! Pins the exact JSON field names of the result object.
//!
//! Downstream export consumers parse these names verbatim; a rename
//! anywhere in the report is a breaking change and must fail here.

use chrono::{NaiveDate, TimeZone, Utc};
use daybreak_core::domain::Bar;
use daybreak_runner::{run_backtest, BacktestConfig};
use serde_json::Value;

fn bar(day: u32, hour: u32, open: f64, high: f64, low: f64, close: f64) -> Bar {
    Bar {
        open_time: Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap(),
        open,
        high,
        low,
        close,
        volume: 10.0,
    }
}

fn report_json() -> Value {
    let bars = vec![
        // Day 2 sets levels; day 3 trades long to the take-profit; day 4
        // trades short into the stop.
        bar(2, 0, 100.0, 105.0, 95.0, 100.0),
        bar(3, 0, 106.0, 107.0, 105.5, 106.0),
        bar(3, 1, 106.0, 111.0, 105.8, 110.5),
        bar(4, 0, 104.0, 104.5, 102.0, 103.0),
        bar(4, 1, 103.0, 108.0, 102.5, 107.0),
        bar(5, 0, 107.0, 107.5, 106.5, 107.2),
    ];
    let mut config = BacktestConfig::new(
        "BTCUSDT",
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
    );
    config.strategy.initial_capital = 100.0;
    let report = run_backtest(&config, &bars).unwrap();
    serde_json::to_value(&report).unwrap()
}

#[test]
fn top_level_sections() {
    let json = report_json();
    assert!(json.get("metadata").is_some());
    assert!(json.get("dailyResults").is_some());
    assert!(json.get("summary").is_some());
}

#[test]
fn metadata_field_names() {
    let meta = &report_json()["metadata"];
    for key in ["symbol", "startDate", "endDate", "totalDays", "strategy", "parameters"] {
        assert!(meta.get(key).is_some(), "metadata missing {key}");
    }
    let params = &meta["parameters"];
    for key in [
        "initialCapital",
        "leverage",
        "maxHours",
        "stopLossPercent",
        "takeProfitPercent",
    ] {
        assert!(params.get(key).is_some(), "parameters missing {key}");
    }
    assert_eq!(meta["totalDays"], 4);
    assert_eq!(meta["startDate"], "2024-01-02");
    assert_eq!(meta["endDate"], "2024-01-05");
}

#[test]
fn daily_results_field_names() {
    let json = report_json();
    let daily = json["dailyResults"].as_object().unwrap();
    assert_eq!(daily.len(), 4);

    let flat = &daily["2024-01-02"];
    for key in ["tradeExecuted", "balanceBefore", "balanceAfter", "dailyReturn"] {
        assert!(flat.get(key).is_some(), "daily result missing {key}");
    }
    assert_eq!(flat["tradeExecuted"], false);
    assert!(flat.get("trade").is_none(), "flat day must omit trade");

    let executed = &daily["2024-01-03"];
    assert_eq!(executed["tradeExecuted"], true);
    let trade = &executed["trade"];
    for key in [
        "id",
        "direction",
        "entryPrice",
        "exitPrice",
        "exitReason",
        "durationHours",
        "resultUSD",
        "resultPercent",
        "stopLoss",
        "takeProfit",
    ] {
        assert!(trade.get(key).is_some(), "trade missing {key}");
    }
    assert_eq!(trade["direction"], "LONG");
    assert_eq!(trade["exitReason"], "TP");
    assert_eq!(trade["resultUSD"], 20.0);
}

#[test]
fn summary_field_names() {
    let summary = &report_json()["summary"];
    for key in [
        "totalTrades",
        "winningTrades",
        "losingTrades",
        "winRate",
        "totalReturn",
        "totalReturnPercent",
        "finalBalance",
        "avgWin",
        "avgLoss",
        "profitFactor",
        "maxDrawdown",
        "maxDrawdownPercent",
    ] {
        assert!(summary.get(key).is_some(), "summary missing {key}");
    }
    assert_eq!(summary["totalTrades"], 2);
}

#[test]
fn profit_factor_serializes_null_without_losers() {
    // Only the winning day: a run with no losing trades.
    let bars = vec![
        bar(2, 0, 100.0, 105.0, 95.0, 100.0),
        bar(3, 0, 106.0, 107.0, 105.5, 106.0),
        bar(3, 1, 106.0, 111.0, 105.8, 110.5),
    ];
    let config = {
        let mut c = BacktestConfig::new(
            "BTCUSDT",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        );
        c.strategy.initial_capital = 100.0;
        c
    };
    let report = run_backtest(&config, &bars).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert!(json["summary"]["profitFactor"].is_null());
}
