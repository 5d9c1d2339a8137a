//! Artifact export: result JSON plus a flat trades CSV.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::report::BacktestReport;

/// Paths of the files one export produced.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub result_json: PathBuf,
    pub trades_csv: PathBuf,
}

/// Write `result.json` and `trades.csv` under `output_dir`, creating
/// the directory if needed.
pub fn export_report(output_dir: impl AsRef<Path>, report: &BacktestReport) -> Result<ArtifactPaths> {
    let dir = output_dir.as_ref();
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let result_json = dir.join("result.json");
    let json = serde_json::to_string_pretty(report)?;
    fs::write(&result_json, json)
        .with_context(|| format!("failed to write {}", result_json.display()))?;

    let trades_csv = dir.join("trades.csv");
    write_trades_csv(&trades_csv, report)?;

    Ok(ArtifactPaths {
        result_json,
        trades_csv,
    })
}

fn write_trades_csv(path: &Path, report: &BacktestReport) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    writer.write_record([
        "id",
        "date",
        "direction",
        "entry_price",
        "exit_price",
        "exit_reason",
        "duration_hours",
        "result_usd",
        "result_percent",
        "stop_loss",
        "take_profit",
    ])?;

    for (date, day) in &report.daily_results {
        let Some(trade) = &day.trade else { continue };
        writer.write_record([
            trade.id.to_string(),
            date.to_string(),
            trade.direction.clone(),
            trade.entry_price.to_string(),
            trade.exit_price.to_string(),
            trade.exit_reason.clone(),
            trade.duration_hours.to_string(),
            trade.result_usd.to_string(),
            trade.result_percent.to_string(),
            trade.stop_loss.to_string(),
            trade.take_profit.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
