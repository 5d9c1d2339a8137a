//! Daybreak CLI — run previous-day-level breakout backtests.
//!
//! Commands:
//! - `run` — fetch hourly bars (Binance or seeded synthetic), run the
//!   backtest, print a summary, and write result.json / trades.csv

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use daybreak_core::data::{BarProvider, BinanceProvider, SyntheticProvider};
use daybreak_core::domain::Bar;
use daybreak_runner::{export_report, run_backtest, BacktestConfig, BacktestReport};

#[derive(Parser)]
#[command(name = "daybreak", about = "Daybreak CLI — breakout backtesting engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a backtest over hourly bars.
    Run {
        /// Path to a TOML config file (overrides the flags below).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Trading pair, e.g. BTCUSDT.
        #[arg(long, default_value = "BTCUSDT")]
        symbol: String,

        /// Start date (YYYY-MM-DD). Defaults to 90 days ago.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Initial capital in USD.
        #[arg(long, default_value_t = 1000.0)]
        capital: f64,

        /// Leverage multiplier.
        #[arg(long, default_value_t = 5.0)]
        leverage: f64,

        /// Max holding time in hours before the time stop closes a trade.
        #[arg(long, default_value_t = 48.0)]
        max_hours: f64,

        /// Stop-loss as percent of capital.
        #[arg(long, default_value_t = 10.0)]
        stop_loss: f64,

        /// Take-profit as percent of capital.
        #[arg(long, default_value_t = 20.0)]
        take_profit: f64,

        /// Use seeded synthetic bars instead of Binance (offline).
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Output directory for result.json and trades.csv.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            config,
            symbol,
            start,
            end,
            capital,
            leverage,
            max_hours,
            stop_loss,
            take_profit,
            synthetic,
            output_dir,
        } => {
            let config = match config {
                Some(path) => BacktestConfig::load(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => {
                    let end_date = parse_date_arg(end.as_deref(), "end")?
                        .unwrap_or_else(|| Utc::now().date_naive());
                    let start_date = parse_date_arg(start.as_deref(), "start")?
                        .unwrap_or_else(|| end_date - chrono::Duration::days(90));
                    let mut config = BacktestConfig::new(symbol, start_date, end_date);
                    config.strategy.initial_capital = capital;
                    config.strategy.leverage = leverage;
                    config.strategy.max_hours = max_hours;
                    config.strategy.stop_loss_percent = stop_loss;
                    config.strategy.take_profit_percent = take_profit;
                    config
                }
            };

            let bars = fetch_bars(&config, synthetic)?;
            println!(
                "Running {} over {} bars ({} → {})",
                config.backtest.symbol,
                bars.len(),
                config.backtest.start_date,
                config.backtest.end_date
            );

            let report = run_backtest(&config, &bars)?;
            print_summary(&report);

            let run_dir = output_dir.join(config.run_id());
            let paths = export_report(&run_dir, &report)?;
            println!("\nArtifacts:");
            println!("  {}", paths.result_json.display());
            println!("  {}", paths.trades_csv.display());
            Ok(())
        }
    }
}

fn parse_date_arg(value: Option<&str>, name: &str) -> Result<Option<NaiveDate>> {
    match value {
        None => Ok(None),
        Some(text) => match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            Ok(date) => Ok(Some(date)),
            Err(_) => bail!("invalid --{name} date '{text}', expected YYYY-MM-DD"),
        },
    }
}

fn fetch_bars(config: &BacktestConfig, synthetic: bool) -> Result<Vec<Bar>> {
    let start = config
        .backtest
        .start_date
        .and_hms_opt(0, 0, 0)
        .expect("midnight is valid")
        .and_utc();
    let end = config
        .backtest
        .end_date
        .and_hms_opt(0, 0, 0)
        .expect("midnight is valid")
        .and_utc();

    let bars = if synthetic {
        SyntheticProvider::default().fetch_bars(&config.backtest.symbol, start, end)?
    } else {
        BinanceProvider::new().fetch_bars(&config.backtest.symbol, start, end)?
    };
    Ok(bars)
}

fn print_summary(report: &BacktestReport) {
    let s = &report.summary;
    println!("\n── Summary ──");
    println!("Trades:        {} ({} W / {} L)", s.total_trades, s.winning_trades, s.losing_trades);
    println!("Win rate:      {:.2}%", s.win_rate);
    println!("Final balance: {:.2}", s.final_balance);
    println!(
        "Total return:  {:.2} ({:.2}%)",
        s.total_return, s.total_return_percent
    );
    println!("Avg win/loss:  {:.2} / {:.2}", s.avg_win, s.avg_loss);
    match s.profit_factor {
        Some(pf) => println!("Profit factor: {pf:.2}"),
        None => println!("Profit factor: n/a (no losing trades)"),
    }
    println!(
        "Max drawdown:  {:.2} ({:.2}%)",
        s.max_drawdown, s.max_drawdown_percent
    );
}
