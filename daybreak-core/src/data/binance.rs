//! Binance spot klines provider.
//!
//! Fetches hourly OHLCV bars from the public `/api/v3/klines` endpoint
//! (no API key needed), paginated at the 1000-bar limit, with bounded
//! retries and exponential backoff on transient failures. All
//! rate-limit and timeout handling lives here; the core pipeline never
//! retries.

use super::provider::{BarProvider, DataError};
use crate::domain::Bar;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use std::thread;
use std::time::Duration;

const KLINES_URL: &str = "https://api.binance.com/api/v3/klines";
/// Binance caps klines responses at 1000 rows per request.
const PAGE_LIMIT: usize = 1000;

pub struct BinanceProvider {
    client: reqwest::blocking::Client,
    base_url: String,
    max_retries: u32,
    base_delay: Duration,
}

impl Default for BinanceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl BinanceProvider {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            base_url: KLINES_URL.to_string(),
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }

    /// Point the provider at a different endpoint (tests, mirrors).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch one page of klines, retrying transient failures with
    /// exponential backoff.
    fn fetch_page(
        &self,
        symbol: &str,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<Vec<Value>>, DataError> {
        let mut attempt = 0;
        loop {
            match self.fetch_page_once(symbol, start_ms, end_ms) {
                Ok(rows) => return Ok(rows),
                Err(err) if attempt < self.max_retries && is_transient(&err) => {
                    let delay = self.base_delay * 2_u32.pow(attempt);
                    thread::sleep(delay);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn fetch_page_once(
        &self,
        symbol: &str,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<Vec<Value>>, DataError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("symbol", symbol),
                ("interval", "1h"),
                ("startTime", &start_ms.to_string()),
                ("endTime", &end_ms.to_string()),
                ("limit", &PAGE_LIMIT.to_string()),
            ])
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 429 || status.as_u16() == 418 {
            return Err(DataError::RateLimited {
                status: status.as_u16(),
            });
        }
        if status.as_u16() == 400 {
            // Binance answers 400 with code -1121 for unknown symbols.
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(DataError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Vec<Vec<Value>>>()
            .map_err(|e| DataError::ResponseFormatChanged(e.to_string()))
    }
}

fn is_transient(err: &DataError) -> bool {
    matches!(
        err,
        DataError::NetworkUnreachable(_)
            | DataError::RateLimited { .. }
            | DataError::HttpStatus { status: 500..=599, .. }
    )
}

/// Parse one kline row: [openTime, open, high, low, close, volume, ...].
/// Prices arrive as decimal strings.
fn parse_kline(row: &[Value]) -> Result<Bar, DataError> {
    if row.len() < 6 {
        return Err(DataError::ResponseFormatChanged(format!(
            "kline row has {} fields, expected at least 6",
            row.len()
        )));
    }
    let open_ms = row[0]
        .as_i64()
        .ok_or_else(|| DataError::ResponseFormatChanged("openTime is not an integer".into()))?;
    let open_time = Utc
        .timestamp_millis_opt(open_ms)
        .single()
        .ok_or_else(|| DataError::ResponseFormatChanged("openTime out of range".into()))?;

    let price = |index: usize, name: &str| -> Result<f64, DataError> {
        row[index]
            .as_str()
            .and_then(|s| s.parse::<f64>().ok())
            .ok_or_else(|| {
                DataError::ResponseFormatChanged(format!("{name} is not a decimal string"))
            })
    };

    Ok(Bar {
        open_time,
        open: price(1, "open")?,
        high: price(2, "high")?,
        low: price(3, "low")?,
        close: price(4, "close")?,
        volume: price(5, "volume")?,
    })
}

impl BarProvider for BinanceProvider {
    fn fetch_bars(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Bar>, DataError> {
        if start >= end {
            return Err(DataError::InvalidRange { start, end });
        }

        let end_ms = end.timestamp_millis();
        let mut cursor = start.timestamp_millis();
        let mut bars: Vec<Bar> = Vec::new();

        while cursor < end_ms {
            let rows = self.fetch_page(symbol, cursor, end_ms)?;
            if rows.is_empty() {
                break;
            }
            for row in &rows {
                bars.push(parse_kline(row)?);
            }
            // Advance past the last bar in the page.
            let last_open = bars.last().map(|b| b.open_time.timestamp_millis());
            match last_open {
                Some(ms) if ms + 1 > cursor => cursor = ms + 1,
                _ => break,
            }
            if rows.len() < PAGE_LIMIT {
                break;
            }
        }

        if bars.is_empty() {
            return Err(DataError::EmptyResponse {
                symbol: symbol.to_string(),
            });
        }

        // Pages can overlap at boundaries; enforce the ordering contract.
        bars.sort_by_key(|b| b.open_time);
        bars.dedup_by_key(|b| b.open_time);
        Ok(bars)
    }
}
