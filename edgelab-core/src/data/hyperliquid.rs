//! Hyperliquid candle provider.
//!
//! Fetches candle snapshots from the public info endpoint. The API takes a
//! POST with a typed JSON body and returns OHLCV fields as strings, which
//! are parsed to floats here.

use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::provider::{CandleProvider, DataError};
use crate::domain::{Candle, Interval};

pub const DEFAULT_API_URL: &str = "https://api.hyperliquid.xyz/info";

/// One candle as the API returns it. Prices and volume arrive as strings.
#[derive(Debug, Deserialize)]
struct WireCandle {
    #[serde(rename = "t")]
    time_ms: i64,
    #[serde(rename = "o")]
    open: String,
    #[serde(rename = "h")]
    high: String,
    #[serde(rename = "l")]
    low: String,
    #[serde(rename = "c")]
    close: String,
    #[serde(rename = "v")]
    volume: String,
}

fn parse_price(field: &str, value: &str) -> Result<f64, DataError> {
    value
        .parse::<f64>()
        .map_err(|_| DataError::ResponseFormat(format!("non-numeric {field}: {value:?}")))
}

impl WireCandle {
    fn into_candle(self) -> Result<Candle, DataError> {
        Ok(Candle {
            time_ms: self.time_ms,
            open: parse_price("open", &self.open)?,
            high: parse_price("high", &self.high)?,
            low: parse_price("low", &self.low)?,
            close: parse_price("close", &self.close)?,
            volume: parse_price("volume", &self.volume)?,
        })
    }
}

/// Hyperliquid candle provider over the blocking HTTP client.
pub struct HyperliquidProvider {
    client: reqwest::blocking::Client,
    api_url: String,
}

impl HyperliquidProvider {
    pub fn new(api_url: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            api_url: api_url.into(),
        }
    }
}

impl Default for HyperliquidProvider {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl CandleProvider for HyperliquidProvider {
    fn name(&self) -> &str {
        "hyperliquid"
    }

    fn fetch(
        &self,
        symbol: &str,
        interval: Interval,
        days: u32,
        days_ago: u32,
    ) -> Result<Vec<Candle>, DataError> {
        const DAY_MS: i64 = 86_400_000;
        let end_time = Utc::now().timestamp_millis() - days_ago as i64 * DAY_MS;
        let start_time = end_time - days as i64 * DAY_MS;

        let body = json!({
            "type": "candleSnapshot",
            "req": {
                "coin": symbol,
                "interval": interval.as_str(),
                "startTime": start_time,
                "endTime": end_time,
            },
        });

        let resp = self
            .client
            .post(&self.api_url)
            .json(&body)
            .send()
            .map_err(|e| DataError::Network(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(DataError::HttpStatus {
                status: resp.status().as_u16(),
            });
        }

        let wire: Vec<WireCandle> = resp
            .json()
            .map_err(|e| DataError::ResponseFormat(e.to_string()))?;
        if wire.is_empty() {
            return Err(DataError::Empty {
                symbol: symbol.to_string(),
                interval,
            });
        }

        let mut candles = wire
            .into_iter()
            .map(WireCandle::into_candle)
            .collect::<Result<Vec<_>, _>>()?;
        candles.sort_by_key(|c| c.time_ms);
        Ok(candles)
    }
}
