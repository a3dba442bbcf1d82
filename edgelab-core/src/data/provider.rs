//! Candle provider trait and structured error types.
//!
//! The CandleProvider trait abstracts over candle sources so the explorer
//! can run against the live exchange API or a synthetic series in tests.

use thiserror::Error;

use crate::domain::{Candle, Interval};

/// Structured error types for candle fetches.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network error: {0}")]
    Network(String),

    #[error("provider returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("response format changed: {0}")]
    ResponseFormat(String),

    #[error("no candles returned for {symbol} {interval}")]
    Empty { symbol: String, interval: Interval },
}

/// Trait for candle sources.
///
/// `days_ago` shifts the fetch window back in time: 0 means the window
/// ends now, 30 means it ends thirty days ago. Returned candles are
/// time-ascending.
pub trait CandleProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch `days` worth of candles at `interval`, ending `days_ago` days
    /// before now.
    fn fetch(
        &self,
        symbol: &str,
        interval: Interval,
        days: u32,
        days_ago: u32,
    ) -> Result<Vec<Candle>, DataError>;
}
