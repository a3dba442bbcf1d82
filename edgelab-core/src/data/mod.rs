//! Candle data layer: provider trait and the Hyperliquid implementation.

pub mod hyperliquid;
pub mod provider;

pub use hyperliquid::{HyperliquidProvider, DEFAULT_API_URL};
pub use provider::{CandleProvider, DataError};
