//! Simple Moving Average (SMA).
//!
//! Mean of the last `period` values. Lookback: period.

/// SMA of the last `period` values of `values`.
///
/// Returns `None` when fewer than `period` values are available or
/// `period` is zero.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}
