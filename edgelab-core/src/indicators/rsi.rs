//! Relative Strength Index (RSI).
//!
//! Average gain vs average loss over the last `period` price changes:
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//! Edge case: zero total loss (an all-gains window) would divide by zero,
//! so it short-circuits to 100.

/// RSI over the last `period` changes of `values`.
///
/// Needs `period + 1` values (period changes). Returns `None` otherwise.
pub fn rsi(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period + 1 {
        return None;
    }
    let mut gains = 0.0;
    let mut losses = 0.0;
    let start = values.len() - period;
    for i in start..values.len() {
        let change = values[i] - values[i - 1];
        if change > 0.0 {
            gains += change;
        } else {
            losses -= change;
        }
    }
    if losses == 0.0 {
        return Some(100.0);
    }
    let rs = (gains / period as f64) / (losses / period as f64);
    Some(100.0 - 100.0 / (1.0 + rs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn rsi_all_gains_hits_guard() {
        let v = [100.0, 101.0, 102.0, 103.0, 104.0];
        assert_approx(rsi(&v, 4).unwrap(), 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_all_losses_is_zero() {
        // gains = 0, losses > 0: the zero-loss guard must NOT fire here.
        let v = [104.0, 103.0, 102.0, 101.0, 100.0];
        assert_approx(rsi(&v, 4).unwrap(), 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_14_strictly_decreasing_15_bars() {
        let v: Vec<f64> = (0..15).map(|i| 100.0 - i as f64).collect();
        assert_approx(rsi(&v, 14).unwrap(), 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_balanced_moves_is_50() {
        // +1, -1, +1, -1: gains == losses.
        let v = [100.0, 101.0, 100.0, 101.0, 100.0];
        assert_approx(rsi(&v, 4).unwrap(), 50.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_bounds() {
        let v = [100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0];
        let r = rsi(&v, 4).unwrap();
        assert!((0.0..=100.0).contains(&r));
    }

    #[test]
    fn rsi_insufficient_history() {
        let v = [100.0, 101.0, 102.0];
        assert_eq!(rsi(&v, 3), None);
        assert_eq!(rsi(&v, 0), None);
    }
}
