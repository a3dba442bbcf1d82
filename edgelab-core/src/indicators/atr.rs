//! Average True Range (ATR).
//!
//! Mean of the true range over the last `period` bars of the slice.
//! TR[j] = max(high - low, |high - prev_close|, |low - prev_close|),
//! so one extra bar of history is needed for the first previous close.

/// ATR over the last `period` bars of aligned `highs`/`lows`/`closes`.
///
/// Slices must be equal length and at least `period + 1` long.
pub fn atr(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Option<f64> {
    let n = highs.len();
    if period == 0 || n != lows.len() || n != closes.len() || n < period + 1 {
        return None;
    }
    let mut sum = 0.0;
    for j in (n - period)..n {
        let hl = highs[j] - lows[j];
        let hc = (highs[j] - closes[j - 1]).abs();
        let lc = (lows[j] - closes[j - 1]).abs();
        sum += hl.max(hc).max(lc);
    }
    Some(sum / period as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn atr_simple_ranges() {
        // Flat closes, constant 2-point bar range: TR = 2 everywhere.
        let highs = [101.0, 101.0, 101.0, 101.0];
        let lows = [99.0, 99.0, 99.0, 99.0];
        let closes = [100.0, 100.0, 100.0, 100.0];
        assert_approx(atr(&highs, &lows, &closes, 3).unwrap(), 2.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_gap_uses_prev_close() {
        // Gap up: bar 1 trades 110-112 after a 100 close, TR = 12.
        let highs = [101.0, 112.0];
        let lows = [99.0, 110.0];
        let closes = [100.0, 111.0];
        assert_approx(atr(&highs, &lows, &closes, 1).unwrap(), 12.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_insufficient_history() {
        let v = [100.0, 101.0];
        assert_eq!(atr(&v, &v, &v, 2), None);
        assert_eq!(atr(&v, &v, &v, 0), None);
    }

    #[test]
    fn atr_mismatched_lengths() {
        let a = [100.0, 101.0, 102.0];
        let b = [100.0, 101.0];
        assert_eq!(atr(&a, &b, &a, 1), None);
    }
}
