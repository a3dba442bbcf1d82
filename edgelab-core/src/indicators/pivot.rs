//! Classic floor-trader pivot levels.
//!
//! Computed from the high, low, and final close of the last `lookback`
//! bars: pivot = (H + L + C) / 3, S1 = 2*pivot - H, R1 = 2*pivot - L.

use super::{highest, lowest};

/// Pivot point with first support and resistance levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotLevels {
    pub pivot: f64,
    pub s1: f64,
    pub r1: f64,
}

/// Pivot levels from the last `lookback` bars of aligned series.
pub fn pivot_levels(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    lookback: usize,
) -> Option<PivotLevels> {
    let n = highs.len();
    if lookback == 0 || n != lows.len() || n != closes.len() || n < lookback {
        return None;
    }
    let h = highest(&highs[..n], lookback)?;
    let l = lowest(&lows[..n], lookback)?;
    let c = closes[n - 1];
    let pivot = (h + l + c) / 3.0;
    Some(PivotLevels {
        pivot,
        s1: 2.0 * pivot - h,
        r1: 2.0 * pivot - l,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn pivot_symmetric_range() {
        // H=110, L=90, C=100: pivot=100, S1=90, R1=110.
        let highs = [105.0, 110.0, 104.0];
        let lows = [95.0, 90.0, 96.0];
        let closes = [100.0, 100.0, 100.0];
        let p = pivot_levels(&highs, &lows, &closes, 3).unwrap();
        assert_approx(p.pivot, 100.0, DEFAULT_EPSILON);
        assert_approx(p.s1, 90.0, DEFAULT_EPSILON);
        assert_approx(p.r1, 110.0, DEFAULT_EPSILON);
    }

    #[test]
    fn pivot_insufficient_history() {
        let v = [1.0, 2.0];
        assert_eq!(pivot_levels(&v, &v, &v, 3), None);
    }
}
