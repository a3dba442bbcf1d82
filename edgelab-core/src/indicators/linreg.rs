//! Linear regression over a trailing window.
//!
//! Ordinary least squares of the last `period` values against
//! x = 0..period. Returns (slope, intercept).

/// Least-squares slope and intercept over the last `period` values.
pub fn linreg(values: &[f64], period: usize) -> Option<(f64, f64)> {
    if period < 2 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    let n = period as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    for (j, &y) in window.iter().enumerate() {
        let x = j as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }
    let denom = n * sum_x2 - sum_x * sum_x;
    if denom == 0.0 {
        return None;
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n;
    Some((slope, intercept))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn linreg_perfect_line() {
        // y = 2x + 1
        let v = [1.0, 3.0, 5.0, 7.0, 9.0];
        let (slope, intercept) = linreg(&v, 5).unwrap();
        assert_approx(slope, 2.0, DEFAULT_EPSILON);
        assert_approx(intercept, 1.0, DEFAULT_EPSILON);
    }

    #[test]
    fn linreg_flat_series() {
        let v = [4.0; 10];
        let (slope, intercept) = linreg(&v, 10).unwrap();
        assert_approx(slope, 0.0, DEFAULT_EPSILON);
        assert_approx(intercept, 4.0, DEFAULT_EPSILON);
    }

    #[test]
    fn linreg_uses_trailing_window() {
        // Leading garbage should not affect the trailing fit.
        let v = [100.0, -50.0, 1.0, 2.0, 3.0];
        let (slope, _) = linreg(&v, 3).unwrap();
        assert_approx(slope, 1.0, DEFAULT_EPSILON);
    }

    #[test]
    fn linreg_insufficient_history() {
        assert_eq!(linreg(&[1.0], 2), None);
        assert_eq!(linreg(&[1.0, 2.0], 3), None);
    }
}
