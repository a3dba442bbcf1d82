//! Highest-high / lowest-low over a trailing window.

/// Maximum of the last `period` values.
pub fn highest(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    values[values.len() - period..]
        .iter()
        .copied()
        .fold(None, |acc: Option<f64>, v| {
            Some(acc.map_or(v, |a| a.max(v)))
        })
}

/// Minimum of the last `period` values.
pub fn lowest(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    values[values.len() - period..]
        .iter()
        .copied()
        .fold(None, |acc: Option<f64>, v| {
            Some(acc.map_or(v, |a| a.min(v)))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highest_and_lowest_trailing_window() {
        let v = [9.0, 1.0, 5.0, 3.0];
        assert_eq!(highest(&v, 3), Some(5.0));
        assert_eq!(lowest(&v, 3), Some(1.0));
        // Full slice picks up the leading 9.
        assert_eq!(highest(&v, 4), Some(9.0));
    }

    #[test]
    fn insufficient_history() {
        assert_eq!(highest(&[1.0], 2), None);
        assert_eq!(lowest(&[], 1), None);
    }
}
