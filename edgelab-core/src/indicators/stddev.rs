//! Rolling standard deviation.
//!
//! Population standard deviation of the last `period` values.

/// Population standard deviation of the last `period` values of `values`.
pub fn std_dev(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    let mean = window.iter().sum::<f64>() / period as f64;
    let var = window.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / period as f64;
    Some(var.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn std_dev_of_constant_is_zero() {
        let v = [5.0; 10];
        assert_approx(std_dev(&v, 5).unwrap(), 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn std_dev_known_values() {
        // [2, 4, 4, 4, 5, 5, 7, 9]: mean 5, population variance 4.
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_approx(std_dev(&v, 8).unwrap(), 2.0, DEFAULT_EPSILON);
    }

    #[test]
    fn std_dev_insufficient_history() {
        assert_eq!(std_dev(&[1.0], 2), None);
    }
}
