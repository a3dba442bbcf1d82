//! Indicator library: pure, stateless functions over numeric slices.
//!
//! Every function evaluates a window that is right-aligned at the end of
//! the passed slice; callers pass `&series[..=i]` to evaluate at bar `i`,
//! so nothing here can look ahead of the evaluation index. Insufficient
//! history returns `None`.

pub mod atr;
pub mod ema;
pub mod extremes;
pub mod linreg;
pub mod pivot;
pub mod rsi;
pub mod sma;
pub mod stddev;

pub use atr::atr;
pub use ema::ema;
pub use extremes::{highest, lowest};
pub use linreg::linreg;
pub use pivot::{pivot_levels, PivotLevels};
pub use rsi::rsi;
pub use sma::sma;
pub use stddev::std_dev;

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
