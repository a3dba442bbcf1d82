//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * value[t] + (1 - alpha) * EMA[t-1], with
//! alpha = 2 / (period + 1). Seeded by the first value of the slice and
//! iterated across the whole slice, so the caller controls how much
//! history influences the result by how much slice it passes.

/// EMA over the whole of `values`, seeded by the first value.
///
/// Returns `None` for an empty slice or zero period.
pub fn ema(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.is_empty() {
        return None;
    }
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut acc = values[0];
    for &v in &values[1..] {
        acc = alpha * v + (1.0 - alpha) * acc;
    }
    Some(acc)
}
