//! Moving-average cross strategies.
//!
//! `MaCross` — SMA golden/death cross.
//! `EmaCrossRsi` — EMA cross gated by an RSI filter.

use crate::domain::Signal;
use crate::indicators::{ema, rsi, sma};
use crate::params::ParamSet;

use super::{SeriesView, SignalStrategy, StrategyId};

/// SMA crossover. Long when the fast average crosses above the slow
/// (previous bar fast <= slow, current bar fast > slow); Short on the
/// mirror cross. Equality on the current bar never fires.
///
/// Defaults: fast 9, slow 21. Minimum look-back: slow period.
pub struct MaCross;

impl SignalStrategy for MaCross {
    fn id(&self) -> StrategyId {
        StrategyId::MaCross
    }

    fn required_keys(&self) -> &'static [&'static str] {
        &["ma_fast", "ma_slow"]
    }

    fn evaluate(&self, series: &SeriesView<'_>, index: usize, params: &ParamSet) -> Signal {
        let fast_p = params.tuning_usize("ma_fast", 9);
        let slow_p = params.tuning_usize("ma_slow", 21);
        if index < 1 {
            return Signal::None;
        }

        let cur = &series.closes[..=index];
        let prev = &series.closes[..index];
        let (Some(fast), Some(slow), Some(prev_fast), Some(prev_slow)) = (
            sma(cur, fast_p),
            sma(cur, slow_p),
            sma(prev, fast_p),
            sma(prev, slow_p),
        ) else {
            return Signal::None;
        };

        let mut signal = Signal::None;
        if prev_fast <= prev_slow && fast > slow {
            signal = Signal::Long;
        }
        if prev_fast >= prev_slow && fast < slow {
            signal = Signal::Short;
        }
        signal
    }
}

/// EMA crossover gated by RSI: a bullish cross only fires when RSI sits
/// above the filter level, a bearish cross only below (100 - filter).
/// The EMAs are computed over the trailing 3x-period tail of the series.
///
/// Defaults: fast 8, slow 21, RSI 14, filter 45.
/// Minimum look-back: max(slow, rsi period) + 2.
pub struct EmaCrossRsi;

impl SignalStrategy for EmaCrossRsi {
    fn id(&self) -> StrategyId {
        StrategyId::EmaCrossRsi
    }

    fn required_keys(&self) -> &'static [&'static str] {
        &["ec_fast_ema", "ec_slow_ema", "ec_rsi_period", "ec_rsi_filter"]
    }

    fn evaluate(&self, series: &SeriesView<'_>, index: usize, params: &ParamSet) -> Signal {
        let fast_len = params.tuning_usize("ec_fast_ema", 8);
        let slow_len = params.tuning_usize("ec_slow_ema", 21);
        let rsi_p = params.tuning_usize("ec_rsi_period", 14);
        let filter = params.tuning_f64("ec_rsi_filter", 45.0);
        if index < slow_len.max(rsi_p) + 2 {
            return Signal::None;
        }

        fn tail(s: &[f64], n: usize) -> &[f64] {
            &s[s.len().saturating_sub(n)..]
        }
        let cur = &series.closes[..=index];
        let prev = &series.closes[..index];

        let (Some(fast_now), Some(fast_prev), Some(slow_now), Some(slow_prev), Some(r)) = (
            ema(tail(cur, fast_len * 3), fast_len),
            ema(tail(prev, fast_len * 3), fast_len),
            ema(tail(cur, slow_len * 3), slow_len),
            ema(tail(prev, slow_len * 3), slow_len),
            rsi(cur, rsi_p),
        ) else {
            return Signal::None;
        };

        let mut signal = Signal::None;
        if fast_prev <= slow_prev && fast_now > slow_now && r > filter {
            signal = Signal::Long;
        }
        if fast_prev >= slow_prev && fast_now < slow_now && r < 100.0 - filter {
            signal = Signal::Short;
        }
        signal
    }
}
