//! Bounce strategies: entries near a reference level, confirmed by the
//! bar turning in the bounce direction.
//!
//! `RangeBounce` — edges of the trailing range.
//! `PivotBounce` — floor-trader S1/R1 levels.
//! `SwingPointBounce` — most recent confirmed swing high/low.
//! `ReturnMove` — retest of a broken breakout level.
//! `VwapBounce` — range-weighted average price.

use crate::domain::Signal;
use crate::indicators::{highest, lowest, pivot_levels};
use crate::params::ParamSet;

use super::{SeriesView, SignalStrategy, StrategyId};

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Bounce at the edges of the trailing `range_window` bars: Long when
/// price sits in the lower `bounce_zone` fraction of the range and the bar
/// turned up, Short mirrored at the top. Defaults: window 50, zone 0.15.
/// Minimum look-back: window.
pub struct RangeBounce;

impl SignalStrategy for RangeBounce {
    fn id(&self) -> StrategyId {
        StrategyId::RangeBounce
    }

    fn required_keys(&self) -> &'static [&'static str] {
        &["range_window", "range_bounce_zone"]
    }

    fn evaluate(&self, series: &SeriesView<'_>, index: usize, params: &ParamSet) -> Signal {
        let window = params.tuning_usize("range_window", 50);
        let zone = params.tuning_f64("range_bounce_zone", 0.15);
        if index < window {
            return Signal::None;
        }
        let (Some(high), Some(low)) = (
            highest(&series.highs[..index], window),
            lowest(&series.lows[..index], window),
        ) else {
            return Signal::None;
        };
        let size = high - low;
        let price = series.closes[index];

        let mut signal = Signal::None;
        if price < low + size * zone && series.close_up(index) {
            signal = Signal::Long;
        }
        if price > high - size * zone && series.close_down(index) {
            signal = Signal::Short;
        }
        signal
    }
}

/// Bounce at classic pivot levels: Long near S1 on an up-bar, Short near
/// R1 on a down-bar. "Near" is a relative distance below `touch_pct`.
/// Defaults: lookback 24, touch 0.002. Minimum look-back: lookback.
pub struct PivotBounce;

impl SignalStrategy for PivotBounce {
    fn id(&self) -> StrategyId {
        StrategyId::PivotBounce
    }

    fn required_keys(&self) -> &'static [&'static str] {
        &["pivot_lookback", "pivot_touch_pct"]
    }

    fn evaluate(&self, series: &SeriesView<'_>, index: usize, params: &ParamSet) -> Signal {
        let lookback = params.tuning_usize("pivot_lookback", 24);
        let touch = params.tuning_f64("pivot_touch_pct", 0.002);
        if index < lookback {
            return Signal::None;
        }
        let Some(levels) = pivot_levels(
            &series.highs[..index],
            &series.lows[..index],
            &series.closes[..index],
            lookback,
        ) else {
            return Signal::None;
        };
        let price = series.closes[index];

        let mut signal = Signal::None;
        if (price - levels.s1).abs() / levels.s1 < touch && series.close_up(index) {
            signal = Signal::Long;
        }
        if (price - levels.r1).abs() / levels.r1 < touch && series.close_down(index) {
            signal = Signal::Short;
        }
        signal
    }
}

/// Bounce at the most recent confirmed swing point. A bar is a swing low
/// when its low undercuts the `lookback` bars on both sides; confirmation
/// therefore lags by `lookback` bars, so candidates are collected from the
/// band `[index - 3*lookback, index - lookback)`.
///
/// Defaults: lookback 5, threshold 0.003. Minimum look-back: 3 * lookback.
pub struct SwingPointBounce;

impl SignalStrategy for SwingPointBounce {
    fn id(&self) -> StrategyId {
        StrategyId::SwingPoint
    }

    fn required_keys(&self) -> &'static [&'static str] {
        &["swing_lookback", "swing_bounce_threshold"]
    }

    fn evaluate(&self, series: &SeriesView<'_>, index: usize, params: &ParamSet) -> Signal {
        let lookback = params.tuning_usize("swing_lookback", 5);
        let threshold = params.tuning_f64("swing_bounce_threshold", 0.003);
        if lookback == 0 || index < lookback * 3 {
            return Signal::None;
        }

        let mut swing_lows = Vec::new();
        let mut swing_highs = Vec::new();
        for j in (index - lookback * 3)..(index - lookback) {
            if j < lookback {
                continue;
            }
            let left_lows = &series.lows[j - lookback..j];
            let right_lows = &series.lows[j + 1..j + lookback + 1];
            if series.lows[j] < min_of(left_lows) && series.lows[j] < min_of(right_lows) {
                swing_lows.push(series.lows[j]);
            }
            let left_highs = &series.highs[j - lookback..j];
            let right_highs = &series.highs[j + 1..j + lookback + 1];
            if series.highs[j] > max_of(left_highs) && series.highs[j] > max_of(right_highs) {
                swing_highs.push(series.highs[j]);
            }
        }

        let price = series.closes[index];
        let mut signal = Signal::None;
        if let Some(&nearest) = swing_lows.last() {
            if (price - nearest).abs() / nearest < threshold && series.close_up(index) {
                signal = Signal::Long;
            }
        }
        if let Some(&nearest) = swing_highs.last() {
            if (price - nearest).abs() / nearest < threshold && series.close_down(index) {
                signal = Signal::Short;
            }
        }
        signal
    }
}

/// Return move (breakout retest): after the recent bars broke the prior
/// window's extreme, enter when price comes back within `touch_pct` of the
/// broken level and turns in the breakout direction.
///
/// Defaults: window 20, retest bars 5, touch 0.005.
/// Minimum look-back: window + retest bars.
pub struct ReturnMove;

impl SignalStrategy for ReturnMove {
    fn id(&self) -> StrategyId {
        StrategyId::ReturnMove
    }

    fn required_keys(&self) -> &'static [&'static str] {
        &[
            "return_move_window",
            "return_move_retest_bars",
            "return_move_touch_pct",
        ]
    }

    fn evaluate(&self, series: &SeriesView<'_>, index: usize, params: &ParamSet) -> Signal {
        let window = params.tuning_usize("return_move_window", 20);
        let retest = params.tuning_usize("return_move_retest_bars", 5);
        let touch = params.tuning_f64("return_move_touch_pct", 0.005);
        if window == 0 || retest == 0 || index < window + retest {
            return Signal::None;
        }

        let breakout_high = max_of(&series.highs[index - window - retest..index - retest]);
        let breakout_low = min_of(&series.lows[index - window - retest..index - retest]);
        let recent_high = max_of(&series.highs[index - retest..=index]);
        let recent_low = min_of(&series.lows[index - retest..=index]);
        let price = series.closes[index];

        let mut signal = Signal::None;
        if recent_high > breakout_high * 1.001
            && price >= breakout_high * (1.0 - touch)
            && price <= breakout_high * (1.0 + touch)
            && series.close_up(index)
        {
            signal = Signal::Long;
        }
        if recent_low < breakout_low * 0.999
            && price >= breakout_low * (1.0 - touch)
            && price <= breakout_low * (1.0 + touch)
            && series.close_down(index)
        {
            signal = Signal::Short;
        }
        signal
    }
}

/// Bounce off a rolling range-weighted average price. Bar range stands in
/// for volume as the weight, so the level leans toward the busiest bars.
/// Defaults: period 50, zone 0.002. Minimum look-back: period.
pub struct VwapBounce;

impl SignalStrategy for VwapBounce {
    fn id(&self) -> StrategyId {
        StrategyId::VwapBounce
    }

    fn required_keys(&self) -> &'static [&'static str] {
        &["vwap_period", "vwap_bounce_zone"]
    }

    fn evaluate(&self, series: &SeriesView<'_>, index: usize, params: &ParamSet) -> Signal {
        let period = params.tuning_usize("vwap_period", 50);
        let zone = params.tuning_f64("vwap_bounce_zone", 0.002);
        if index < period {
            return Signal::None;
        }

        let mut sum_pv = 0.0;
        let mut sum_v = 0.0;
        for j in index - period..=index {
            let typical = (series.highs[j] + series.lows[j] + series.closes[j]) / 3.0;
            let weight = series.highs[j] - series.lows[j];
            sum_pv += typical * weight;
            sum_v += weight;
        }
        if sum_v == 0.0 {
            return Signal::None;
        }
        let vwap = sum_pv / sum_v;
        let price = series.closes[index];
        let dist = (price - vwap) / vwap;
        if dist.abs() >= zone {
            return Signal::None;
        }

        let mut signal = Signal::None;
        if series.close_up(index) && price > vwap {
            signal = Signal::Long;
        }
        if series.close_down(index) && price < vwap {
            signal = Signal::Short;
        }
        signal
    }
}
