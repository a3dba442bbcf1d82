//! Volatility-channel strategies: Bollinger squeeze release, Donchian
//! channel breakout, Keltner channel breach.

use crate::domain::Signal;
use crate::indicators::{atr, ema, highest, lowest, sma, std_dev};
use crate::params::ParamSet;

use super::{SeriesView, SignalStrategy, StrategyId};

/// Bollinger band squeeze release: bandwidth below the squeeze threshold
/// on the previous bar, expanding now, with price outside a band.
/// Defaults: period 20, 2.0 standard deviations, squeeze threshold 0.02.
/// Minimum look-back: 2x period.
pub struct BbSqueeze;

impl SignalStrategy for BbSqueeze {
    fn id(&self) -> StrategyId {
        StrategyId::BbSqueeze
    }

    fn required_keys(&self) -> &'static [&'static str] {
        &["bb_period", "bb_std_dev", "bb_squeeze_threshold"]
    }

    fn evaluate(&self, series: &SeriesView<'_>, index: usize, params: &ParamSet) -> Signal {
        let period = params.tuning_usize("bb_period", 20);
        let mult = params.tuning_f64("bb_std_dev", 2.0);
        let threshold = params.tuning_f64("bb_squeeze_threshold", 0.02);
        if period == 0 || index < period * 2 {
            return Signal::None;
        }

        let bandwidth = |window: &[f64]| -> Option<(f64, f64)> {
            let mean = sma(window, window.len())?;
            let sd = std_dev(window, window.len())?;
            if mean == 0.0 {
                return None;
            }
            Some((mean, 2.0 * mult * sd / mean))
        };

        let cur = &series.closes[index - period..=index];
        let prev = &series.closes[index - period - 1..index];
        let (Some((mean, bw)), Some((_, prev_bw))) = (bandwidth(cur), bandwidth(prev)) else {
            return Signal::None;
        };
        if prev_bw >= threshold || bw <= prev_bw * 1.1 {
            return Signal::None;
        }

        let sd = bw * mean / (2.0 * mult);
        let price = series.closes[index];
        let mut signal = Signal::None;
        if price > mean + mult * sd {
            signal = Signal::Long;
        }
        if price < mean - mult * sd {
            signal = Signal::Short;
        }
        signal
    }
}

/// Donchian channel breakout: close beyond the highest high or lowest low
/// of the trailing window, current bar excluded from the channel.
/// Default period 20.
pub struct DonchianBreakout;

impl SignalStrategy for DonchianBreakout {
    fn id(&self) -> StrategyId {
        StrategyId::DonchianBreakout
    }

    fn required_keys(&self) -> &'static [&'static str] {
        &["donchian_period"]
    }

    fn evaluate(&self, series: &SeriesView<'_>, index: usize, params: &ParamSet) -> Signal {
        let period = params.tuning_usize("donchian_period", 20);
        if index < period {
            return Signal::None;
        }
        let (Some(upper), Some(lower)) = (
            highest(&series.highs[..index], period),
            lowest(&series.lows[..index], period),
        ) else {
            return Signal::None;
        };
        let price = series.closes[index];

        let mut signal = Signal::None;
        if price > upper {
            signal = Signal::Long;
        }
        if price < lower {
            signal = Signal::Short;
        }
        signal
    }
}

/// Keltner channel breach: EMA midline with an ATR envelope, close beyond
/// the envelope confirmed by the bar direction.
/// Defaults: EMA 20, ATR 10, multiplier 1.5.
pub struct KeltnerChannel;

impl SignalStrategy for KeltnerChannel {
    fn id(&self) -> StrategyId {
        StrategyId::KeltnerChannel
    }

    fn required_keys(&self) -> &'static [&'static str] {
        &["kc_ema_period", "kc_atr_period", "kc_atr_mult"]
    }

    fn evaluate(&self, series: &SeriesView<'_>, index: usize, params: &ParamSet) -> Signal {
        let ema_p = params.tuning_usize("kc_ema_period", 20);
        let atr_p = params.tuning_usize("kc_atr_period", 10);
        let mult = params.tuning_f64("kc_atr_mult", 1.5);
        if index < ema_p.max(atr_p) + 1 {
            return Signal::None;
        }
        let (Some(mid), Some(range)) = (
            ema(&series.closes[..=index], ema_p),
            atr(
                &series.highs[..index],
                &series.lows[..index],
                &series.closes[..index],
                atr_p,
            ),
        ) else {
            return Signal::None;
        };
        let price = series.closes[index];

        let mut signal = Signal::None;
        if price > mid + mult * range && series.close_up(index) {
            signal = Signal::Long;
        }
        if price < mid - mult * range && series.close_down(index) {
            signal = Signal::Short;
        }
        signal
    }
}
