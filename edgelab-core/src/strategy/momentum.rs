//! Momentum and breakout strategies.
//!
//! `MomentumThreshold` — contrarian entry on a move beyond a threshold.
//! `WindowBreakout` — close beyond the prior window's extreme.
//! `AtrBreakout` — close beyond an ATR-sized band around the window mean.

use crate::domain::Signal;
use crate::indicators::{atr, highest, lowest, sma};
use crate::params::ParamSet;

use super::{SeriesView, SignalStrategy, StrategyId};

/// Contrarian momentum: a drop beyond the threshold over the window is
/// bought, a rise beyond it is sold. Defaults: window 5, threshold 0.002.
/// Minimum look-back: window.
pub struct MomentumThreshold;

impl SignalStrategy for MomentumThreshold {
    fn id(&self) -> StrategyId {
        StrategyId::Momentum
    }

    fn required_keys(&self) -> &'static [&'static str] {
        &["momentum_window", "momentum_threshold"]
    }

    fn evaluate(&self, series: &SeriesView<'_>, index: usize, params: &ParamSet) -> Signal {
        let window = params.tuning_usize("momentum_window", 5);
        let threshold = params.tuning_f64("momentum_threshold", 0.002);
        if window == 0 || index < window {
            return Signal::None;
        }
        let base = series.closes[index - window];
        let change = (series.closes[index] - base) / base;

        let mut signal = Signal::None;
        if change < -threshold {
            signal = Signal::Long;
        }
        if change > threshold {
            signal = Signal::Short;
        }
        signal
    }
}

/// Window breakout: close above the prior `window` bars' highest high is
/// Long, below the lowest low is Short. The current bar is excluded from
/// the window. Default window 10. Minimum look-back: window.
pub struct WindowBreakout;

impl SignalStrategy for WindowBreakout {
    fn id(&self) -> StrategyId {
        StrategyId::Breakout
    }

    fn required_keys(&self) -> &'static [&'static str] {
        &["breakout_window"]
    }

    fn evaluate(&self, series: &SeriesView<'_>, index: usize, params: &ParamSet) -> Signal {
        let window = params.tuning_usize("breakout_window", 10);
        if index < window {
            return Signal::None;
        }
        let (Some(high), Some(low)) = (
            highest(&series.highs[..index], window),
            lowest(&series.lows[..index], window),
        ) else {
            return Signal::None;
        };
        let price = series.closes[index];

        let mut signal = Signal::None;
        if price > high {
            signal = Signal::Long;
        }
        if price < low {
            signal = Signal::Short;
        }
        signal
    }
}

/// ATR channel breakout: close beyond `mean ± multiplier * ATR`, confirmed
/// by the bar moving in the breakout direction.
///
/// Defaults: ATR 14, multiplier 1.5, lookback 20.
/// Minimum look-back: max(ATR period, lookback) + 1.
pub struct AtrBreakout;

impl SignalStrategy for AtrBreakout {
    fn id(&self) -> StrategyId {
        StrategyId::AtrBreakout
    }

    fn required_keys(&self) -> &'static [&'static str] {
        &["atr_bo_period", "atr_bo_multiplier", "atr_bo_lookback"]
    }

    fn evaluate(&self, series: &SeriesView<'_>, index: usize, params: &ParamSet) -> Signal {
        let atr_p = params.tuning_usize("atr_bo_period", 14);
        let mult = params.tuning_f64("atr_bo_multiplier", 1.5);
        let lookback = params.tuning_usize("atr_bo_lookback", 20);
        if index < atr_p.max(lookback) + 1 {
            return Signal::None;
        }

        let (Some(range), Some(mid)) = (
            atr(
                &series.highs[..index],
                &series.lows[..index],
                &series.closes[..index],
                atr_p,
            ),
            sma(&series.closes[..index], lookback),
        ) else {
            return Signal::None;
        };
        let price = series.closes[index];

        let mut signal = Signal::None;
        if price > mid + range * mult && series.close_up(index) {
            signal = Signal::Long;
        }
        if price < mid - range * mult && series.close_down(index) {
            signal = Signal::Short;
        }
        signal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Interval, PositionMode};
    use crate::strategy::test_support::OwnedSeries;

    fn params_for(id: StrategyId) -> ParamSet {
        ParamSet::new(id, Interval::H1, PositionMode::Basic, 3, 0.01, 0.005)
    }

    #[test]
    fn momentum_buys_the_dip() {
        // 1% drop over 5 bars with default 0.2% threshold.
        let closes = [100.0, 100.0, 100.0, 100.0, 100.0, 99.0];
        let series = OwnedSeries::from_closes(&closes);
        let p = params_for(StrategyId::Momentum);
        assert_eq!(
            MomentumThreshold.evaluate(&series.view(), 5, &p),
            Signal::Long
        );
    }

    #[test]
    fn momentum_sells_the_rip() {
        let closes = [100.0, 100.0, 100.0, 100.0, 100.0, 101.0];
        let series = OwnedSeries::from_closes(&closes);
        let p = params_for(StrategyId::Momentum);
        assert_eq!(
            MomentumThreshold.evaluate(&series.view(), 5, &p),
            Signal::Short
        );
    }

    #[test]
    fn momentum_quiet_inside_threshold() {
        let closes = [100.0, 100.0, 100.0, 100.0, 100.0, 100.1];
        let series = OwnedSeries::from_closes(&closes);
        let p = params_for(StrategyId::Momentum);
        assert_eq!(
            MomentumThreshold.evaluate(&series.view(), 5, &p),
            Signal::None
        );
    }

    #[test]
    fn breakout_fires_above_prior_high() {
        // Highs sit at close + 0.5; a close at 102 beats the prior 100.5 highs.
        let mut closes = vec![100.0; 11];
        closes.push(102.0);
        let series = OwnedSeries::from_closes(&closes);
        let mut p = params_for(StrategyId::Breakout);
        p.set("breakout_window", 10.0);
        assert_eq!(WindowBreakout.evaluate(&series.view(), 11, &p), Signal::Long);
    }

    #[test]
    fn breakout_quiet_inside_range() {
        let closes = vec![100.0; 12];
        let series = OwnedSeries::from_closes(&closes);
        let mut p = params_for(StrategyId::Breakout);
        p.set("breakout_window", 10.0);
        assert_eq!(WindowBreakout.evaluate(&series.view(), 11, &p), Signal::None);
    }

    #[test]
    fn atr_breakout_needs_direction_confirmation() {
        // Price leaps above the band but the close fell vs the prior bar:
        // no signal.
        let mut closes = vec![100.0; 30];
        closes.push(108.0);
        closes.push(107.0);
        let series = OwnedSeries::from_closes(&closes);
        let mut p = params_for(StrategyId::AtrBreakout);
        p.set("atr_bo_period", 14.0)
            .set("atr_bo_multiplier", 1.5)
            .set("atr_bo_lookback", 20.0);

        let view = series.view();
        assert_eq!(AtrBreakout.evaluate(&view, 30, &p), Signal::Long);
        assert_eq!(AtrBreakout.evaluate(&view, 31, &p), Signal::None);
    }
}
