//! Trend-regime strategies: supertrend band flips and Ichimoku cloud
//! breaks.

use crate::domain::Signal;
use crate::indicators::{atr, highest, lowest};
use crate::params::ParamSet;

use super::{SeriesView, SignalStrategy, StrategyId};

/// Supertrend flip: ATR bands around the current bar's (high+low)/2,
/// firing only on the bar where the close first clears a band while the
/// prior close was still inside its own bands.
/// Defaults: ATR period 10, multiplier 3.0.
/// Minimum look-back: ATR period + 2, so the prior bar has its own bands.
pub struct SupertrendFlip;

impl SignalStrategy for SupertrendFlip {
    fn id(&self) -> StrategyId {
        StrategyId::Supertrend
    }

    fn required_keys(&self) -> &'static [&'static str] {
        &["st_atr_period", "st_multiplier"]
    }

    fn evaluate(&self, series: &SeriesView<'_>, index: usize, params: &ParamSet) -> Signal {
        let atr_p = params.tuning_usize("st_atr_period", 10);
        let mult = params.tuning_f64("st_multiplier", 3.0);
        if index < atr_p + 2 {
            return Signal::None;
        }

        let bands = |end: usize, range: f64| {
            let hl2 = (series.highs[end] + series.lows[end]) / 2.0;
            (hl2 + mult * range, hl2 - mult * range)
        };
        let (Some(range), Some(prev_range)) = (
            atr(
                &series.highs[..index],
                &series.lows[..index],
                &series.closes[..index],
                atr_p,
            ),
            atr(
                &series.highs[..index - 1],
                &series.lows[..index - 1],
                &series.closes[..index - 1],
                atr_p,
            ),
        ) else {
            return Signal::None;
        };
        let (upper, lower) = bands(index, range);
        let (prev_upper, prev_lower) = bands(index - 1, prev_range);
        let price = series.closes[index];
        let prev_price = series.closes[index - 1];

        let mut signal = Signal::None;
        if price > upper && prev_price <= prev_upper {
            signal = Signal::Long;
        }
        if price < lower && prev_price >= prev_lower {
            signal = Signal::Short;
        }
        signal
    }
}

/// Ichimoku cloud break: tenkan/kijun/senkou midlines over their windows,
/// cloud = span between senkou A and the senkou-window midline. Fires on
/// the bar where the close crosses out of the cloud.
/// Defaults: tenkan 9, kijun 26, senkou 52.
pub struct IchimokuCloudBreak;

impl SignalStrategy for IchimokuCloudBreak {
    fn id(&self) -> StrategyId {
        StrategyId::IchimokuCloud
    }

    fn required_keys(&self) -> &'static [&'static str] {
        &["ichi_tenkan", "ichi_kijun", "ichi_senkou"]
    }

    fn evaluate(&self, series: &SeriesView<'_>, index: usize, params: &ParamSet) -> Signal {
        let tenkan_p = params.tuning_usize("ichi_tenkan", 9);
        let kijun_p = params.tuning_usize("ichi_kijun", 26);
        let senkou_p = params.tuning_usize("ichi_senkou", 52);
        if index < senkou_p {
            return Signal::None;
        }

        let midline = |period: usize| -> Option<f64> {
            let hh = highest(&series.highs[..=index], period)?;
            let ll = lowest(&series.lows[..=index], period)?;
            Some((hh + ll) / 2.0)
        };
        let (Some(tenkan), Some(kijun), Some(senkou_b)) =
            (midline(tenkan_p), midline(kijun_p), midline(senkou_p))
        else {
            return Signal::None;
        };
        let senkou_a = (tenkan + kijun) / 2.0;
        let cloud_top = senkou_a.max(senkou_b);
        let cloud_bottom = senkou_a.min(senkou_b);
        let price = series.closes[index];
        let prev_price = series.closes[index - 1];

        let mut signal = Signal::None;
        if price > cloud_top && prev_price <= cloud_top {
            signal = Signal::Long;
        }
        if price < cloud_bottom && prev_price >= cloud_bottom {
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

    /// Quiet bars with a 0.2 range: ATR 0.2, bands 0.6 off each midpoint.
    fn quiet_bars(n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        (vec![100.0; n], vec![100.1; n], vec![99.9; n])
    }

    #[test]
    fn supertrend_fires_once_per_break() {
        // The breakout bar spans 100-104.1 and closes at 104, putting the
        // close 1.95 above its own midpoint and past the 0.6 band. The
        // follow-through bar closes back at its midpoint and stays quiet.
        let (mut closes, mut highs, mut lows) = quiet_bars(20);
        closes.push(104.0);
        highs.push(104.1);
        lows.push(100.0);
        closes.push(104.0);
        highs.push(104.1);
        lows.push(103.9);
        let series = SeriesView::new(&closes, &highs, &lows);
        let p = params_for(StrategyId::Supertrend);
        assert_eq!(SupertrendFlip.evaluate(&series, 20, &p), Signal::Long);
        assert_eq!(SupertrendFlip.evaluate(&series, 21, &p), Signal::None);
    }

    #[test]
    fn supertrend_short_on_downside_break() {
        let (mut closes, mut highs, mut lows) = quiet_bars(20);
        closes.push(96.0);
        highs.push(100.0);
        lows.push(95.9);
        let series = SeriesView::new(&closes, &highs, &lows);
        let p = params_for(StrategyId::Supertrend);
        assert_eq!(SupertrendFlip.evaluate(&series, 20, &p), Signal::Short);
    }

    #[test]
    fn supertrend_ignores_a_jump_that_stays_inside_its_own_bands() {
        // A close sitting at its own bar's midpoint can never clear a
        // band, however far it gapped from the prior bar.
        let mut closes = vec![100.0; 20];
        closes.push(104.0);
        let series = OwnedSeries::from_closes(&closes);
        let p = params_for(StrategyId::Supertrend);
        assert_eq!(SupertrendFlip.evaluate(&series.view(), 20, &p), Signal::None);
    }

    #[test]
    fn ichimoku_longs_on_cloud_exit() {
        // Flat history puts the whole cloud at 100; the first close above it
        // with the prior close still at or under it fires Long.
        let mut closes = vec![100.0; 60];
        closes.push(102.0);
        let series = OwnedSeries::from_closes(&closes);
        let p = params_for(StrategyId::IchimokuCloud);
        assert_eq!(
            IchimokuCloudBreak.evaluate(&series.view(), 60, &p),
            Signal::Long
        );
    }

    #[test]
    fn ichimoku_quiet_inside_cloud() {
        let closes = vec![100.0; 60];
        let series = OwnedSeries::from_closes(&closes);
        let p = params_for(StrategyId::IchimokuCloud);
        assert_eq!(
            IchimokuCloudBreak.evaluate(&series.view(), 59, &p),
            Signal::None
        );
    }
}
