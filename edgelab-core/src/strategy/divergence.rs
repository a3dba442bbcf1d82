//! Divergence strategies: price making a new extreme that the indicator
//! refuses to confirm.

use crate::domain::Signal;
use crate::indicators::ema;
use crate::params::ParamSet;

use super::{SeriesView, SignalStrategy, StrategyId};

/// On-balance-volume divergence: price lower over the window while OBV is
/// higher reads as hidden accumulation (Long), and the mirror as hidden
/// distribution (Short). Volume is proxied by the bar range so the series
/// stays price-only.
/// Defaults: window 10.
pub struct ObvDivergence;

impl SignalStrategy for ObvDivergence {
    fn id(&self) -> StrategyId {
        StrategyId::ObvDivergence
    }

    fn required_keys(&self) -> &'static [&'static str] {
        &["obv_div_window"]
    }

    fn evaluate(&self, series: &SeriesView<'_>, index: usize, params: &ParamSet) -> Signal {
        let window = params.tuning_usize("obv_div_window", 10);
        if window == 0 || index < window + 1 {
            return Signal::None;
        }

        let mut obv = 0.0;
        let mut obv_then = 0.0;
        for j in 1..=index {
            let weight = series.highs[j] - series.lows[j];
            if series.closes[j] > series.closes[j - 1] {
                obv += weight;
            } else if series.closes[j] < series.closes[j - 1] {
                obv -= weight;
            }
            if j == index - window {
                obv_then = obv;
            }
        }

        let price = series.closes[index];
        let price_then = series.closes[index - window];
        let mut signal = Signal::None;
        if price < price_then && obv > obv_then && series.close_up(index) {
            signal = Signal::Long;
        }
        if price > price_then && obv < obv_then && series.close_down(index) {
            signal = Signal::Short;
        }
        signal
    }
}

/// MACD histogram divergence over a comparison window, confirmed by the
/// bar direction. The histogram is the fast EMA minus the slow EMA, each
/// taken over a tail three periods deep.
/// Defaults: fast 12, slow 26, window 10.
pub struct MacdDivergence;

impl MacdDivergence {
    fn histogram(closes: &[f64], idx: usize, fast: usize, slow: usize) -> Option<f64> {
        let tail = |period: usize| {
            let depth = (period * 3).min(idx + 1);
            &closes[idx + 1 - depth..=idx]
        };
        Some(ema(tail(fast), fast)? - ema(tail(slow), slow)?)
    }
}

impl SignalStrategy for MacdDivergence {
    fn id(&self) -> StrategyId {
        StrategyId::MacdDivergence
    }

    fn required_keys(&self) -> &'static [&'static str] {
        &["macd_fast", "macd_slow", "macd_div_window"]
    }

    fn evaluate(&self, series: &SeriesView<'_>, index: usize, params: &ParamSet) -> Signal {
        let fast = params.tuning_usize("macd_fast", 12);
        let slow = params.tuning_usize("macd_slow", 26);
        let window = params.tuning_usize("macd_div_window", 10);
        if window == 0 || index < slow + window + 10 {
            return Signal::None;
        }
        let (Some(hist), Some(hist_then)) = (
            Self::histogram(series.closes, index, fast, slow),
            Self::histogram(series.closes, index - window, fast, slow),
        ) else {
            return Signal::None;
        };

        let price = series.closes[index];
        let price_then = series.closes[index - window];
        let mut signal = Signal::None;
        if price < price_then && hist > hist_then && series.close_up(index) {
            signal = Signal::Long;
        }
        if price > price_then && hist < hist_then && series.close_down(index) {
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
    fn obv_divergence_longs_on_hidden_accumulation() {
        // One hard down bar at the start of the window, then nine up bars
        // that do not recover the loss: price lower over the window while
        // OBV nets higher, and the last bar closes up.
        let mut closes = vec![100.0, 100.0, 100.0, 90.0];
        for k in 0..9 {
            closes.push(90.0 + 0.3 * (k + 1) as f64);
        }
        let series = OwnedSeries::from_closes(&closes);
        let p = params_for(StrategyId::ObvDivergence);
        let index = closes.len() - 1;
        // price 92.7 < price_then 100.0, window OBV is +8 bar-ranges.
        assert_eq!(
            ObvDivergence.evaluate(&series.view(), index, &p),
            Signal::Long
        );
    }

    #[test]
    fn obv_divergence_quiet_when_obv_confirms() {
        // Steady decline: price lower and OBV lower, no divergence.
        let closes: Vec<f64> = (0..20).map(|k| 100.0 - 0.3 * k as f64).collect();
        let series = OwnedSeries::from_closes(&closes);
        let p = params_for(StrategyId::ObvDivergence);
        assert_eq!(ObvDivergence.evaluate(&series.view(), 19, &p), Signal::None);
    }

    #[test]
    fn macd_divergence_needs_history() {
        let closes = vec![100.0; 40];
        let series = OwnedSeries::from_closes(&closes);
        let p = params_for(StrategyId::MacdDivergence);
        assert_eq!(
            MacdDivergence.evaluate(&series.view(), 39, &p),
            Signal::None
        );
    }

    #[test]
    fn macd_divergence_flat_series_quiet() {
        let closes = vec![100.0; 80];
        let series = OwnedSeries::from_closes(&closes);
        let p = params_for(StrategyId::MacdDivergence);
        assert_eq!(
            MacdDivergence.evaluate(&series.view(), 79, &p),
            Signal::None
        );
    }
}
