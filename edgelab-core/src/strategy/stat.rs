//! Statistical strategies: deviation from a fitted regression line.

use crate::domain::Signal;
use crate::indicators::linreg;
use crate::params::ParamSet;

use super::{SeriesView, SignalStrategy, StrategyId};

/// Linear-regression deviation: fit a line over the trailing window,
/// project it to the current bar, and fade closes that sit beyond a
/// residual-standard-deviation envelope.
/// Defaults: period 30, 2.0 deviations.
pub struct LinRegDeviation;

impl SignalStrategy for LinRegDeviation {
    fn id(&self) -> StrategyId {
        StrategyId::LinearRegression
    }

    fn required_keys(&self) -> &'static [&'static str] {
        &["lr_period", "lr_dev_mult"]
    }

    fn evaluate(&self, series: &SeriesView<'_>, index: usize, params: &ParamSet) -> Signal {
        let period = params.tuning_usize("lr_period", 30);
        let mult = params.tuning_f64("lr_dev_mult", 2.0);
        if period < 2 || index < period {
            return Signal::None;
        }

        let window = &series.closes[index + 1 - period..=index];
        let Some((slope, intercept)) = linreg(window, period) else {
            return Signal::None;
        };
        let predicted = intercept + slope * (period - 1) as f64;
        let residual_var = window
            .iter()
            .enumerate()
            .map(|(x, &y)| {
                let d = y - (intercept + slope * x as f64);
                d * d
            })
            .sum::<f64>()
            / period as f64;
        let sd = residual_var.sqrt();
        if sd == 0.0 {
            return Signal::None;
        }
        let price = series.closes[index];

        let mut signal = Signal::None;
        if price < predicted - mult * sd && series.close_up(index) {
            signal = Signal::Long;
        }
        if price > predicted + mult * sd && series.close_down(index) {
            signal = Signal::Short;
        }
        signal
    }
}
