//! Oscillator-extreme strategies.
//!
//! `RsiReversion` — RSI beyond the oversold/overbought bands.
//! `RsiMomentum` — RSI extreme confirmed by a price move over a window.
//! `StochRsi` — stochastic of an RSI series.
//! `WilliamsR` — Williams %R extremes.

use crate::domain::Signal;
use crate::indicators::{highest, lowest, rsi};
use crate::params::ParamSet;

use super::{SeriesView, SignalStrategy, StrategyId};

/// RSI mean reversion: Long below the oversold level, Short above the
/// overbought level. Strictly beyond the level; sitting on it is quiet.
/// Defaults: period 14, oversold 30, overbought 70.
/// Minimum look-back: period + 1.
pub struct RsiReversion;

impl SignalStrategy for RsiReversion {
    fn id(&self) -> StrategyId {
        StrategyId::RsiReversion
    }

    fn required_keys(&self) -> &'static [&'static str] {
        &["rsi_period", "rsi_oversold", "rsi_overbought"]
    }

    fn evaluate(&self, series: &SeriesView<'_>, index: usize, params: &ParamSet) -> Signal {
        let period = params.tuning_usize("rsi_period", 14);
        let oversold = params.tuning_f64("rsi_oversold", 30.0);
        let overbought = params.tuning_f64("rsi_overbought", 70.0);
        let Some(r) = rsi(&series.closes[..=index], period) else {
            return Signal::None;
        };

        let mut signal = Signal::None;
        if r < oversold {
            signal = Signal::Long;
        }
        if r > overbought {
            signal = Signal::Short;
        }
        signal
    }
}

/// RSI extreme confirmed by momentum: the oversold Long additionally needs
/// a drop beyond the threshold over the momentum window (and mirrored for
/// Short), filtering out extremes reached by drift.
/// Defaults: RSI 14/30/70, window 5, threshold 0.002.
pub struct RsiMomentum;

impl SignalStrategy for RsiMomentum {
    fn id(&self) -> StrategyId {
        StrategyId::RsiMomentum
    }

    fn required_keys(&self) -> &'static [&'static str] {
        &[
            "rsi_period",
            "rsi_oversold",
            "rsi_overbought",
            "momentum_window",
            "momentum_threshold",
        ]
    }

    fn evaluate(&self, series: &SeriesView<'_>, index: usize, params: &ParamSet) -> Signal {
        let period = params.tuning_usize("rsi_period", 14);
        let oversold = params.tuning_f64("rsi_oversold", 30.0);
        let overbought = params.tuning_f64("rsi_overbought", 70.0);
        let window = params.tuning_usize("momentum_window", 5);
        let threshold = params.tuning_f64("momentum_threshold", 0.002);
        if window == 0 || index < window {
            return Signal::None;
        }
        let Some(r) = rsi(&series.closes[..=index], period) else {
            return Signal::None;
        };
        let base = series.closes[index - window];
        let change = (series.closes[index] - base) / base;

        let mut signal = Signal::None;
        if r < oversold && change < -threshold {
            signal = Signal::Long;
        }
        if r > overbought && change > threshold {
            signal = Signal::Short;
        }
        signal
    }
}

/// Stochastic RSI: position of the current RSI within its own recent
/// range, scaled to 0..100. The RSI series here is the plain gain/loss
/// ratio per bar with an epsilon loss guard (the historical definition for
/// this strategy, kept distinct from the `indicators::rsi` entry guard).
///
/// Defaults: RSI 14, stochastic 14, oversold 20, overbought 80.
/// Minimum look-back: RSI period + stochastic period.
pub struct StochRsi;

impl SignalStrategy for StochRsi {
    fn id(&self) -> StrategyId {
        StrategyId::StochRsi
    }

    fn required_keys(&self) -> &'static [&'static str] {
        &["sr_rsi_period", "sr_stoch_period", "sr_oversold", "sr_overbought"]
    }

    fn evaluate(&self, series: &SeriesView<'_>, index: usize, params: &ParamSet) -> Signal {
        let rsi_p = params.tuning_usize("sr_rsi_period", 14);
        let stoch_p = params.tuning_usize("sr_stoch_period", 14);
        let oversold = params.tuning_f64("sr_oversold", 20.0);
        let overbought = params.tuning_f64("sr_overbought", 80.0);
        if rsi_p == 0 || index < rsi_p + stoch_p {
            return Signal::None;
        }

        let closes = series.closes;
        let mut rsis = Vec::with_capacity(stoch_p + 1);
        for k in index - stoch_p..=index {
            let mut gains = 0.0;
            let mut losses = 0.0;
            for j in k - rsi_p..k {
                let d = closes[j + 1] - closes[j];
                if d > 0.0 {
                    gains += d;
                } else {
                    losses -= d;
                }
            }
            let losses = if losses == 0.0 { 1e-4 } else { losses };
            rsis.push(100.0 - 100.0 / (1.0 + gains / losses));
        }

        let hi = rsis.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let lo = rsis.iter().copied().fold(f64::INFINITY, f64::min);
        let stoch = if hi != lo {
            (rsis[rsis.len() - 1] - lo) / (hi - lo) * 100.0
        } else {
            50.0
        };

        let mut signal = Signal::None;
        if stoch < oversold && series.close_up(index) {
            signal = Signal::Long;
        }
        if stoch > overbought && series.close_down(index) {
            signal = Signal::Short;
        }
        signal
    }
}

/// Williams %R: (HH - close) / (HH - LL) * -100 over the trailing window
/// (current bar included). A flat window reads -50.
/// Defaults: period 14, oversold -80, overbought -20.
pub struct WilliamsR;

impl SignalStrategy for WilliamsR {
    fn id(&self) -> StrategyId {
        StrategyId::WilliamsR
    }

    fn required_keys(&self) -> &'static [&'static str] {
        &["wr_period", "wr_oversold", "wr_overbought"]
    }

    fn evaluate(&self, series: &SeriesView<'_>, index: usize, params: &ParamSet) -> Signal {
        let period = params.tuning_usize("wr_period", 14);
        let oversold = params.tuning_f64("wr_oversold", -80.0);
        let overbought = params.tuning_f64("wr_overbought", -20.0);
        if index < period {
            return Signal::None;
        }
        let (Some(hh), Some(ll)) = (
            highest(&series.highs[..=index], period),
            lowest(&series.lows[..=index], period),
        ) else {
            return Signal::None;
        };
        let price = series.closes[index];
        let wr = if hh != ll {
            (hh - price) / (hh - ll) * -100.0
        } else {
            -50.0
        };

        let mut signal = Signal::None;
        if wr < oversold && series.close_up(index) {
            signal = Signal::Long;
        }
        if wr > overbought && series.close_down(index) {
            signal = Signal::Short;
        }
        signal
    }
}
