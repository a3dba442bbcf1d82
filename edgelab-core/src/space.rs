//! Legal parameter domains for the exploration space.
//!
//! Every tuning key a strategy can ask for has a fixed, finite value list
//! here. Generators draw from these lists and snap perturbed values back
//! onto them, so every fingerprint ever produced names a set that could
//! also have been drawn at random.

use crate::domain::{Interval, PositionMode};
use crate::strategy::{lookup, StrategyId};

pub const MAX_PYRAMID: &[usize] = &[2, 3, 5];
pub const TAKE_PROFIT: &[f64] = &[0.003, 0.005, 0.01, 0.015, 0.02];
pub const STOP_LOSS: &[f64] = &[0.0015, 0.0025, 0.005, 0.0075, 0.01];

pub const INTERVALS: &[Interval] = &Interval::ALL;
pub const POSITION_MODES: &[PositionMode] = &PositionMode::ALL;

/// Legal values for a tuning key. Unknown keys return an empty slice; a
/// strategy whose `required_keys` names one is a registry bug, caught by
/// the coverage test below.
pub fn values(key: &str) -> &'static [f64] {
    match key {
        "ma_fast" => &[5.0, 9.0, 12.0, 20.0],
        "ma_slow" => &[20.0, 21.0, 26.0, 50.0],
        "rsi_period" => &[7.0, 14.0, 21.0],
        "rsi_oversold" => &[20.0, 25.0, 30.0, 35.0],
        "rsi_overbought" => &[65.0, 70.0, 75.0, 80.0],
        "momentum_window" => &[2.0, 3.0, 5.0, 10.0],
        "momentum_threshold" => &[0.001, 0.002, 0.003, 0.005],
        "breakout_window" => &[5.0, 10.0, 15.0, 20.0],
        "pivot_lookback" => &[24.0, 48.0, 96.0],
        "pivot_touch_pct" => &[0.001, 0.002, 0.003],
        "range_window" => &[20.0, 50.0, 100.0],
        "range_bounce_zone" => &[0.1, 0.15, 0.2],
        "swing_lookback" => &[3.0, 5.0, 7.0],
        "swing_bounce_threshold" => &[0.002, 0.003, 0.005],
        "return_move_window" => &[10.0, 20.0, 30.0],
        "return_move_retest_bars" => &[3.0, 5.0, 10.0, 15.0],
        "return_move_touch_pct" => &[0.003, 0.005, 0.008, 0.01],
        "sr_rsi_period" => &[7.0, 14.0, 21.0],
        "sr_stoch_period" => &[7.0, 14.0],
        "sr_oversold" => &[10.0, 15.0, 20.0],
        "sr_overbought" => &[80.0, 85.0, 90.0],
        "vwap_period" => &[20.0, 50.0, 100.0],
        "vwap_bounce_zone" => &[0.001, 0.002, 0.003, 0.005],
        "obv_div_window" => &[5.0, 10.0, 15.0],
        "bb_period" => &[10.0, 20.0, 30.0],
        "bb_std_dev" => &[1.5, 2.0, 2.5],
        "bb_squeeze_threshold" => &[0.01, 0.02, 0.03],
        "ec_fast_ema" => &[5.0, 8.0, 12.0],
        "ec_slow_ema" => &[20.0, 26.0, 50.0],
        "ec_rsi_period" => &[7.0, 14.0],
        "ec_rsi_filter" => &[40.0, 45.0, 50.0],
        "atr_bo_period" => &[7.0, 14.0, 20.0],
        "atr_bo_multiplier" => &[1.0, 1.5, 2.0, 2.5],
        "atr_bo_lookback" => &[10.0, 20.0, 30.0],
        "st_atr_period" => &[7.0, 10.0, 14.0],
        "st_multiplier" => &[1.5, 2.0, 3.0],
        "ichi_tenkan" => &[7.0, 9.0, 12.0],
        "ichi_kijun" => &[22.0, 26.0, 30.0],
        "ichi_senkou" => &[44.0, 52.0, 60.0],
        "donchian_period" => &[10.0, 20.0, 30.0, 55.0],
        "kc_ema_period" => &[10.0, 20.0, 30.0],
        "kc_atr_period" => &[7.0, 10.0, 14.0],
        "kc_atr_mult" => &[1.0, 1.5, 2.0, 2.5],
        "wr_period" => &[7.0, 14.0, 21.0],
        "wr_oversold" => &[-90.0, -85.0, -80.0],
        "wr_overbought" => &[-20.0, -15.0, -10.0],
        "macd_fast" => &[8.0, 12.0, 16.0],
        "macd_slow" => &[21.0, 26.0, 30.0],
        "macd_div_window" => &[5.0, 10.0, 15.0],
        "lr_period" => &[20.0, 30.0, 50.0],
        "lr_dev_mult" => &[1.5, 2.0, 2.5],
        _ => &[],
    }
}

/// Tuning keys a strategy draws from, straight off its registry entry.
pub fn keys(strategy: StrategyId) -> &'static [&'static str] {
    lookup(strategy).required_keys()
}

/// Snap a perturbed value onto the nearest legal value for `key`. Returns
/// the input unchanged when the key has no domain.
pub fn snap(key: &str, value: f64) -> f64 {
    snap_to(values(key), value)
}

/// Snap onto an explicit domain, for the shared take-profit and stop-loss
/// lists which are not keyed tunings.
pub fn snap_to(domain: &[f64], value: f64) -> f64 {
    domain
        .iter()
        .copied()
        .min_by(|a, b| {
            (a - value)
                .abs()
                .partial_cmp(&(b - value).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(value)
}
