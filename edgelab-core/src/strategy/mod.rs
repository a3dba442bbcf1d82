//! Strategy signal catalog.
//!
//! Each strategy is a pure function of (series, index, params) returning a
//! `Signal`. All of them share one signature via the `SignalStrategy` trait
//! and are registered centrally in `lookup`, so dispatch is a table keyed by
//! `StrategyId` rather than an inline conditional chain.
//!
//! Conventions shared by every strategy:
//! - Insufficient history returns `Signal::None` (each impl documents its
//!   minimum look-back).
//! - Windows end at the evaluation index; nothing reads past it.
//! - Threshold comparisons are strict (`>` / `<`); equality never fires.
//! - Strategies read only their declared tuning keys, falling back to the
//!   documented defaults when a key is absent.

pub mod bounce;
pub mod channel;
pub mod cross;
pub mod divergence;
pub mod momentum;
pub mod oscillator;
pub mod stat;
pub mod trend;

use serde::{Deserialize, Serialize};

use crate::domain::Signal;
use crate::params::ParamSet;

/// Enumerated strategy tags. Serialized snake_case in persisted documents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StrategyId {
    MaCross,
    RsiReversion,
    RsiMomentum,
    Momentum,
    Breakout,
    RangeBounce,
    PivotBounce,
    SwingPoint,
    ReturnMove,
    StochRsi,
    VwapBounce,
    ObvDivergence,
    BbSqueeze,
    EmaCrossRsi,
    AtrBreakout,
    Supertrend,
    IchimokuCloud,
    DonchianBreakout,
    KeltnerChannel,
    WilliamsR,
    MacdDivergence,
    LinearRegression,
}

impl StrategyId {
    pub const ALL: [StrategyId; 22] = [
        StrategyId::MaCross,
        StrategyId::RsiReversion,
        StrategyId::RsiMomentum,
        StrategyId::Momentum,
        StrategyId::Breakout,
        StrategyId::RangeBounce,
        StrategyId::PivotBounce,
        StrategyId::SwingPoint,
        StrategyId::ReturnMove,
        StrategyId::StochRsi,
        StrategyId::VwapBounce,
        StrategyId::ObvDivergence,
        StrategyId::BbSqueeze,
        StrategyId::EmaCrossRsi,
        StrategyId::AtrBreakout,
        StrategyId::Supertrend,
        StrategyId::IchimokuCloud,
        StrategyId::DonchianBreakout,
        StrategyId::KeltnerChannel,
        StrategyId::WilliamsR,
        StrategyId::MacdDivergence,
        StrategyId::LinearRegression,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyId::MaCross => "ma_cross",
            StrategyId::RsiReversion => "rsi_reversion",
            StrategyId::RsiMomentum => "rsi_momentum",
            StrategyId::Momentum => "momentum",
            StrategyId::Breakout => "breakout",
            StrategyId::RangeBounce => "range_bounce",
            StrategyId::PivotBounce => "pivot_bounce",
            StrategyId::SwingPoint => "swing_point",
            StrategyId::ReturnMove => "return_move",
            StrategyId::StochRsi => "stoch_rsi",
            StrategyId::VwapBounce => "vwap_bounce",
            StrategyId::ObvDivergence => "obv_divergence",
            StrategyId::BbSqueeze => "bb_squeeze",
            StrategyId::EmaCrossRsi => "ema_cross_rsi",
            StrategyId::AtrBreakout => "atr_breakout",
            StrategyId::Supertrend => "supertrend",
            StrategyId::IchimokuCloud => "ichimoku_cloud",
            StrategyId::DonchianBreakout => "donchian_breakout",
            StrategyId::KeltnerChannel => "keltner_channel",
            StrategyId::WilliamsR => "williams_r",
            StrategyId::MacdDivergence => "macd_divergence",
            StrategyId::LinearRegression => "linear_regression",
        }
    }
}

impl std::fmt::Display for StrategyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrowed view over aligned close/high/low series.
#[derive(Debug, Clone, Copy)]
pub struct SeriesView<'a> {
    pub closes: &'a [f64],
    pub highs: &'a [f64],
    pub lows: &'a [f64],
}

impl<'a> SeriesView<'a> {
    pub fn new(closes: &'a [f64], highs: &'a [f64], lows: &'a [f64]) -> Self {
        debug_assert_eq!(closes.len(), highs.len());
        debug_assert_eq!(closes.len(), lows.len());
        Self {
            closes,
            highs,
            lows,
        }
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// Close rose from the previous bar. Bounce/divergence strategies use
    /// this as their entry trigger confirmation.
    pub fn close_up(&self, index: usize) -> bool {
        index >= 1 && self.closes[index] > self.closes[index - 1]
    }

    /// Close fell from the previous bar.
    pub fn close_down(&self, index: usize) -> bool {
        index >= 1 && self.closes[index] < self.closes[index - 1]
    }
}

/// One strategy variant: a pure signal function plus its tuning-key
/// declaration.
pub trait SignalStrategy: Send + Sync {
    fn id(&self) -> StrategyId;

    /// Tuning keys this strategy reads. The parameter-space registry and
    /// the candidate generator both derive from this.
    fn required_keys(&self) -> &'static [&'static str];

    /// Evaluate at `index`. Must return `Signal::None` until enough bars
    /// exist and must not read past `index`.
    fn evaluate(&self, series: &SeriesView<'_>, index: usize, params: &ParamSet) -> Signal;
}

/// Central registry: one static instance per strategy variant.
pub fn lookup(id: StrategyId) -> &'static dyn SignalStrategy {
    match id {
        StrategyId::MaCross => &cross::MaCross,
        StrategyId::RsiReversion => &oscillator::RsiReversion,
        StrategyId::RsiMomentum => &oscillator::RsiMomentum,
        StrategyId::Momentum => &momentum::MomentumThreshold,
        StrategyId::Breakout => &momentum::WindowBreakout,
        StrategyId::RangeBounce => &bounce::RangeBounce,
        StrategyId::PivotBounce => &bounce::PivotBounce,
        StrategyId::SwingPoint => &bounce::SwingPointBounce,
        StrategyId::ReturnMove => &bounce::ReturnMove,
        StrategyId::StochRsi => &oscillator::StochRsi,
        StrategyId::VwapBounce => &bounce::VwapBounce,
        StrategyId::ObvDivergence => &divergence::ObvDivergence,
        StrategyId::BbSqueeze => &channel::BbSqueeze,
        StrategyId::EmaCrossRsi => &cross::EmaCrossRsi,
        StrategyId::AtrBreakout => &momentum::AtrBreakout,
        StrategyId::Supertrend => &trend::SupertrendFlip,
        StrategyId::IchimokuCloud => &trend::IchimokuCloudBreak,
        StrategyId::DonchianBreakout => &channel::DonchianBreakout,
        StrategyId::KeltnerChannel => &channel::KeltnerChannel,
        StrategyId::WilliamsR => &oscillator::WilliamsR,
        StrategyId::MacdDivergence => &divergence::MacdDivergence,
        StrategyId::LinearRegression => &stat::LinRegDeviation,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::SeriesView;

    /// Synthetic series with highs/lows a fixed 0.5 above/below close.
    pub struct OwnedSeries {
        pub closes: Vec<f64>,
        pub highs: Vec<f64>,
        pub lows: Vec<f64>,
    }

    impl OwnedSeries {
        pub fn from_closes(closes: &[f64]) -> Self {
            Self {
                closes: closes.to_vec(),
                highs: closes.iter().map(|c| c + 0.5).collect(),
                lows: closes.iter().map(|c| c - 0.5).collect(),
            }
        }

        pub fn view(&self) -> SeriesView<'_> {
            SeriesView::new(&self.closes, &self.highs, &self.lows)
        }
    }
}
