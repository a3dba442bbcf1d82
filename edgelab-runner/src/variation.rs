//! The scored-variation record shared by leaderboards, history, and the
//! analysis table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use edgelab_core::params::{Fingerprint, ParamSet};

use crate::walk_forward::WalkForwardCheck;

/// One parameter set with its cross-period score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variation {
    pub fingerprint: Fingerprint,
    pub params: ParamSet,

    /// Mean 30-day-normalized pnl across evaluated periods, in percent.
    pub monthly_pnl: f64,

    /// Mean win rate across evaluated periods, in percent.
    pub win_rate: f64,

    /// Fraction of evaluated periods with positive pnl, 0..=1.
    pub consistency: f64,

    /// Total raw pnl over total trades across all periods, in percent.
    pub pnl_per_trade: f64,

    /// Total trades across all periods.
    pub trade_count: usize,

    /// Train/test split result; None when the recent window could not be
    /// fetched or was too thin to split.
    #[serde(default)]
    pub walk_forward: Option<WalkForwardCheck>,

    pub evaluated_at: DateTime<Utc>,
}

impl Variation {
    /// Ordering key for leaderboards: best monthly pnl first.
    pub fn ranks_above(&self, other: &Variation) -> bool {
        self.monthly_pnl > other.monthly_pnl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgelab_core::domain::{Interval, PositionMode};
    use edgelab_core::strategy::StrategyId;

    pub(crate) fn sample(monthly_pnl: f64) -> Variation {
        let params = ParamSet::new(
            StrategyId::MaCross,
            Interval::H1,
            PositionMode::Basic,
            3,
            0.01,
            0.005,
        );
        Variation {
            fingerprint: params.fingerprint(),
            params,
            monthly_pnl,
            win_rate: 50.0,
            consistency: 0.5,
            pnl_per_trade: 0.1,
            trade_count: 10,
            walk_forward: None,
            evaluated_at: Utc::now(),
        }
    }

    #[test]
    fn ranking_is_by_monthly_pnl() {
        assert!(sample(2.0).ranks_above(&sample(1.0)));
        assert!(!sample(1.0).ranks_above(&sample(1.0)));
    }

    #[test]
    fn walk_forward_survives_a_serde_round_trip() {
        let mut v = sample(3.0);
        v.walk_forward = Some(WalkForwardCheck {
            train_monthly: 4.2,
            test_monthly: -1.1,
            overfit: true,
        });
        let json = serde_json::to_string(&v).unwrap();
        let back: Variation = serde_json::from_str(&json).unwrap();
        assert_eq!(
            back.walk_forward,
            Some(WalkForwardCheck {
                train_monthly: 4.2,
                test_monthly: -1.1,
                overfit: true,
            })
        );
    }

    #[test]
    fn records_without_walk_forward_still_load() {
        let v = sample(1.0);
        let mut doc = serde_json::to_value(&v).unwrap();
        doc.as_object_mut().unwrap().remove("walk_forward");
        let back: Variation = serde_json::from_value(doc).unwrap();
        assert!(back.walk_forward.is_none());
    }
}
