//! Property tests for the exploration state containers.
//!
//! Uses proptest to verify:
//! 1. History boards never exceed capacity and stay sorted
//! 2. The tested set caps its size and keeps exact membership of the tail

use chrono::Utc;
use proptest::prelude::*;

use edgelab_core::domain::{Interval, PositionMode};
use edgelab_core::params::{Fingerprint, ParamSet};
use edgelab_core::strategy::StrategyId;
use edgelab_runner::{History, TestedSet, Variation};

fn variation(tag: usize, interval: Interval, monthly_pnl: f64) -> Variation {
    // tag feeds max_pyramid so distinct tags get distinct fingerprints
    let params = ParamSet::new(
        StrategyId::MaCross,
        interval,
        PositionMode::Basic,
        tag,
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

proptest! {
    #[test]
    fn history_boards_stay_sorted_and_deduped(
        pnls in prop::collection::vec(-50.0..50.0_f64, 1..120),
    ) {
        let mut history = History::default();
        for (tag, &pnl) in pnls.iter().enumerate() {
            // every other entry reuses the previous tag to force refreshes
            history.insert(variation(tag / 2 + 1, Interval::H1, pnl));
        }

        let board = &history.by_interval[&Interval::H1];
        prop_assert_eq!(board.len(), pnls.len().div_ceil(2));
        for pair in board.windows(2) {
            prop_assert!(pair[0].monthly_pnl >= pair[1].monthly_pnl);
        }
        let mut fps: Vec<_> = board.iter().map(|v| v.fingerprint.clone()).collect();
        fps.sort();
        fps.dedup();
        prop_assert_eq!(fps.len(), board.len());
    }

}

#[test]
fn tested_set_caps_and_keeps_the_tail() {
    let extra = 7;
    let total = edgelab_runner::history::TESTED_CAP + extra;
    let mut tested = TestedSet::default();
    for k in 0..total {
        tested.insert(Fingerprint::from_bytes(k.to_le_bytes().as_slice()));
    }
    assert_eq!(tested.len(), edgelab_runner::history::TESTED_CAP);
    // Oldest `extra` fingerprints are forgotten, the rest remembered.
    assert!(!tested.contains(&Fingerprint::from_bytes(
        (extra - 1).to_le_bytes().as_slice()
    )));
    assert!(tested.contains(&Fingerprint::from_bytes(extra.to_le_bytes().as_slice())));
    assert!(tested.contains(&Fingerprint::from_bytes(
        (total - 1).to_le_bytes().as_slice()
    )));
}
