//! Persistent exploration memory: per-interval leaderboards of scored
//! variations, and the set of fingerprints already tested.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use edgelab_core::domain::Interval;
use edgelab_core::params::Fingerprint;

use crate::variation::Variation;

/// Leaderboard entries kept per interval.
pub const HISTORY_CAP: usize = 500;

/// Fingerprints remembered before the oldest are forgotten.
pub const TESTED_CAP: usize = 5_000;

/// What happened when a variation was offered to the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// New entry below capacity.
    Inserted,
    /// Same fingerprint was already present; the entry was refreshed.
    Refreshed,
    /// At capacity: evicted the worst entry to make room.
    Replaced,
    /// At capacity and not better than the current worst.
    Rejected,
}

/// Per-interval leaderboards, each sorted best-first by monthly pnl.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    pub by_interval: BTreeMap<Interval, Vec<Variation>>,
}

impl History {
    /// Offer a scored variation. Entries are unique per fingerprint; at
    /// capacity the worst entry is evicted only for a strictly better one.
    pub fn insert(&mut self, variation: Variation) -> InsertOutcome {
        let board = self.by_interval.entry(variation.params.interval).or_default();

        let outcome = if let Some(pos) = board
            .iter()
            .position(|v| v.fingerprint == variation.fingerprint)
        {
            board[pos] = variation;
            InsertOutcome::Refreshed
        } else if board.len() < HISTORY_CAP {
            board.push(variation);
            InsertOutcome::Inserted
        } else {
            // board is sorted, so the worst entry is last
            let worst = board
                .last()
                .map(|v| v.monthly_pnl)
                .unwrap_or(f64::NEG_INFINITY);
            if variation.monthly_pnl > worst {
                board.pop();
                board.push(variation);
                InsertOutcome::Replaced
            } else {
                return InsertOutcome::Rejected;
            }
        };

        board.sort_by(|a, b| {
            b.monthly_pnl
                .partial_cmp(&a.monthly_pnl)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        outcome
    }

    /// All entries across intervals, best-first.
    pub fn all_sorted(&self) -> Vec<&Variation> {
        let mut all: Vec<&Variation> = self.by_interval.values().flatten().collect();
        all.sort_by(|a, b| {
            b.monthly_pnl
                .partial_cmp(&a.monthly_pnl)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        all
    }

    pub fn len(&self) -> usize {
        self.by_interval.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Recently tested fingerprints, oldest-first, with set-speed membership.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Fingerprint>", into = "Vec<Fingerprint>")]
pub struct TestedSet {
    order: Vec<Fingerprint>,
    members: HashSet<Fingerprint>,
}

impl TestedSet {
    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.members.contains(fingerprint)
    }

    /// Record a fingerprint, forgetting the oldest above capacity.
    pub fn insert(&mut self, fingerprint: Fingerprint) {
        if !self.members.insert(fingerprint.clone()) {
            return;
        }
        self.order.push(fingerprint);
        if self.order.len() > TESTED_CAP {
            let oldest = self.order.remove(0);
            self.members.remove(&oldest);
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl From<Vec<Fingerprint>> for TestedSet {
    fn from(order: Vec<Fingerprint>) -> Self {
        let members = order.iter().cloned().collect();
        Self { order, members }
    }
}

impl From<TestedSet> for Vec<Fingerprint> {
    fn from(set: TestedSet) -> Self {
        set.order
    }
}
