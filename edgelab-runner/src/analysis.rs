//! Strategy-by-interval analysis table.
//!
//! One cell per (strategy, interval) pair, holding the best few positive
//! variations ever seen. Rebuilding folds the current run, the history
//! boards, and the previous table together, deduplicated by fingerprint
//! with the freshest evaluation winning, so repeated rebuilds over the
//! same inputs are idempotent.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use edgelab_core::domain::Interval;
use edgelab_core::params::Fingerprint;
use edgelab_core::strategy::StrategyId;

use crate::history::History;
use crate::variation::Variation;

/// Variations kept per cell.
pub const CELL_CAP: usize = 5;

/// Top variations for one (strategy, interval) pair, best-first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cell {
    pub variations: Vec<Variation>,
}

impl Cell {
    /// The best variation in the cell, when it has any.
    pub fn best(&self) -> Option<&Variation> {
        self.variations.first()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisTable {
    pub cells: BTreeMap<StrategyId, BTreeMap<Interval, Cell>>,
}

impl AnalysisTable {
    pub fn cell(&self, strategy: StrategyId, interval: Interval) -> Option<&Cell> {
        self.cells.get(&strategy).and_then(|row| row.get(&interval))
    }

    /// Best variation of every non-empty cell, best-first. Seeds for the
    /// hill-climb generator.
    pub fn bests(&self) -> Vec<&Variation> {
        let mut bests: Vec<&Variation> = self
            .cells
            .values()
            .flat_map(|row| row.values())
            .filter_map(Cell::best)
            .collect();
        bests.sort_by(|a, b| {
            b.monthly_pnl
                .partial_cmp(&a.monthly_pnl)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        bests
    }

    /// Rebuild from this run's results, the history boards, and the
    /// previous table. Sources are consulted in that order; the first
    /// occurrence of a fingerprint wins, so a fresh score supersedes a
    /// stale one. Only positive-pnl variations earn a cell slot.
    pub fn rebuild(run: &[Variation], history: &History, previous: &AnalysisTable) -> Self {
        let mut seen: HashSet<Fingerprint> = HashSet::new();
        let mut table = AnalysisTable::default();

        let previous_entries = previous
            .cells
            .values()
            .flat_map(|row| row.values())
            .flat_map(|cell| cell.variations.iter());
        let candidates = run
            .iter()
            .chain(history.by_interval.values().flatten())
            .chain(previous_entries);

        for variation in candidates {
            if !seen.insert(variation.fingerprint.clone()) {
                continue;
            }
            if variation.monthly_pnl <= 0.0 {
                continue;
            }
            table
                .cells
                .entry(variation.params.strategy)
                .or_default()
                .entry(variation.params.interval)
                .or_default()
                .variations
                .push(variation.clone());
        }

        for row in table.cells.values_mut() {
            for cell in row.values_mut() {
                cell.variations.sort_by(|a, b| {
                    b.monthly_pnl
                        .partial_cmp(&a.monthly_pnl)
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
                cell.variations.truncate(CELL_CAP);
            }
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use edgelab_core::domain::PositionMode;
    use edgelab_core::params::ParamSet;

    fn variation(
        strategy: StrategyId,
        interval: Interval,
        max_pyramid: usize,
        monthly_pnl: f64,
    ) -> Variation {
        let params = ParamSet::new(strategy, interval, PositionMode::Basic, max_pyramid, 0.01, 0.005);
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
    fn negative_pnl_never_earns_a_cell() {
        let run = vec![variation(StrategyId::MaCross, Interval::H1, 1, -1.0)];
        let table = AnalysisTable::rebuild(&run, &History::default(), &AnalysisTable::default());
        assert!(table.cells.is_empty());
    }

    #[test]
    fn cells_keep_the_top_five() {
        let run: Vec<Variation> = (0..8)
            .map(|k| variation(StrategyId::MaCross, Interval::H1, k + 1, (k + 1) as f64))
            .collect();
        let table = AnalysisTable::rebuild(&run, &History::default(), &AnalysisTable::default());
        let cell = table.cell(StrategyId::MaCross, Interval::H1).unwrap();
        assert_eq!(cell.variations.len(), CELL_CAP);
        assert_eq!(cell.best().unwrap().monthly_pnl, 8.0);
        assert_eq!(cell.variations.last().unwrap().monthly_pnl, 4.0);
    }

    #[test]
    fn fresh_score_supersedes_previous_table() {
        let stale = vec![variation(StrategyId::MaCross, Interval::H1, 1, 9.0)];
        let previous =
            AnalysisTable::rebuild(&stale, &History::default(), &AnalysisTable::default());

        // Same fingerprint re-scored lower in the current run.
        let run = vec![variation(StrategyId::MaCross, Interval::H1, 1, 2.0)];
        let table = AnalysisTable::rebuild(&run, &History::default(), &previous);
        let cell = table.cell(StrategyId::MaCross, Interval::H1).unwrap();
        assert_eq!(cell.variations.len(), 1);
        assert_eq!(cell.best().unwrap().monthly_pnl, 2.0);
    }

    #[test]
    fn rebuild_is_idempotent() {
        let run = vec![
            variation(StrategyId::MaCross, Interval::H1, 1, 3.0),
            variation(StrategyId::RsiReversion, Interval::M5, 2, 1.0),
        ];
        let once = AnalysisTable::rebuild(&run, &History::default(), &AnalysisTable::default());
        let twice = AnalysisTable::rebuild(&[], &History::default(), &once);
        assert_eq!(
            serde_json::to_string(&once.cells.keys().collect::<Vec<_>>()).unwrap(),
            serde_json::to_string(&twice.cells.keys().collect::<Vec<_>>()).unwrap()
        );
        assert_eq!(once.bests().len(), twice.bests().len());
        assert_eq!(
            once.bests()[0].fingerprint,
            twice.bests()[0].fingerprint
        );
    }

    #[test]
    fn bests_span_cells_sorted() {
        let run = vec![
            variation(StrategyId::MaCross, Interval::H1, 1, 3.0),
            variation(StrategyId::RsiReversion, Interval::M5, 2, 7.0),
        ];
        let table = AnalysisTable::rebuild(&run, &History::default(), &AnalysisTable::default());
        let bests = table.bests();
        assert_eq!(bests.len(), 2);
        assert_eq!(bests[0].monthly_pnl, 7.0);
    }
}
