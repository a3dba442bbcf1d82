//! The exploration loop.
//!
//! Each run loads the persisted state, spends its iteration budget on
//! candidates (random first, then hill-climbing around the analysis
//! table's best cells), and persists everything once at the end. A
//! crashed run loses at most one session's discoveries, never the
//! accumulated state.

use std::time::Duration;

use thiserror::Error;

use edgelab_core::data::CandleProvider;
use edgelab_core::params::ParamSet;

use crate::analysis::AnalysisTable;
use crate::config::ExplorerConfig;
use crate::evaluator::{evaluate_periods, summarize};
use crate::generator::{CandidateSource, Generator};
use crate::pacer::Pacer;
use crate::progress::ProgressReporter;
use crate::store::{StateStore, StoreError};
use crate::variation::Variation;
use crate::walk_forward;

#[derive(Debug, Error)]
pub enum ExploreError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Session summary returned by a run.
#[derive(Debug)]
pub struct ExploreReport {
    pub iterations_requested: usize,
    /// Candidates that earned a cross-period score.
    pub evaluated: usize,
    /// Candidates whose every period was skipped.
    pub skipped: usize,
    /// The generators ran dry before the budget was spent.
    pub exhausted: bool,
    /// This session's scored variations, best-first.
    pub results: Vec<Variation>,
}

pub struct Explorer<'a> {
    config: &'a ExplorerConfig,
    provider: &'a dyn CandleProvider,
    store: &'a dyn StateStore,
    pacer: &'a dyn Pacer,
    progress: &'a dyn ProgressReporter,
}

impl<'a> Explorer<'a> {
    pub fn new(
        config: &'a ExplorerConfig,
        provider: &'a dyn CandleProvider,
        store: &'a dyn StateStore,
        pacer: &'a dyn Pacer,
        progress: &'a dyn ProgressReporter,
    ) -> Self {
        Self {
            config,
            provider,
            store,
            pacer,
            progress,
        }
    }

    fn next_candidate(
        &self,
        iteration: usize,
        random_budget: usize,
        seeds: &[Variation],
        generator: &mut Generator,
        tested: &crate::history::TestedSet,
    ) -> Option<(ParamSet, CandidateSource)> {
        if iteration >= random_budget && !seeds.is_empty() {
            let seed = generator.pick(seeds);
            if let Some(params) = generator.hill_climb(&seed.params, tested) {
                return Some((params, CandidateSource::HillClimb));
            }
            // neighborhood saturated, fall back to a fresh draw
        }
        generator
            .random(tested)
            .map(|params| (params, CandidateSource::Random))
    }

    pub fn run(&self, iterations: usize) -> Result<ExploreReport, ExploreError> {
        let mut tested = self.store.load_tested();
        let mut history = self.store.load_history();
        let previous_analysis = self.store.load_analysis();

        let seeds: Vec<Variation> = previous_analysis.bests().into_iter().cloned().collect();
        // Without seeds every iteration is a fresh draw; with them, the
        // back half of the budget climbs around the best known cells.
        let random_budget = if seeds.is_empty() {
            iterations
        } else {
            iterations - iterations / 2
        };

        let mut generator = Generator::new(self.config.seed);
        let mut results: Vec<Variation> = Vec::new();
        let mut skipped = 0;
        let mut exhausted = false;

        for iteration in 0..iterations {
            if iteration > 0 {
                self.pacer
                    .pause(Duration::from_millis(self.config.iter_delay_ms));
            }

            let Some((params, source)) =
                self.next_candidate(iteration, random_budget, &seeds, &mut generator, &tested)
            else {
                exhausted = true;
                self.progress.on_exhausted();
                break;
            };
            self.progress
                .on_iteration_start(iteration, iterations, &params, source);

            // Fingerprints count as tested even when scoring fails, so a
            // structurally broken candidate is never drawn twice.
            tested.insert(params.fingerprint());

            let periods = evaluate_periods(
                self.provider,
                &self.config.symbol,
                &params,
                self.pacer,
                self.config.fetch_delay_ms,
                |label, skip| self.progress.on_period_skip(label, skip),
            );
            self.pacer
                .pause(Duration::from_millis(self.config.fetch_delay_ms));
            let wf = walk_forward::check(self.provider, &self.config.symbol, &params);
            if let Some(check) = &wf {
                self.progress.on_walk_forward(check);
            }

            let Some(mut variation) = summarize(&params, &periods) else {
                skipped += 1;
                self.progress.on_unscored();
                continue;
            };
            variation.walk_forward = wf;
            self.progress.on_scored(&variation);

            history.insert(variation.clone());
            results.push(variation);
        }

        let analysis = AnalysisTable::rebuild(&results, &history, &previous_analysis);
        self.store.save_tested(&tested)?;
        self.store.save_history(&history)?;
        self.store.save_analysis(&analysis)?;

        results.sort_by(|a, b| {
            b.monthly_pnl
                .partial_cmp(&a.monthly_pnl)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let report = ExploreReport {
            iterations_requested: iterations,
            evaluated: results.len(),
            skipped,
            exhausted,
            results,
        };
        self.progress.on_finish(&report);
        Ok(report)
    }
}
