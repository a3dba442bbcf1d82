//! Progress callbacks for exploration runs.
//!
//! The explorer itself never prints; callers pick a reporter. The CLI
//! uses `StdoutProgress`, tests use `SilentProgress`.

use edgelab_core::params::ParamSet;

use crate::evaluator::PeriodSkip;
use crate::explorer::ExploreReport;
use crate::generator::CandidateSource;
use crate::variation::Variation;
use crate::walk_forward::WalkForwardCheck;

pub trait ProgressReporter {
    /// Called when an iteration picks its candidate.
    fn on_iteration_start(
        &self,
        iteration: usize,
        total: usize,
        params: &ParamSet,
        source: CandidateSource,
    );

    /// Called when a period window is skipped.
    fn on_period_skip(&self, label: &str, skip: &PeriodSkip);

    /// Called when a candidate earns a cross-period score.
    fn on_scored(&self, variation: &Variation);

    /// Called when every period was skipped for a candidate.
    fn on_unscored(&self);

    /// Called after the walk-forward split, when the window was wide
    /// enough to check.
    fn on_walk_forward(&self, check: &WalkForwardCheck);

    /// Called when the generators run out of novel candidates.
    fn on_exhausted(&self);

    /// Called once after the final iteration.
    fn on_finish(&self, report: &ExploreReport);
}

/// Plain stdout reporting.
pub struct StdoutProgress;

impl ProgressReporter for StdoutProgress {
    fn on_iteration_start(
        &self,
        iteration: usize,
        total: usize,
        params: &ParamSet,
        source: CandidateSource,
    ) {
        let tag = match source {
            CandidateSource::Random => "random",
            CandidateSource::HillClimb => "climb",
        };
        println!(
            "[{}/{}] {} {} {:?} tp={:.4} sl={:.4} ({tag})",
            iteration + 1,
            total,
            params.strategy,
            params.interval,
            params.position_mode,
            params.take_profit_pct,
            params.stop_loss_pct,
        );
    }

    fn on_period_skip(&self, label: &str, skip: &PeriodSkip) {
        match skip {
            PeriodSkip::FetchFailed(reason) => {
                println!("  {label}: fetch failed ({reason}), skipping");
            }
            PeriodSkip::TooFewCandles(count) => {
                println!("  {label}: only {count} candles, skipping");
            }
        }
    }

    fn on_scored(&self, variation: &Variation) {
        println!(
            "  monthly {:+.2}% | win {:.1}% | consistency {:.0}% | {:+.3}%/trade over {} trades",
            variation.monthly_pnl,
            variation.win_rate,
            variation.consistency * 100.0,
            variation.pnl_per_trade,
            variation.trade_count,
        );
    }

    fn on_unscored(&self) {
        println!("  no period produced enough data, discarding candidate");
    }

    fn on_walk_forward(&self, check: &WalkForwardCheck) {
        let verdict = if check.overfit { "OVERFIT" } else { "holds up" };
        println!(
            "  walk-forward: train {:+.2}% / test {:+.2}% ({verdict})",
            check.train_monthly, check.test_monthly,
        );
    }

    fn on_exhausted(&self) {
        println!("generator exhausted: no novel candidates left, stopping early");
    }

    fn on_finish(&self, report: &ExploreReport) {
        println!(
            "\ndone: {} evaluated, {} unscored, {} requested",
            report.evaluated, report.skipped, report.iterations_requested,
        );
        for (rank, v) in report.results.iter().take(5).enumerate() {
            println!(
                "  #{} {} {} {:?} monthly {:+.2}% [{}]",
                rank + 1,
                v.params.strategy,
                v.params.interval,
                v.params.position_mode,
                v.monthly_pnl,
                v.fingerprint,
            );
        }
    }
}

/// Discards every event. For tests.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn on_iteration_start(&self, _: usize, _: usize, _: &ParamSet, _: CandidateSource) {}
    fn on_period_skip(&self, _: &str, _: &PeriodSkip) {}
    fn on_scored(&self, _: &Variation) {}
    fn on_unscored(&self) {}
    fn on_walk_forward(&self, _: &WalkForwardCheck) {}
    fn on_exhausted(&self) {}
    fn on_finish(&self, _: &ExploreReport) {}
}
