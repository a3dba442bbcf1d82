//! EdgeLab Runner — the exploration engine on top of `edgelab-core`.
//!
//! This crate provides:
//! - Multi-period evaluation with 30-day pnl normalization
//! - Walk-forward overfit screening
//! - Random and hill-climb candidate generation
//! - Per-interval history leaderboards and the tested-fingerprint set
//! - The strategy-by-interval analysis table
//! - JSON state persistence with fail-open loads
//! - The exploration loop tying it all together

pub mod analysis;
pub mod config;
pub mod evaluator;
pub mod explorer;
pub mod generator;
pub mod history;
pub mod pacer;
pub mod progress;
pub mod store;
pub mod variation;
pub mod walk_forward;

pub use analysis::{AnalysisTable, Cell};
pub use config::{ConfigError, ExplorerConfig};
pub use evaluator::{evaluate_periods, summarize, PeriodResult, PeriodSkip, PERIODS};
pub use explorer::{ExploreError, ExploreReport, Explorer};
pub use generator::{CandidateSource, Generator};
pub use history::{History, InsertOutcome, TestedSet};
pub use pacer::{NoopPacer, Pacer, SleepPacer};
pub use progress::{ProgressReporter, SilentProgress, StdoutProgress};
pub use store::{JsonFileStore, MemoryStore, StateStore, StoreError};
pub use variation::Variation;
pub use walk_forward::WalkForwardCheck;
