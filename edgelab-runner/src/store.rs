//! Exploration state persistence.
//!
//! Three documents live under the data directory: the tested-fingerprint
//! set, the per-interval history boards, and the analysis table. Loads are
//! fail-open: a missing or unreadable document starts fresh rather than
//! aborting the run. Saves are atomic via a rename.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::analysis::AnalysisTable;
use crate::history::{History, TestedSet};

pub const TESTED_FILE: &str = "tested.json";
pub const HISTORY_FILE: &str = "history.json";
pub const ANALYSIS_FILE: &str = "analysis.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write state file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Load/save boundary for exploration state. The explorer only talks to
/// this trait; tests swap in the in-memory store.
pub trait StateStore {
    fn load_tested(&self) -> TestedSet;
    fn save_tested(&self, tested: &TestedSet) -> Result<(), StoreError>;

    fn load_history(&self) -> History;
    fn save_history(&self, history: &History) -> Result<(), StoreError>;

    fn load_analysis(&self) -> AnalysisTable;
    fn save_analysis(&self, analysis: &AnalysisTable) -> Result<(), StoreError>;
}

/// JSON documents under a data directory.
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, file: &str) -> T {
        let path = self.data_dir.join(file);
        match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_default(),
            Err(_) => T::default(),
        }
    }

    fn save_atomic<T: Serialize>(&self, file: &str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir)?;
        let path = self.data_dir.join(file);
        let tmp = self.data_dir.join(format!("{file}.tmp"));
        fs::write(&tmp, serde_json::to_string_pretty(value)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

impl StateStore for JsonFileStore {
    fn load_tested(&self) -> TestedSet {
        self.load_or_default(TESTED_FILE)
    }

    fn save_tested(&self, tested: &TestedSet) -> Result<(), StoreError> {
        self.save_atomic(TESTED_FILE, tested)
    }

    fn load_history(&self) -> History {
        self.load_or_default(HISTORY_FILE)
    }

    fn save_history(&self, history: &History) -> Result<(), StoreError> {
        self.save_atomic(HISTORY_FILE, history)
    }

    fn load_analysis(&self) -> AnalysisTable {
        self.load_or_default(ANALYSIS_FILE)
    }

    fn save_analysis(&self, analysis: &AnalysisTable) -> Result<(), StoreError> {
        self.save_atomic(ANALYSIS_FILE, analysis)
    }
}

/// Volatile store for tests.
#[derive(Default)]
pub struct MemoryStore {
    tested: Mutex<TestedSet>,
    history: Mutex<History>,
    analysis: Mutex<AnalysisTable>,
}

impl StateStore for MemoryStore {
    fn load_tested(&self) -> TestedSet {
        self.tested.lock().unwrap().clone()
    }

    fn save_tested(&self, tested: &TestedSet) -> Result<(), StoreError> {
        *self.tested.lock().unwrap() = tested.clone();
        Ok(())
    }

    fn load_history(&self) -> History {
        self.history.lock().unwrap().clone()
    }

    fn save_history(&self, history: &History) -> Result<(), StoreError> {
        *self.history.lock().unwrap() = history.clone();
        Ok(())
    }

    fn load_analysis(&self) -> AnalysisTable {
        self.analysis.lock().unwrap().clone()
    }

    fn save_analysis(&self, analysis: &AnalysisTable) -> Result<(), StoreError> {
        *self.analysis.lock().unwrap() = analysis.clone();
        Ok(())
    }
}
