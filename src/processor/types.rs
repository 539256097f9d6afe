use serde::{Deserialize, Serialize};

/// Outcome of a batch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Candidates that passed the extension filter
    pub total_files: usize,
    /// Matched files whose handler reported success
    pub files_processed: usize,
    pub started_at: String,
    pub finished_at: String,
}

impl BatchSummary {
    /// True when every matched file succeeded (vacuously true for an empty batch)
    pub fn all_succeeded(&self) -> bool {
        self.files_processed == self.total_files
    }

    pub fn files_failed(&self) -> usize {
        self.total_files.saturating_sub(self.files_processed)
    }
}

/// Which folders [`cleanup`](super::FileProcessor::cleanup) should empty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupTargets {
    pub input: bool,
    pub done: bool,
    pub failed: bool,
}

impl CleanupTargets {
    pub fn all() -> Self {
        Self {
            input: true,
            done: true,
            failed: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.input || self.done || self.failed)
    }
}

/// Number of top-level entries removed from each folder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupResult {
    pub input_removed: usize,
    pub done_removed: usize,
    pub failed_removed: usize,
}

impl CleanupResult {
    pub fn total_removed(&self) -> usize {
        self.input_removed + self.done_removed + self.failed_removed
    }
}
