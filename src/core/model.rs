//! Run state and summary
//!
//! `RunState` lives for one invocation and is mutated only by the aggregator.
//! `RunSummary` is what the CLI reports once the walk is exhausted.

use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    /// Resolved absolute path of the output sink
    pub output_path: PathBuf,
    pub total_tokens: usize,
    pub files_written: usize,
}

impl RunState {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            total_tokens: 0,
            files_written: 0,
        }
    }

    pub fn record(&mut self, tokens: usize) {
        self.total_tokens += tokens;
        self.files_written += 1;
    }

    pub fn into_summary(self) -> RunSummary {
        RunSummary {
            output: self.output_path,
            total_tokens: self.total_tokens,
            files: self.files_written,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub output: PathBuf,
    pub total_tokens: usize,
    pub files: usize,
}
