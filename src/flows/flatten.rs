//! Flatten flow - Concatenate a source tree into one annotated text file
//!
//! Validates the configuration, opens the sink, streams every candidate from
//! the walker into the aggregator, and reports the totals.

use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::backends::aggregate::{create_sink, Aggregator};
use crate::backends::walk::CandidateWalker;
use crate::core::error::FlattenError;
use crate::core::extensions::ExtensionSet;
use crate::core::model::RunSummary;
use crate::core::paths::absolutize;
use crate::core::policy::FilterPolicy;

/// Default output base name (`combined_code.txt`)
pub const DEFAULT_OUTPUT_BASE: &str = "combined_code";

/// Resolved configuration for one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Root directory to walk
    pub root: PathBuf,
    /// Extension allow-list (empty = everything)
    pub extensions: ExtensionSet,
    /// Output base name, without the `.txt`
    pub output_base: String,
    /// Directory the sink is created in
    pub output_dir: PathBuf,
}

impl RunConfig {
    pub fn new(root: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: ExtensionSet::default(),
            output_base: DEFAULT_OUTPUT_BASE.to_string(),
            output_dir: output_dir.into(),
        }
    }

    pub fn with_extensions(mut self, extensions: ExtensionSet) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_output_base(mut self, base: impl Into<String>) -> Self {
        self.output_base = base.into();
        self
    }
}

/// How the final summary is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryFormat {
    #[default]
    Text,
    Json,
}

/// Walk `config.root` and write every accepted file into the sink.
pub fn flatten(config: &RunConfig) -> Result<RunSummary, FlattenError> {
    let root = resolve_root(&config.root)?;

    let (sink, output_path) = create_sink(&config.output_dir, &config.output_base)?;
    debug!(output = %output_path.display(), "resolved output path");
    debug!(root = %root.display(), extensions = %config.extensions, "starting walk");

    let policy = FilterPolicy::new(config.extensions.clone()).with_output_path(&output_path);
    let mut aggregator = Aggregator::new(sink, output_path);

    for candidate in CandidateWalker::new(&root, policy) {
        aggregator.append(&candidate?)?;
    }

    let state = aggregator.state();
    debug!(files = state.files_written, tokens = state.total_tokens, "walk complete");
    aggregator.finish()
}

fn resolve_root(root: &Path) -> Result<PathBuf, FlattenError> {
    if root.as_os_str().is_empty() {
        return Err(FlattenError::configuration("path is required"));
    }
    if !root.exists() {
        return Err(FlattenError::configuration(format!(
            "provided path does not exist: {}",
            root.display()
        )));
    }
    if !root.is_dir() {
        return Err(FlattenError::configuration(format!(
            "provided path is not a directory: {}",
            root.display()
        )));
    }
    absolutize(root).map_err(|e| {
        FlattenError::configuration(format!("cannot resolve {}: {}", root.display(), e))
    })
}

/// Run the flatten command and print the summary
pub fn run_flatten(config: &RunConfig, format: SummaryFormat) -> Result<()> {
    let summary = flatten(config)?;

    match format {
        SummaryFormat::Json => println!("{}", serde_json::to_string(&summary)?),
        SummaryFormat::Text => println!("{}", render_summary(&summary)),
    }

    Ok(())
}

fn render_summary(summary: &RunSummary) -> String {
    format!(
        "Combined {} files ({} tokens) into {}",
        summary.files.to_string().bold(),
        summary.total_tokens.to_string().green().bold(),
        summary.output.display().to_string().cyan()
    )
}
