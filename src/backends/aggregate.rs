//! Aggregator - Streams candidate files into the output sink
//!
//! Each file becomes one record:
//!
//! ```text
//! File: <base-name>
//! <raw content>
//!
//!
//! ```
//!
//! Records are appended in walk order. One input file is open at a time.

use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::error::FlattenError;
use crate::core::model::{RunState, RunSummary};
use crate::core::paths::{absolutize, base_name, name_bytes};
use crate::core::tokenizer::{TokenCounter, WhitespaceCounter};

/// Extension appended to the configured output base name
pub const OUTPUT_EXTENSION: &str = "txt";

/// Create (or truncate) `<dir>/<base>.txt`.
///
/// Returns the buffered sink and its resolved absolute path.
pub fn create_sink(dir: &Path, base: &str) -> Result<(BufWriter<File>, PathBuf), FlattenError> {
    if base.is_empty() {
        return Err(FlattenError::configuration("output name must not be empty"));
    }
    if base.contains('/') || base.contains(std::path::MAIN_SEPARATOR) {
        return Err(FlattenError::configuration(format!(
            "output name must be a base name, got {:?}",
            base
        )));
    }

    let path = dir.join(format!("{}.{}", base, OUTPUT_EXTENSION));
    let file = File::create(&path).map_err(|e| {
        FlattenError::configuration(format!("cannot create {}: {}", path.display(), e))
    })?;
    let resolved = absolutize(&path).map_err(|e| {
        FlattenError::configuration(format!("cannot resolve {}: {}", path.display(), e))
    })?;

    Ok((BufWriter::new(file), resolved))
}

/// Write one record: header, raw content, blank-line separator.
///
/// The name is written verbatim, control characters and non-UTF-8 bytes
/// included.
pub fn write_record<W: Write>(sink: &mut W, name: &OsStr, content: &[u8]) -> io::Result<()> {
    sink.write_all(b"File: ")?;
    sink.write_all(&name_bytes(name))?;
    sink.write_all(b"\n")?;
    sink.write_all(content)?;
    sink.write_all(b"\n\n")
}

/// Owns the sink and the running totals for one run.
pub struct Aggregator<W: Write, C: TokenCounter = WhitespaceCounter> {
    sink: W,
    counter: C,
    state: RunState,
}

impl<W: Write> Aggregator<W> {
    pub fn new(sink: W, output_path: impl Into<PathBuf>) -> Self {
        Self::with_counter(sink, output_path, WhitespaceCounter)
    }
}

impl<W: Write, C: TokenCounter> Aggregator<W, C> {
    pub fn with_counter(sink: W, output_path: impl Into<PathBuf>, counter: C) -> Self {
        Self {
            sink,
            counter,
            state: RunState::new(output_path),
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Read `path` whole, append its record, and return its token count.
    pub fn append(&mut self, path: &Path) -> Result<usize, FlattenError> {
        let content = fs::read(path).map_err(|e| FlattenError::file_io(path, e))?;
        let tokens = self.counter.count(&String::from_utf8_lossy(&content));

        write_record(&mut self.sink, base_name(path), &content)
            .map_err(|e| FlattenError::file_io(&self.state.output_path, e))?;
        self.state.record(tokens);

        debug!(path = %path.display(), tokens, bytes = content.len(), "appended file");
        Ok(tokens)
    }

    /// Flush the sink and hand back the totals.
    pub fn finish(mut self) -> Result<RunSummary, FlattenError> {
        self.sink
            .flush()
            .map_err(|e| FlattenError::file_io(&self.state.output_path, e))?;
        Ok(self.state.into_summary())
    }
}
