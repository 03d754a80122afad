//! Merging of partial results
//!
//! Chunk results are folded in whatever order they arrive; per-file results
//! are then combined into one run result for the whole corpus.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use super::table::FrequencyTable;
use super::worker::ChunkResult;
use crate::error::AnalysisError;

/// Merged result for one file
#[derive(Debug, Clone)]
pub struct FileResult {
    pub source: String,
    pub table: FrequencyTable,
    /// Tokens retained across all chunks
    pub total_tokens: usize,
    /// Distinct tokens in the merged table
    pub distinct_tokens: usize,
    /// Chunk results merged
    pub chunk_count: usize,
    /// Wall-clock span from dispatching the first chunk to the last result
    pub elapsed: Duration,
}

impl FileResult {
    /// Zero result for an empty or unreadable file
    pub fn empty(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            table: FrequencyTable::new(),
            total_tokens: 0,
            distinct_tokens: 0,
            chunk_count: 0,
            elapsed: Duration::ZERO,
        }
    }

    pub fn summary(&self) -> FileSummary {
        FileSummary {
            source: self.source.clone(),
            total_tokens: self.total_tokens,
            distinct_tokens: self.distinct_tokens,
            chunk_count: self.chunk_count,
            elapsed_secs: self.elapsed.as_secs_f64(),
        }
    }
}

/// Table-free view of a file result for reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSummary {
    pub source: String,
    pub total_tokens: usize,
    pub distinct_tokens: usize,
    pub chunk_count: usize,
    pub elapsed_secs: f64,
}

/// A recovered per-file failure, surfaced to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiagnostic {
    pub source: String,
    pub kind: String,
    pub message: String,
}

impl FileDiagnostic {
    pub fn from_error(source: impl Into<String>, error: &AnalysisError) -> Self {
        Self {
            source: source.into(),
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}

/// Streaming merge of chunk results for one file
///
/// The clock starts at [`Aggregator::start`], so create it right before the
/// first chunk is dispatched.
#[derive(Debug)]
pub struct Aggregator {
    source: String,
    table: FrequencyTable,
    total_tokens: usize,
    chunk_count: usize,
    started: Instant,
}

impl Aggregator {
    pub fn start(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            table: FrequencyTable::new(),
            total_tokens: 0,
            chunk_count: 0,
            started: Instant::now(),
        }
    }

    /// Fold one chunk result in; arrival order does not matter
    pub fn accept(&mut self, result: ChunkResult) {
        self.total_tokens += result.token_count;
        self.chunk_count += 1;
        self.table.merge(result.table);
    }

    pub fn chunks_received(&self) -> usize {
        self.chunk_count
    }

    pub fn finish(self) -> FileResult {
        FileResult {
            distinct_tokens: self.table.len(),
            source: self.source,
            table: self.table,
            total_tokens: self.total_tokens,
            chunk_count: self.chunk_count,
            elapsed: self.started.elapsed(),
        }
    }
}

/// Merge already-collected chunk results for one file
///
/// Elapsed time covers only the merge itself; use [`Aggregator`] directly to
/// include dispatch and processing time.
pub fn merge<I>(source: &str, results: I) -> FileResult
where
    I: IntoIterator<Item = ChunkResult>,
{
    let mut aggregator = Aggregator::start(source);
    for result in results {
        aggregator.accept(result);
    }
    aggregator.finish()
}

/// Combined result for the whole corpus at one worker count
#[derive(Debug, Clone)]
pub struct RunResult {
    pub workers: usize,
    pub table: FrequencyTable,
    pub total_tokens: usize,
    pub distinct_tokens: usize,
    /// Sum of per-file analysis spans (reads excluded)
    pub elapsed: Duration,
    /// Wall-clock time of the whole run, reads and pool start-up included
    pub wall_time: Duration,
    pub files: Vec<FileSummary>,
    pub diagnostics: Vec<FileDiagnostic>,
}

impl RunResult {
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            table: FrequencyTable::new(),
            total_tokens: 0,
            distinct_tokens: 0,
            elapsed: Duration::ZERO,
            wall_time: Duration::ZERO,
            files: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Union a file's result into the corpus total
    pub fn add_file(&mut self, file: FileResult) {
        self.files.push(file.summary());
        self.total_tokens += file.total_tokens;
        self.elapsed += file.elapsed;
        self.table.merge(file.table);
        self.distinct_tokens = self.table.len();
    }

    pub fn add_diagnostic(&mut self, diagnostic: FileDiagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
