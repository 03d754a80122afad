//! Corpus analysis at one worker count
//!
//! Partitioning and merging run on the calling thread; only chunk processing
//! runs on the pool. One pool is built per corpus run and all of its threads
//! are joined before [`Pipeline::analyze_corpus`] returns.

use rayon::{ThreadPool, ThreadPoolBuilder};
use std::path::Path;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;

use super::aggregator::{Aggregator, FileDiagnostic, FileResult, RunResult};
use super::worker::Worker;
use crate::corpus::{read_text, split, Corpus, SplitMode};
use crate::error::{AnalysisError, Result};
use crate::tokenizer::Tokenizer;

/// Partition -> parallel workers -> merge, for every file of a corpus
#[derive(Clone)]
pub struct Pipeline {
    worker: Worker,
    split_mode: SplitMode,
}

impl Pipeline {
    pub fn new(tokenizer: Arc<dyn Tokenizer>, split_mode: SplitMode) -> Self {
        Self {
            worker: Worker::new(tokenizer),
            split_mode,
        }
    }

    pub fn tokenizer_name(&self) -> &'static str {
        self.worker.tokenizer_name()
    }

    pub fn split_mode(&self) -> SplitMode {
        self.split_mode
    }

    /// Analyze every file of `corpus` with `workers` concurrent workers
    ///
    /// Unreadable files contribute an empty result and a diagnostic. A worker
    /// failure on any chunk fails the whole run.
    pub fn analyze_corpus(&self, corpus: &Corpus, workers: usize) -> Result<RunResult> {
        if workers == 0 {
            return Err(AnalysisError::invalid("worker count must be positive"));
        }

        let started = Instant::now();
        let mut run = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("wordfreq-worker-{}", i))
            .build_scoped(
                |thread| thread.run(),
                |pool| self.analyze_files(pool, corpus, workers),
            )??;
        run.wall_time = started.elapsed();

        tracing::info!(
            "Run with {} workers: {} files, {} tokens, {} distinct in {:.3}s",
            workers,
            corpus.len(),
            run.total_tokens,
            run.distinct_tokens,
            run.elapsed.as_secs_f64()
        );
        Ok(run)
    }

    fn analyze_files(&self, pool: &ThreadPool, corpus: &Corpus, workers: usize) -> Result<RunResult> {
        let mut run = RunResult::new(workers);

        for path in corpus.paths() {
            let source = path.display().to_string();
            tracing::debug!("Processing: {}", source);

            match self.analyze_file(pool, workers, path) {
                Ok(file) => {
                    if file.total_tokens == 0 {
                        run.add_diagnostic(FileDiagnostic::from_error(
                            &source,
                            &AnalysisError::EmptyCorpus,
                        ));
                    }
                    run.add_file(file);
                }
                Err(e) if e.is_recoverable() => {
                    tracing::warn!("Skipping {}: {}", source, e);
                    run.add_diagnostic(FileDiagnostic::from_error(&source, &e));
                    run.add_file(FileResult::empty(source));
                }
                Err(e) => return Err(e),
            }
        }

        Ok(run)
    }

    /// Read and analyze one file on an existing pool
    pub fn analyze_file(&self, pool: &ThreadPool, workers: usize, path: &Path) -> Result<FileResult> {
        let text = read_text(path)?;
        self.analyze_text(pool, workers, &path.display().to_string(), &text)
    }

    /// Split `text` into `workers` chunks and count them on `pool`
    ///
    /// Results are merged in completion order. If any chunk fails, the
    /// remaining in-flight chunks still run to completion and the failure of
    /// the lowest chunk index is returned.
    pub fn analyze_text(
        &self,
        pool: &ThreadPool,
        workers: usize,
        source: &str,
        text: &str,
    ) -> Result<FileResult> {
        let chunks = split(source, text, workers, self.split_mode)?;
        if chunks.is_empty() {
            tracing::info!("{} is empty", source);
            return Ok(FileResult::empty(source));
        }

        let text_bytes = text.len();
        let dispatched = chunks.len();
        let mut failures = Vec::new();
        let (tx, rx) = mpsc::channel();
        let worker = &self.worker;

        // file span: first dispatch to last result
        let mut aggregator = Aggregator::start(source);

        pool.in_place_scope(|scope| {
            for chunk in chunks {
                let tx = tx.clone();
                scope.spawn(move |_| {
                    // the receiver outlives the scope, send cannot fail
                    let _ = tx.send(worker.run(chunk));
                });
            }
            drop(tx);

            for outcome in rx {
                match outcome {
                    Ok(result) => {
                        tracing::debug!(
                            "{} chunk {} on {} -> {} tokens ({:.2}% of file bytes) in {:.4}s",
                            result.source,
                            result.chunk_index,
                            result.worker,
                            result.token_count,
                            share_percent(result.chunk_bytes, text_bytes),
                            result.elapsed.as_secs_f64()
                        );
                        aggregator.accept(result);
                    }
                    Err(e) => failures.push(e),
                }
            }
        });

        if !failures.is_empty() {
            tracing::warn!(
                "{} of {} chunks failed for {} ({} merged)",
                failures.len(),
                dispatched,
                source,
                aggregator.chunks_received()
            );
            failures.sort_by_key(|e| match e {
                AnalysisError::WorkerFailure { chunk, .. } => *chunk,
                _ => usize::MAX,
            });
            return Err(failures.swap_remove(0));
        }

        let file = aggregator.finish();
        tracing::info!(
            "Analysis of '{}' finished in {:.3}s | {} chunks | {} distinct tokens",
            source,
            file.elapsed.as_secs_f64(),
            file.chunk_count,
            file.distinct_tokens
        );
        Ok(file)
    }
}

/// `part` as a percentage of `whole`; zero for an empty whole
fn share_percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}
