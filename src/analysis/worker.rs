//! Chunk worker
//!
//! Turns one owned chunk into a local frequency table. Workers share nothing
//! mutable: the tokenizer is read-only and every result is a fresh value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::table::FrequencyTable;
use crate::corpus::TextChunk;
use crate::error::{AnalysisError, Result};
use crate::tokenizer::Tokenizer;

/// Identity of the thread that processed a chunk (diagnostics only)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkerId(pub String);

impl WorkerId {
    /// Identity of the calling thread: its pool index when inside a worker pool
    pub fn current() -> Self {
        match rayon::current_thread_index() {
            Some(index) => Self(format!("worker-{}", index)),
            None => {
                let thread = std::thread::current();
                Self(thread.name().unwrap_or("main").to_string())
            }
        }
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Output of one worker invocation on one chunk
#[derive(Debug, Clone)]
pub struct ChunkResult {
    /// Originating file
    pub source: String,
    /// Chunk position within the file
    pub chunk_index: usize,
    /// Size of the chunk in bytes
    pub chunk_bytes: usize,
    /// Local frequency table
    pub table: FrequencyTable,
    /// Thread that produced the result
    pub worker: WorkerId,
    /// Tokens retained after normalization
    pub token_count: usize,
    /// Time spent inside the worker
    pub elapsed: Duration,
}

/// Applies the shared tokenizer to chunks
#[derive(Clone)]
pub struct Worker {
    tokenizer: Arc<dyn Tokenizer>,
}

impl Worker {
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self { tokenizer }
    }

    pub fn tokenizer_name(&self) -> &'static str {
        self.tokenizer.name()
    }

    /// Count the tokens of one chunk
    ///
    /// A blank chunk yields an empty table and zero counts.
    pub fn process(&self, chunk: TextChunk) -> ChunkResult {
        let start = Instant::now();

        let (table, token_count) = if chunk.is_blank() {
            (FrequencyTable::new(), 0)
        } else {
            let tokens = self.tokenizer.tokenize(&chunk.text);
            let count = tokens.len();
            (tokens.into_iter().collect(), count)
        };

        ChunkResult {
            chunk_bytes: chunk.len(),
            source: chunk.source,
            chunk_index: chunk.index,
            table,
            worker: WorkerId::current(),
            token_count,
            elapsed: start.elapsed(),
        }
    }

    /// Like [`Worker::process`], but a panic inside the tokenizer becomes a
    /// `WorkerFailure` instead of unwinding into the pool
    pub fn run(&self, chunk: TextChunk) -> Result<ChunkResult> {
        let source = chunk.source.clone();
        let index = chunk.index;

        panic::catch_unwind(AssertUnwindSafe(|| self.process(chunk))).map_err(|payload| {
            let message = if let Some(s) = payload.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "worker panicked".to_string()
            };
            AnalysisError::WorkerFailure {
                file: source,
                chunk: index,
                message,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::SimpleTokenizer;

    struct PanickingTokenizer;

    impl Tokenizer for PanickingTokenizer {
        fn name(&self) -> &'static str {
            "panicking"
        }

        fn tokenize(&self, _text: &str) -> Vec<String> {
            panic!("tokenizer exploded");
        }
    }

    fn chunk(text: &str) -> TextChunk {
        TextChunk {
            source: "test.txt".to_string(),
            index: 2,
            offset: 0,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_process_counts_tokens() {
        let worker = Worker::new(Arc::new(SimpleTokenizer));
        let result = worker.process(chunk("the cat sat on the mat"));

        assert_eq!(result.token_count, 6);
        assert_eq!(result.table.get("the"), 2);
        assert_eq!(result.table.len(), 5);
        assert_eq!(result.chunk_index, 2);
        assert_eq!(result.source, "test.txt");
        assert_eq!(result.chunk_bytes, 22);
    }

    #[test]
    fn test_blank_chunk_is_not_an_error() {
        let worker = Worker::new(Arc::new(PanickingTokenizer));
        let result = worker.run(chunk("  \n ")).unwrap();
        assert!(result.table.is_empty());
        assert_eq!(result.token_count, 0);
    }

    #[test]
    fn test_panic_becomes_worker_failure() {
        let worker = Worker::new(Arc::new(PanickingTokenizer));
        let err = worker.run(chunk("boom")).unwrap_err();
        match err {
            AnalysisError::WorkerFailure { file, chunk, message } => {
                assert_eq!(file, "test.txt");
                assert_eq!(chunk, 2);
                assert!(message.contains("tokenizer exploded"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_worker_id_inside_pool() {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap();
        let id = pool.install(WorkerId::current);
        assert_eq!(id, WorkerId("worker-0".to_string()));
    }
}
