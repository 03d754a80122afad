//! Error taxonomy for the analysis pipeline
//!
//! Read failures are recoverable (the file contributes an empty result),
//! argument and worker failures are fatal to the call that hit them.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the analysis library
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The file does not exist
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The file exists but could not be read as UTF-8 text
    #[error("failed to read {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Non-positive chunk/worker count or an empty input list
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No tokens anywhere in the input; callers treat this as a zero result
    #[error("no tokens found")]
    EmptyCorpus,

    /// A tokenization task faulted
    #[error("worker failed on {file} chunk {chunk}: {message}")]
    WorkerFailure {
        file: String,
        chunk: usize,
        message: String,
    },

    /// The worker pool could not be started
    #[error("failed to build worker pool: {0}")]
    PoolBuild(#[from] rayon::ThreadPoolBuildError),
}

impl AnalysisError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Whether the batch may continue past this error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. } | Self::ReadError { .. } | Self::EmptyCorpus
        )
    }

    /// Short machine-readable kind, used in JSON diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => "file_not_found",
            Self::ReadError { .. } => "read_error",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::EmptyCorpus => "empty_corpus",
            Self::WorkerFailure { .. } => "worker_failure",
            Self::PoolBuild(_) => "pool_build",
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
