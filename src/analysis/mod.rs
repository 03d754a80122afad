//! Parallel word-frequency analysis
//!
//! Partitioner -> [Worker ...] -> Aggregator, per file, unioned across the
//! corpus into a [`RunResult`].

pub mod aggregator;
pub mod pipeline;
pub mod table;
pub mod worker;

#[cfg(test)]
mod pipeline_tests;

pub use aggregator::{merge, Aggregator, FileDiagnostic, FileResult, FileSummary, RunResult};
pub use pipeline::Pipeline;
pub use table::{FrequencyTable, TokenCount};
pub use worker::{ChunkResult, Worker, WorkerId};
