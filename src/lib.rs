//! Parallel word-frequency analysis library
//!
//! Splits text files into chunks, counts normalized tokens on a worker pool,
//! merges the partial tables and measures how analysis time scales with the
//! number of workers.

pub mod analysis;
pub mod config;
pub mod corpus;
pub mod error;
pub mod report;
pub mod resource_monitor;
pub mod scaling;
pub mod tokenizer;
