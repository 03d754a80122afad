//! Scaling measurements
//!
//! Runs the full corpus analysis once per worker-count configuration, in the
//! order given, and derives speedup against the first configuration.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let harness = ScalingHarness::new(pipeline).with_repeats(3);
//! let report = harness.run(&corpus, &[1, 2, 4, 8], 4, 10)?;
//! for point in &report.points {
//!     println!("{} workers: {:.3}s", point.workers, point.elapsed_secs);
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::analysis::{FileDiagnostic, FileSummary, Pipeline, RunResult, TokenCount};
use crate::corpus::{Corpus, SplitMode};
use crate::error::{AnalysisError, Result};
use crate::resource_monitor::{ResourceMetrics, ResourceMonitor};

/// Timing for one worker-count configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingPoint {
    pub workers: usize,
    /// Mean corpus analysis time over the repeats (seconds)
    pub elapsed_secs: f64,
    /// Fastest repeat (seconds)
    pub min_elapsed_secs: f64,
    /// Baseline time / this time; `None` when this time is zero
    pub speedup: Option<f64>,
    /// Speedup per worker
    pub efficiency: Option<f64>,
    pub total_tokens: usize,
    pub distinct_tokens: usize,
    /// Fingerprint of the merged table, identical across configurations
    pub table_digest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceMetrics>,
}

/// Everything a report sink needs from one sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalingReport {
    /// RFC 3339 time the sweep finished
    pub timestamp: String,
    pub tokenizer: String,
    pub split_mode: SplitMode,
    pub repeats: usize,
    /// Worker count of the first configuration, used as speedup baseline
    pub baseline_workers: usize,
    pub points: Vec<ScalingPoint>,
    /// Worker count of the run the ranked tokens come from
    pub report_workers: usize,
    pub top_tokens: Vec<TokenCount>,
    pub total_tokens: usize,
    pub distinct_tokens: usize,
    pub files: Vec<FileSummary>,
    pub diagnostics: Vec<FileDiagnostic>,
}

impl ScalingReport {
    /// True when every configuration produced the same frequency table
    pub fn content_invariant(&self) -> bool {
        self.points
            .windows(2)
            .all(|pair| pair[0].table_digest == pair[1].table_digest)
    }

    /// True when the tables differ although no chunk boundary can cut a token
    ///
    /// `Char` windows may split a word across two chunks, so differing tables
    /// are expected there.
    pub fn content_mismatch_is_fatal(&self) -> bool {
        self.split_mode == SplitMode::Word && !self.content_invariant()
    }
}

/// `baseline / elapsed`, undefined for a zero elapsed time
pub fn speedup(baseline_secs: f64, elapsed_secs: f64) -> Option<f64> {
    if elapsed_secs > 0.0 {
        Some(baseline_secs / elapsed_secs)
    } else {
        None
    }
}

/// Fill speedup and efficiency using the first point as baseline
pub fn apply_speedups(points: &mut [ScalingPoint]) {
    let Some(baseline) = points.first().map(|p| p.elapsed_secs) else {
        return;
    };
    for point in points.iter_mut() {
        point.speedup = speedup(baseline, point.elapsed_secs);
        point.efficiency = point.speedup.map(|s| s / point.workers as f64);
    }
}

/// Repeats corpus analysis across worker-count configurations
pub struct ScalingHarness {
    pipeline: Pipeline,
    repeats: usize,
    monitor_resources: bool,
}

impl ScalingHarness {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            repeats: 1,
            monitor_resources: true,
        }
    }

    /// Runs per configuration (at least 1)
    pub fn with_repeats(mut self, repeats: usize) -> Self {
        self.repeats = repeats.max(1);
        self
    }

    /// Sample process memory while each configuration runs
    pub fn with_resource_monitoring(mut self, enabled: bool) -> Self {
        self.monitor_resources = enabled;
        self
    }

    /// Time the corpus at every worker count, preserving caller order
    ///
    /// Configurations run strictly one after another. Any fatal error stops
    /// the sweep.
    pub fn measure(&self, corpus: &Corpus, worker_counts: &[usize]) -> Result<Vec<ScalingPoint>> {
        if worker_counts.is_empty() {
            return Err(AnalysisError::invalid("worker-count list must not be empty"));
        }
        if let Some(bad) = worker_counts.iter().find(|&&n| n == 0) {
            return Err(AnalysisError::invalid(format!(
                "worker counts must be positive, got {}",
                bad
            )));
        }

        let mut points = Vec::with_capacity(worker_counts.len());
        for &workers in worker_counts {
            points.push(self.measure_point(corpus, workers)?);
        }
        apply_speedups(&mut points);
        Ok(points)
    }

    fn measure_point(&self, corpus: &Corpus, workers: usize) -> Result<ScalingPoint> {
        tracing::info!("Measuring {} workers ({} repeats)", workers, self.repeats);

        let mut monitor = self.monitor_resources.then(ResourceMonitor::new);
        if let Some(monitor) = monitor.as_mut() {
            monitor.snapshot_baseline();
        }
        let sampling = monitor.as_ref().map(|m| m.start_sampling());

        let mut timings = Vec::with_capacity(self.repeats);
        let mut last: Option<RunResult> = None;
        for _ in 0..self.repeats {
            let run = self.pipeline.analyze_corpus(corpus, workers)?;
            timings.push(run.elapsed);
            last = Some(run);
        }
        drop(sampling);

        let run = last.ok_or_else(|| AnalysisError::invalid("repeats must be positive"))?;
        let total: Duration = timings.iter().sum();
        let mean = total.as_secs_f64() / timings.len() as f64;
        let min = timings.iter().min().copied().unwrap_or_default().as_secs_f64();
        let resources = monitor.map(|m| m.finalize(total, run.total_tokens * timings.len()));
        if let Some(metrics) = &resources {
            tracing::info!("{} workers | {}", workers, metrics.format_summary());
        }

        Ok(ScalingPoint {
            workers,
            elapsed_secs: mean,
            min_elapsed_secs: min,
            speedup: None,
            efficiency: None,
            total_tokens: run.total_tokens,
            distinct_tokens: run.distinct_tokens,
            table_digest: run.table.digest(),
            resources,
        })
    }

    /// Analyze once at `workers` and rank the `top_n` tokens
    pub fn top_tokens(
        &self,
        corpus: &Corpus,
        workers: usize,
        top_n: usize,
    ) -> Result<(RunResult, Vec<TokenCount>)> {
        let run = self.pipeline.analyze_corpus(corpus, workers)?;
        let top = run.table.top_n(top_n);
        Ok((run, top))
    }

    /// Full sweep followed by a ranked-token run at `report_workers`
    pub fn run(
        &self,
        corpus: &Corpus,
        worker_counts: &[usize],
        report_workers: usize,
        top_n: usize,
    ) -> Result<ScalingReport> {
        let points = self.measure(corpus, worker_counts)?;
        let (run, top_tokens) = self.top_tokens(corpus, report_workers, top_n)?;

        let report = ScalingReport {
            timestamp: chrono::Utc::now().to_rfc3339(),
            tokenizer: self.pipeline.tokenizer_name().to_string(),
            split_mode: self.pipeline.split_mode(),
            repeats: self.repeats,
            baseline_workers: worker_counts[0],
            points,
            report_workers,
            top_tokens,
            total_tokens: run.total_tokens,
            distinct_tokens: run.distinct_tokens,
            files: run.files,
            diagnostics: run.diagnostics,
        };

        if !report.content_invariant() {
            tracing::warn!(
                "Frequency tables differ between worker-count configurations ({} split)",
                report.split_mode.name()
            );
        }
        Ok(report)
    }
}
