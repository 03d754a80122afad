//! Report sinks
//!
//! Receive the ranked tokens and the scaling table. Chart rendering is left
//! to external tools; the JSON sink writes everything they need.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::analysis::TokenCount;
use crate::scaling::{ScalingPoint, ScalingReport};

/// Consumer of analysis results
pub trait ReportSink {
    /// Ranked `(token, count)` pairs, most frequent first
    fn top_tokens(&mut self, ranked: &[TokenCount]) -> Result<()>;

    /// One point per worker-count configuration, in sweep order
    fn scaling(&mut self, points: &[ScalingPoint]) -> Result<()>;

    /// Called once with the complete report
    fn finish(&mut self, _report: &ScalingReport) -> Result<()> {
        Ok(())
    }
}

/// Hand a report to a sink in the usual order
pub fn emit(sink: &mut dyn ReportSink, report: &ScalingReport) -> Result<()> {
    sink.scaling(&report.points)?;
    sink.top_tokens(&report.top_tokens)?;
    sink.finish(report)
}

/// Plain-text tables
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl ConsoleSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn format_ratio(value: Option<f64>, suffix: &str) -> String {
    match value {
        Some(v) => format!("{:.2}{}", v, suffix),
        None => "N/A".to_string(),
    }
}

impl<W: Write> ReportSink for ConsoleSink<W> {
    fn top_tokens(&mut self, ranked: &[TokenCount]) -> Result<()> {
        if ranked.is_empty() {
            writeln!(self.out, "No tokens to report.")?;
            return Ok(());
        }

        writeln!(self.out, "Top {} tokens", ranked.len())?;
        writeln!(self.out, "{:>5}  {:<24} {:>10}", "rank", "token", "count")?;
        for (i, entry) in ranked.iter().enumerate() {
            writeln!(self.out, "{:>5}  {:<24} {:>10}", i + 1, entry.token, entry.count)?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn scaling(&mut self, points: &[ScalingPoint]) -> Result<()> {
        writeln!(
            self.out,
            "{:>8} {:>12} {:>12} {:>9} {:>10} {:>10}",
            "workers", "time (s)", "min (s)", "speedup", "efficiency", "peak MB"
        )?;
        for point in points {
            let peak = point
                .resources
                .as_ref()
                .map(|r| format!("{:.0}", r.peak_memory_mb))
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                self.out,
                "{:>8} {:>12.4} {:>12.4} {:>9} {:>10} {:>10}",
                point.workers,
                point.elapsed_secs,
                point.min_elapsed_secs,
                format_ratio(point.speedup, "x"),
                format_ratio(point.efficiency, ""),
                peak
            )?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self, report: &ScalingReport) -> Result<()> {
        writeln!(
            self.out,
            "{} tokens, {} distinct (tokenizer: {}, {} workers)",
            report.total_tokens, report.distinct_tokens, report.tokenizer, report.report_workers
        )?;
        for diag in &report.diagnostics {
            writeln!(self.out, "  ⚠ {}: {}", diag.source, diag.message)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Writes the full report as pretty JSON
pub struct JsonSink {
    path: PathBuf,
}

impl JsonSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for JsonSink {
    fn top_tokens(&mut self, _ranked: &[TokenCount]) -> Result<()> {
        Ok(())
    }

    fn scaling(&mut self, _points: &[ScalingPoint]) -> Result<()> {
        Ok(())
    }

    fn finish(&mut self, report: &ScalingReport) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {:?}", parent))?;
            }
        }
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write report: {:?}", self.path))?;
        tracing::info!("Report written to {}", self.path.display());
        Ok(())
    }
}
