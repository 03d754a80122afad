//! Resource monitoring for scaling runs
//!
//! Tracks process memory and token throughput while one worker-count
//! configuration is being measured.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use sysinfo::{Pid, ProcessesToUpdate, System};

/// Sampling interval for peak memory tracking
const SAMPLE_INTERVAL_MS: u64 = 50;

/// Memory and throughput observed during one configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceMetrics {
    /// Process memory before the configuration started (MB)
    pub baseline_memory_mb: f64,

    /// Peak process memory while the configuration ran (MB)
    pub peak_memory_mb: f64,

    /// Tokens processed per second of analysis time
    pub throughput_tokens_per_sec: f64,
}

impl ResourceMetrics {
    pub fn format_summary(&self) -> String {
        format!(
            "Peak RAM: {:.0}MB (baseline: {:.0}MB) | Throughput: {:.0} tokens/s",
            self.peak_memory_mb, self.baseline_memory_mb, self.throughput_tokens_per_sec
        )
    }
}

/// Monitor for tracking resource usage during a scaling configuration
pub struct ResourceMonitor {
    system: System,
    pid: Pid,
    baseline_memory_mb: f64,
    peak_memory_mb: Arc<AtomicU64>,
    sampling_active: Arc<AtomicBool>,
}

impl ResourceMonitor {
    pub fn new() -> Self {
        let mut system = System::new();
        let pid = Pid::from_u32(std::process::id());
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

        Self {
            system,
            pid,
            baseline_memory_mb: 0.0,
            peak_memory_mb: Arc::new(AtomicU64::new(0)),
            sampling_active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get current process memory usage in MB
    fn get_process_memory_mb(&mut self) -> f64 {
        self.system.refresh_processes(ProcessesToUpdate::Some(&[self.pid]), true);
        self.system
            .process(self.pid)
            .map(|process| process.memory() as f64 / (1024.0 * 1024.0))
            .unwrap_or(0.0)
    }

    /// Snapshot memory before the configuration starts
    pub fn snapshot_baseline(&mut self) {
        self.baseline_memory_mb = self.get_process_memory_mb();
        self.peak_memory_mb
            .store(self.baseline_memory_mb.to_bits(), Ordering::SeqCst);
        tracing::debug!("Baseline memory: {:.1} MB", self.baseline_memory_mb);
    }

    /// Start background memory sampling
    ///
    /// Sampling continues while the returned handle is alive.
    pub fn start_sampling(&self) -> SamplingHandle {
        self.sampling_active.store(true, Ordering::SeqCst);

        let peak_memory = Arc::clone(&self.peak_memory_mb);
        let sampling_active = Arc::clone(&self.sampling_active);
        let pid = self.pid;

        let handle = std::thread::spawn(move || {
            let mut system = System::new();

            while sampling_active.load(Ordering::SeqCst) {
                system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
                if let Some(process) = system.process(pid) {
                    let current_mb = process.memory() as f64 / (1024.0 * 1024.0);
                    update_peak(&peak_memory, current_mb);
                }

                std::thread::sleep(Duration::from_millis(SAMPLE_INTERVAL_MS));
            }
        });

        SamplingHandle {
            sampling_active: Arc::clone(&self.sampling_active),
            _thread: Some(handle),
        }
    }

    /// Stop sampling and compute metrics for `tokens` processed in `elapsed`
    pub fn finalize(mut self, elapsed: Duration, tokens: usize) -> ResourceMetrics {
        self.sampling_active.store(false, Ordering::SeqCst);

        let final_memory = self.get_process_memory_mb();
        update_peak(&self.peak_memory_mb, final_memory);

        let peak_mb = f64::from_bits(self.peak_memory_mb.load(Ordering::SeqCst));
        let secs = elapsed.as_secs_f64();
        let throughput = if secs > 0.0 { tokens as f64 / secs } else { 0.0 };

        ResourceMetrics {
            baseline_memory_mb: self.baseline_memory_mb,
            peak_memory_mb: peak_mb,
            throughput_tokens_per_sec: throughput,
        }
    }
}

impl Default for ResourceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

/// Raise the stored peak to `current_mb` if it is higher
fn update_peak(peak: &AtomicU64, current_mb: f64) {
    let current_bits = current_mb.to_bits();
    loop {
        let peak_bits = peak.load(Ordering::SeqCst);
        if current_mb <= f64::from_bits(peak_bits) {
            break;
        }
        if peak
            .compare_exchange(peak_bits, current_bits, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            break;
        }
    }
}

/// Handle for background memory sampling
///
/// Sampling continues while this handle is held. Drop to stop sampling.
pub struct SamplingHandle {
    sampling_active: Arc<AtomicBool>,
    _thread: Option<std::thread::JoinHandle<()>>,
}

impl Drop for SamplingHandle {
    fn drop(&mut self) {
        // the thread exits on its next iteration
        self.sampling_active.store(false, Ordering::SeqCst);
    }
}
