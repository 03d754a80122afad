//! Configuration for the word-frequency benchmark
//!
//! Defines the wordfreq.toml schema, the tokenizer selection and the
//! worker-count sweep defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::corpus::SplitMode;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "wordfreq.toml";

/// Token normalization policy
///
/// - `Simple`: whitespace split, punctuation strip, alphabetic filter
/// - `Linguistic`: word segmentation, stopword removal, Snowball stemming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    #[default]
    Simple,
    Linguistic,
}

impl TokenizerKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Linguistic => "linguistic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "simple" | "minimal" | "alpha" => Some(Self::Simple),
            "linguistic" | "nlp" | "stem" | "stemming" => Some(Self::Linguistic),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Simple => "Whitespace split with punctuation strip and alphabetic filter",
            Self::Linguistic => "Word segmentation with stopword removal and Snowball stemming",
        }
    }
}

/// Language used by the linguistic tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    French,
    German,
    Spanish,
    Italian,
    Portuguese,
    Romanian,
}

impl Language {
    pub fn name(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::French => "french",
            Self::German => "german",
            Self::Spanish => "spanish",
            Self::Italian => "italian",
            Self::Portuguese => "portuguese",
            Self::Romanian => "romanian",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "english" | "en" => Some(Self::English),
            "french" | "fr" => Some(Self::French),
            "german" | "de" => Some(Self::German),
            "spanish" | "es" => Some(Self::Spanish),
            "italian" | "it" => Some(Self::Italian),
            "portuguese" | "pt" => Some(Self::Portuguese),
            "romanian" | "ro" => Some(Self::Romanian),
            _ => None,
        }
    }
}

/// Analyzer configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Normalization policy applied by every worker
    #[serde(default)]
    pub tokenizer: TokenizerKind,

    /// Stemmer/stopword language (linguistic tokenizer only)
    #[serde(default)]
    pub language: Language,

    /// Newline-separated stopword list, overrides the built-in list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stopwords_file: Option<PathBuf>,

    /// Explicit worker-count sweep; defaults to [1, 2, half, all]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_counts: Option<Vec<usize>>,

    /// Runs per worker-count configuration
    #[serde(default = "default_repeats")]
    pub repeats: usize,

    /// Number of ranked tokens to report
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Worker count used for the top-token report; defaults to half the cores
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_workers: Option<usize>,

    /// Chunk boundary policy
    #[serde(default)]
    pub split_mode: SplitMode,

    /// Extensions picked up when a directory is given as input
    #[serde(default)]
    pub extensions: Vec<String>,
}

fn default_repeats() -> usize { 1 }
fn default_top_n() -> usize { 10 }

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            tokenizer: TokenizerKind::default(),
            language: Language::default(),
            stopwords_file: None,
            worker_counts: None,
            repeats: default_repeats(),
            top_n: default_top_n(),
            report_workers: None,
            split_mode: SplitMode::default(),
            extensions: vec![],
        }
    }
}

impl AnalyzerConfig {
    /// Load config from TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read analyzer config: {:?}", path))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse analyzer config: {:?}", path))?;
        Ok(config)
    }

    /// Load from default location (./wordfreq.toml) or return defaults
    pub fn load_default() -> Result<Self> {
        let local_path = Path::new(DEFAULT_CONFIG_FILE);
        if local_path.exists() {
            return Self::load(local_path);
        }
        Ok(Self::default())
    }

    /// Save config to TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.repeats == 0 {
            anyhow::bail!("repeats must be at least 1");
        }
        if let Some(counts) = &self.worker_counts {
            if counts.is_empty() {
                anyhow::bail!("worker_counts must not be empty");
            }
            if counts.contains(&0) {
                anyhow::bail!("worker_counts entries must be positive: {:?}", counts);
            }
        }
        if self.report_workers == Some(0) {
            anyhow::bail!("report_workers must be positive");
        }
        Ok(())
    }

    /// Worker counts to sweep, in caller order
    pub fn resolved_worker_counts(&self, parallelism: usize) -> Vec<usize> {
        match &self.worker_counts {
            Some(counts) => counts.clone(),
            None => default_worker_counts(parallelism),
        }
    }

    /// Worker count used for the ranked-token report
    pub fn resolved_report_workers(&self, parallelism: usize) -> usize {
        self.report_workers
            .unwrap_or_else(|| (parallelism / 2).max(1))
    }
}

/// Number of hardware threads available to the process
pub fn available_parallelism() -> usize {
    num_cpus::get().max(1)
}

/// `[1, 2, half, all]` with every derived entry clamped to at least 1
pub fn default_worker_counts(parallelism: usize) -> Vec<usize> {
    let all = parallelism.max(1);
    vec![1, 2, (all / 2).max(1), all]
}
