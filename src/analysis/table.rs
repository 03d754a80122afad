//! Token frequency table

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// A token with its occurrence count, as handed to report sinks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCount {
    pub token: String,
    pub count: u64,
}

/// Mapping from normalized token to occurrence count
///
/// Merging only ever adds: counts never decrease and merge order does not
/// affect the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `token`
    pub fn record(&mut self, token: impl Into<String>) {
        self.add(token, 1);
    }

    /// Add `count` occurrences of `token`
    pub fn add(&mut self, token: impl Into<String>, count: u64) {
        *self.counts.entry(token.into()).or_insert(0) += count;
    }

    /// Fold another table into this one
    pub fn merge(&mut self, other: FrequencyTable) {
        if self.counts.is_empty() {
            self.counts = other.counts;
            return;
        }
        for (token, count) in other.counts {
            *self.counts.entry(token).or_insert(0) += count;
        }
    }

    /// Fold another table into this one without consuming it
    pub fn merge_ref(&mut self, other: &FrequencyTable) {
        for (token, count) in &other.counts {
            *self.counts.entry(token.clone()).or_insert(0) += count;
        }
    }

    pub fn get(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(token, count)| (token.as_str(), *count))
    }

    /// The `n` most frequent tokens, count descending, ties broken by token ascending
    pub fn top_n(&self, n: usize) -> Vec<TokenCount> {
        let mut ranked: Vec<(&String, &u64)> = self.counts.iter().collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        ranked
            .into_iter()
            .take(n)
            .map(|(token, count)| TokenCount {
                token: token.clone(),
                count: *count,
            })
            .collect()
    }

    /// SHA-256 over the sorted entries; equal tables have equal digests
    pub fn digest(&self) -> String {
        let mut entries: Vec<(&String, &u64)> = self.counts.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let mut hasher = Sha256::new();
        for (token, count) in entries {
            hasher.update(token.as_bytes());
            hasher.update([0u8]);
            hasher.update(count.to_le_bytes());
        }
        format!("{:x}", hasher.finalize())
    }
}

impl FromIterator<String> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut table = Self::new();
        for token in iter {
            table.record(token);
        }
        table
    }
}

impl<'a> FromIterator<(&'a str, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (token, count) in iter {
            table.add(token, count);
        }
        table
    }
}
