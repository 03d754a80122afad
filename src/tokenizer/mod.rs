//! Token normalization
//!
//! Workers depend only on the [`Tokenizer`] trait; the policy is chosen once
//! per run and shared read-only by every worker.
//!
//! - [`SimpleTokenizer`]: whitespace split, punctuation strip, alphabetic filter
//! - [`LinguisticTokenizer`]: Unicode word segmentation, stopwords, Snowball stemming

pub mod linguistic;
pub mod simple;
pub mod stopwords;

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::config::{Language, TokenizerKind};
use crate::corpus::read_text;
use crate::error::Result;

pub use linguistic::LinguisticTokenizer;
pub use simple::SimpleTokenizer;

/// Pure mapping from a text chunk to its normalized tokens
pub trait Tokenizer: Send + Sync {
    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    /// Normalize `text` into a sequence of tokens
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Build the shared tokenizer for a run
///
/// `stopwords_file` replaces the built-in stopword list of the linguistic
/// tokenizer; it is ignored by the simple tokenizer.
pub fn build_tokenizer(
    kind: TokenizerKind,
    language: Language,
    stopwords_file: Option<&Path>,
) -> Result<Arc<dyn Tokenizer>> {
    match kind {
        TokenizerKind::Simple => Ok(Arc::new(SimpleTokenizer)),
        TokenizerKind::Linguistic => {
            let stopwords = match stopwords_file {
                Some(path) => {
                    let list = parse_stopwords(&read_text(path)?);
                    tracing::debug!("Loaded {} stopwords from {}", list.len(), path.display());
                    list
                }
                None => stopwords::builtin(language),
            };
            if stopwords.is_empty() {
                tracing::warn!(
                    "Stopword list for {} is empty; stopword filtering disabled",
                    language.name()
                );
            }
            Ok(Arc::new(LinguisticTokenizer::new(language, stopwords)))
        }
    }
}

/// One stopword per line; blank lines and `#` comments are skipped
pub fn parse_stopwords(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect()
}
