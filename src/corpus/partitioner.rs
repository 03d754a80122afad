//! Text partitioning
//!
//! Splits one file's text into at most `num_chunks` contiguous chunks of
//! `chars / num_chunks` characters. The remainder is folded into the last
//! chunk, and whitespace-only chunks are dropped, so fewer chunks than
//! requested may come back.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::error::{AnalysisError, Result};

/// Chunk boundary policy
///
/// - `Word`: boundaries are pushed forward to the next whitespace, no token is cut
/// - `Char`: fixed-width windows, a boundary may fall inside a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    #[default]
    Word,
    Char,
}

impl SplitMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Char => "char",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "word" | "words" | "whitespace" => Some(Self::Word),
            "char" | "chars" | "fixed" => Some(Self::Char),
            _ => None,
        }
    }
}

/// A contiguous slice of one file's text, owned by the worker that processes it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    /// Originating file (display form of its path)
    pub source: String,
    /// Position in the file's chunk sequence (after blank chunks are dropped)
    pub index: usize,
    /// Byte offset of the chunk in the file
    pub offset: usize,
    /// Chunk content
    pub text: String,
}

impl TextChunk {
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True when the chunk holds only whitespace
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Byte ranges of the non-blank chunks of `text`
///
/// Every range starts and ends on a UTF-8 character boundary. Fails with
/// `InvalidArgument` when `num_chunks` is zero.
pub fn chunk_bounds(text: &str, num_chunks: usize, mode: SplitMode) -> Result<Vec<Range<usize>>> {
    if num_chunks == 0 {
        return Err(AnalysisError::invalid("number of chunks must be positive"));
    }

    let len = text.len();
    let target = (text.chars().count() / num_chunks).max(1);
    let mut bounds = Vec::with_capacity(num_chunks);
    let mut start = 0;

    for i in 0..num_chunks {
        if start >= len {
            break;
        }
        let end = if i + 1 == num_chunks {
            len
        } else {
            let end = advance_chars(text, start, target);
            match mode {
                SplitMode::Char => end,
                SplitMode::Word => next_word_boundary(text, end),
            }
        };
        bounds.push(start..end);
        start = end;
    }

    bounds.retain(|range| !text[range.clone()].trim().is_empty());
    Ok(bounds)
}

/// Split a file's text into owned chunks tagged with the file identity
pub fn split(source: &str, text: &str, num_chunks: usize, mode: SplitMode) -> Result<Vec<TextChunk>> {
    let bounds = chunk_bounds(text, num_chunks, mode)?;

    Ok(bounds
        .into_iter()
        .enumerate()
        .map(|(index, range)| TextChunk {
            source: source.to_string(),
            index,
            offset: range.start,
            text: text[range].to_string(),
        })
        .collect())
}

/// Byte offset `count` characters after `start`, clamped to the end
fn advance_chars(text: &str, start: usize, count: usize) -> usize {
    text[start..]
        .char_indices()
        .nth(count)
        .map(|(offset, _)| start + offset)
        .unwrap_or(text.len())
}

/// Smallest position >= `idx` that does not sit between two non-whitespace chars
fn next_word_boundary(text: &str, idx: usize) -> usize {
    if idx == 0 || idx >= text.len() {
        return idx;
    }

    let prev_is_space = text[..idx]
        .chars()
        .next_back()
        .map(char::is_whitespace)
        .unwrap_or(true);
    if prev_is_space {
        return idx;
    }

    match text[idx..].find(char::is_whitespace) {
        Some(pos) => idx + pos,
        None => text.len(),
    }
}
