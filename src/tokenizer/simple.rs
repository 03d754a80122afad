//! Minimal tokenizer: whitespace split plus alphabetic filter

use super::Tokenizer;

/// Punctuation stripped from both ends of each whitespace-separated word
pub const STRIP_CHARS: &[char] = &[
    '.', ',', '!', '?', ';', ':', '"', '\'', '(', ')', '[', ']', '{', '}',
];

/// Lowercases, splits on whitespace, strips surrounding punctuation and keeps
/// only words made entirely of alphabetic characters
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleTokenizer;

impl Tokenizer for SimpleTokenizer {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();

        lowered
            .split_whitespace()
            .map(|word| word.trim_matches(STRIP_CHARS))
            .filter(|word| !word.is_empty() && word.chars().all(char::is_alphabetic))
            .map(str::to_string)
            .collect()
    }
}
