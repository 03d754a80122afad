//! Linguistic tokenizer: word segmentation, stopword removal, Snowball stemming

use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

use super::Tokenizer;
use crate::config::Language;

/// Snowball algorithm for a configured language
pub fn stemmer_algorithm(language: Language) -> Algorithm {
    match language {
        Language::English => Algorithm::English,
        Language::French => Algorithm::French,
        Language::German => Algorithm::German,
        Language::Spanish => Algorithm::Spanish,
        Language::Italian => Algorithm::Italian,
        Language::Portuguese => Algorithm::Portuguese,
        Language::Romanian => Algorithm::Romanian,
    }
}

/// Lowercases, segments on Unicode word boundaries, keeps purely alphabetic
/// words that are not stopwords and reduces them to their stem
pub struct LinguisticTokenizer {
    language: Language,
    stemmer: Stemmer,
    stopwords: HashSet<String>,
}

impl std::fmt::Debug for LinguisticTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinguisticTokenizer")
            .field("language", &self.language)
            .field("stopwords", &self.stopwords.len())
            .finish()
    }
}

impl LinguisticTokenizer {
    pub fn new(language: Language, stopwords: HashSet<String>) -> Self {
        Self {
            language,
            stemmer: Stemmer::create(stemmer_algorithm(language)),
            stopwords,
        }
    }

    /// English tokenizer with the built-in stopword list
    pub fn english() -> Self {
        Self::new(Language::English, super::stopwords::builtin(Language::English))
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Stem a single lowercase word
    pub fn stem(&self, word: &str) -> String {
        self.stemmer.stem(word).into_owned()
    }
}

impl Tokenizer for LinguisticTokenizer {
    fn name(&self) -> &'static str {
        "linguistic"
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();

        lowered
            .unicode_words()
            .filter(|word| word.chars().all(char::is_alphabetic))
            .filter(|word| !self.stopwords.contains(*word))
            .map(|word| self.stemmer.stem(word).into_owned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwords_removed_and_stemmed() {
        let tokenizer = LinguisticTokenizer::english();
        let tokens = tokenizer.tokenize("The quick brown foxes are running!");
        assert_eq!(tokens, vec!["quick", "brown", "fox", "run"]);
    }

    #[test]
    fn test_non_alphabetic_words_dropped() {
        let tokenizer = LinguisticTokenizer::english();
        let tokens = tokenizer.tokenize("jumped 1999 times over r2d2");
        assert_eq!(tokens, vec!["jump", "time"]);
    }

    #[test]
    fn test_empty_stopword_set_keeps_everything() {
        let tokenizer = LinguisticTokenizer::new(Language::English, HashSet::new());
        let tokens = tokenizer.tokenize("the cats");
        assert_eq!(tokens, vec!["the", "cat"]);
    }

    #[test]
    fn test_stem_helper() {
        let tokenizer = LinguisticTokenizer::english();
        assert_eq!(tokenizer.stem("jumped"), "jump");
        assert!(tokenizer.is_stopword("the"));
        assert_eq!(tokenizer.language(), Language::English);
    }
}
