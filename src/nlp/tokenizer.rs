//! Regex tokenization
//!
//! Two token shapes are produced here: surface words for annotation (numbers
//! with decimal commas and percent signs stay whole), and the `\w\w+` terms
//! the TF-IDF analyzer indexes.

use once_cell::sync::Lazy;
use regex::Regex;

static WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+(?:[.,]\d+)*%?|[\p{L}\p{M}\p{N}_]+(?:-[\p{L}\p{M}\p{N}_]+)*").unwrap()
});

static NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(?:[.,]\d+)?%?$").unwrap());

static TERM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Unicode-aware regex tokenizer
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Split text into surface words, dropping punctuation.
    ///
    /// `"Doanh thu tăng 12,5%."` becomes `["Doanh", "thu", "tăng", "12,5%"]`.
    pub fn words(&self, text: &str) -> Vec<String> {
        WORD.find_iter(text).map(|m| m.as_str().to_string()).collect()
    }

    /// Lowercased terms of two or more word characters, as indexed by TF-IDF.
    pub fn terms(&self, text: &str) -> Vec<String> {
        TERM.find_iter(&text.to_lowercase())
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Integer, decimal (`3,62`, `3.62`) or percentage (`12%`, `12,5%`) token.
pub fn is_numeric_token(token: &str) -> bool {
    NUMERIC.is_match(token)
}

/// Length in Unicode scalar values.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_keep_decimal_numbers() {
        let words = Tokenizer.words("Doanh thu tăng 12,5% trong quý này.");
        assert_eq!(words, vec!["Doanh", "thu", "tăng", "12,5%", "trong", "quý", "này"]);
    }

    #[test]
    fn test_words_keep_hyphenated_names() {
        let words = Tokenizer.words("Chỉ số VN-Index giảm 3.62 điểm, blue-chips đi ngang.");
        assert!(words.contains(&"VN-Index".to_string()));
        assert!(words.contains(&"3.62".to_string()));
        assert!(words.contains(&"blue-chips".to_string()));
        assert!(!words.iter().any(|w| w == ","));
    }

    #[test]
    fn test_terms_drop_single_characters() {
        let terms = Tokenizer.terms("doanh thu 12,5% a quý");
        assert_eq!(terms, vec!["doanh", "thu", "12", "quý"]);
    }

    #[test]
    fn test_numeric_tokens() {
        assert!(is_numeric_token("3,62"));
        assert!(is_numeric_token("12%"));
        assert!(is_numeric_token("7"));
        assert!(is_numeric_token("0.5%"));
        assert!(!is_numeric_token("v2"));
        assert!(!is_numeric_token("%"));
    }

    #[test]
    fn test_char_len_counts_scalars() {
        assert_eq!(char_len("đẹp"), 3);
        assert_eq!("đẹp".len(), 6);
    }
}
