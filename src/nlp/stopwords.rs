//! Stopword filtering
//!
//! This module provides multi-language stopword filtering using the `stop-words` crate,
//! a built-in Vietnamese list, and support for custom stopword lists.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

use super::tokenizer::{char_len, is_numeric_token};

/// A filter for removing stopwords from token streams
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Set of stopwords (lowercase)
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::new("vi")
    }
}

impl StopwordFilter {
    /// Create a new stopword filter for the given language
    ///
    /// Supported languages: vi, en, de, fr, es, it, pt, nl, ru
    pub fn new(language: &str) -> Self {
        Self {
            stopwords: Self::load_stopwords(language),
        }
    }

    /// Create a stopword filter from a custom list
    pub fn from_list<S: AsRef<str>>(words: &[S]) -> Self {
        let stopwords = words
            .iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { stopwords }
    }

    /// Check if a word is in the list (case-insensitive)
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }

    /// Decide whether a normalized token is dropped from a unit's token list.
    ///
    /// Numeric and percentage tokens are always kept, even when listed or
    /// one character long. Other tokens are dropped when listed or shorter
    /// than two characters.
    pub fn is_stop_token(&self, token: &str) -> bool {
        if token.is_empty() {
            return true;
        }
        if is_numeric_token(token) {
            return false;
        }
        self.is_stopword(token) || char_len(token) < 2
    }

    /// Get the number of stopwords in the filter
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Check if the filter is empty
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    /// Load stopwords for a language
    fn load_stopwords(language: &str) -> FxHashSet<String> {
        let lang = match language.to_lowercase().as_str() {
            "vi" | "vietnamese" => return Self::vietnamese_stopwords(),
            "en" | "english" => LANGUAGE::English,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            "ru" | "russian" => LANGUAGE::Russian,
            // Unknown languages get the English list
            _ => LANGUAGE::English,
        };

        get(lang).iter().map(|s| s.to_string()).collect()
    }

    /// Common Vietnamese function words
    fn vietnamese_stopwords() -> FxHashSet<String> {
        [
            "và", "hoặc", "nhưng", "trong", "trên", "tại", "đến", "cho", "của", "với", "bởi",
            "từ", "là", "đã", "đang", "sẽ", "có", "không", "một", "những", "các", "này", "đó",
            "vậy", "thì", "khi", "nếu", "vì", "do", "rằng", "được", "nên", "cũng", "như", "vừa",
            "rất", "hơn", "kém", "nữa", "ra", "vào", "để", "nhằm", "theo", "lên", "xuống",
            "giữa", "vẫn", "còn", "lại", "đều", "sau", "trước",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
}

/// Whether a built-in stopword list exists for `language`.
pub fn is_supported_language(language: &str) -> bool {
    matches!(
        language.to_lowercase().as_str(),
        "vi" | "vietnamese"
            | "en"
            | "english"
            | "de"
            | "german"
            | "fr"
            | "french"
            | "es"
            | "spanish"
            | "it"
            | "italian"
            | "pt"
            | "portuguese"
            | "nl"
            | "dutch"
            | "ru"
            | "russian"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vietnamese_stopwords() {
        let filter = StopwordFilter::new("vi");

        assert!(filter.is_stopword("và"));
        assert!(filter.is_stopword("Của")); // case insensitive
        assert!(!filter.is_stopword("doanh"));
    }

    #[test]
    fn test_english_stopwords() {
        let filter = StopwordFilter::new("en");

        assert!(filter.is_stopword("the"));
        assert!(filter.is_stopword("The"));
        assert!(!filter.is_stopword("revenue"));
    }

    #[test]
    fn test_custom_stopwords() {
        let filter = StopwordFilter::from_list(&["Custom", "words", " "]);

        assert!(filter.is_stopword("custom"));
        assert!(filter.is_stopword("words"));
        assert!(!filter.is_stopword("the"));
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn test_stop_token_rules() {
        let filter = StopwordFilter::new("vi");

        assert!(filter.is_stop_token(""));
        assert!(filter.is_stop_token("và"));
        assert!(filter.is_stop_token("x")); // too short
        assert!(!filter.is_stop_token("5")); // short but numeric
        assert!(!filter.is_stop_token("3,62%"));
        assert!(!filter.is_stop_token("doanh"));
    }

    #[test]
    fn test_numeric_beats_stopword_list() {
        let filter = StopwordFilter::from_list(&["10", "năm"]);

        assert!(!filter.is_stop_token("10"));
        assert!(filter.is_stop_token("năm"));
    }

    #[test]
    fn test_supported_languages() {
        assert!(is_supported_language("vi"));
        assert!(is_supported_language("English"));
        assert!(!is_supported_language("tlh"));
    }
}
