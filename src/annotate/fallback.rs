//! Regex fallback annotator
//!
//! Splits text into words and tags nothing: every token is `Other` and
//! outside any entity. Used whenever the configured annotator is
//! unavailable, fails, panics or misses its deadline.

use crate::errors::AnnotatorError;
use crate::nlp::tokenizer::Tokenizer;
use crate::types::{NerTag, PosTag};

use super::Annotator;

#[derive(Debug, Clone, Copy, Default)]
pub struct RegexAnnotator {
    tokenizer: Tokenizer,
}

impl RegexAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokens of `text`; never fails.
    pub fn words(&self, text: &str) -> Vec<String> {
        self.tokenizer.words(text)
    }
}

impl Annotator for RegexAnnotator {
    fn name(&self) -> &str {
        "regex"
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>, AnnotatorError> {
        Ok(self.words(text))
    }

    fn pos_tag(&self, text: &str) -> Result<Vec<(String, PosTag)>, AnnotatorError> {
        Ok(self
            .words(text)
            .into_iter()
            .map(|w| (w, PosTag::Other))
            .collect())
    }

    fn ner_tag(&self, text: &str) -> Result<Vec<(String, NerTag)>, AnnotatorError> {
        Ok(self
            .words(text)
            .into_iter()
            .map(|w| (w, NerTag::Outside))
            .collect())
    }
}
