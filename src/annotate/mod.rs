//! Linguistic annotation
//!
//! The summarizer never tags text itself. It asks an [`Annotator`] for
//! tokens, part-of-speech tags and named-entity tags, one unit at a time,
//! through the [`AnnotatorAdapter`](adapter::AnnotatorAdapter), which
//! enforces the deadline and falls back to [`RegexAnnotator`] on failure.

pub mod adapter;
pub mod fallback;
pub mod rule_based;

use crate::errors::AnnotatorError;
use crate::types::{NerTag, PosTag};

pub use fallback::RegexAnnotator;
pub use adapter::{AnnotatedUnits, AnnotatorAdapter};
pub use rule_based::RuleBasedAnnotator;

/// Tokenization, POS tagging and NER for a single piece of text.
///
/// Implementations must be thread-safe: the adapter may call them from
/// rayon workers or from a watchdog thread.
pub trait Annotator: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Whether the annotator can serve requests right now.
    fn is_available(&self) -> bool {
        true
    }

    /// Raw tokens of `text`, in order.
    fn tokenize(&self, text: &str) -> Result<Vec<String>, AnnotatorError>;

    /// `(token, tag)` pairs for `text`.
    fn pos_tag(&self, text: &str) -> Result<Vec<(String, PosTag)>, AnnotatorError>;

    /// `(token, tag)` pairs for `text`; non-entities are [`NerTag::Outside`].
    fn ner_tag(&self, text: &str) -> Result<Vec<(String, NerTag)>, AnnotatorError>;
}
