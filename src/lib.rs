//! Ensemble extractive summarization
//!
//! Reduces a block of text to a handful of bullet points. The text is
//! normalized and cut into clause-level units, each unit is annotated,
//! vectorized with TF-IDF and ranked by TextRank centrality over the unit
//! similarity graph. Fifteen positional, lexical and linguistic signals are
//! combined into one score per unit, and an MMR selector picks units that
//! are good, cover new keyphrases and are not redundant with each other.
//!
//! ```rust
//! let result = ensemble_summarizer::summarize(
//!     "Doanh thu tăng 12,5% trong quý này. Tuy nhiên, chi phí cũng tăng theo. \
//!      Công ty cần xem xét lại kế hoạch.",
//! );
//! assert!(result.success);
//! assert_eq!(result.result.lines().count(), 3);
//! ```
//!
//! Linguistic annotation goes through the [`Annotator`] trait. The default
//! [`RuleBasedAnnotator`] runs in process; an external tagger can be
//! plugged in with [`Summarizer::with_annotator`]. Whatever the annotator
//! does, a failing unit falls back to regex tokenization and the request
//! still succeeds.

pub mod annotate;
pub mod config;
pub mod errors;
pub mod graph;
pub mod nlp;
pub mod pagerank;
pub mod phrase;
pub mod pipeline;
pub mod summarizer;
pub mod types;

pub use annotate::{Annotator, RegexAnnotator, RuleBasedAnnotator};
pub use config::{
    GraphConfig, LexiconOverrides, ScoringWeights, SegmenterConfig, SelectionConfig,
    SummarizerConfig,
};
pub use errors::{AnnotatorError, ErrorCode, Result, SummarizeError};
pub use pipeline::artifacts::{ShortCircuit, SummaryDebug, SummaryResult};
pub use pipeline::observer::{NoopObserver, PipelineObserver, StageTimingObserver};
pub use summarizer::selector::StopReason;
pub use summarizer::Summarizer;
pub use types::{NerTag, PosTag, ScoreRow, Sentence, SignalBreakdown, Unit};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Summarize `text` with the default configuration.
pub fn summarize(text: &str) -> SummaryResult {
    match Summarizer::new(SummarizerConfig::default()) {
        Ok(summarizer) => summarizer.summarize(text),
        Err(err) => SummaryResult::from(&err),
    }
}
