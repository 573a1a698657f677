//! Summarization components
//!
//! Provides extractive summarization: TF-IDF unit vectors, multi-criterion
//! scoring, MMR (Maximal Marginal Relevance) selection of diverse, relevant
//! units and bullet rendering, behind the [`Summarizer`] facade.

pub mod bullets;
pub mod scorer;
pub mod selector;
pub mod tfidf;
pub mod unit_vector;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use crate::annotate::{Annotator, RuleBasedAnnotator};
use crate::config::SummarizerConfig;
use crate::errors::{Result, SummarizeError};
use crate::pipeline::artifacts::SummaryResult;
use crate::pipeline::observer::{NoopObserver, PipelineObserver};
use crate::pipeline::runner::{Pipeline, PipelineOutput};

/// Turns text into a short bullet list.
///
/// A `Summarizer` holds only the compiled configuration and the annotator;
/// it can be shared between threads and every call is independent.
///
/// ```rust
/// use ensemble_summarizer::{Summarizer, SummarizerConfig};
///
/// let summarizer = Summarizer::new(SummarizerConfig::default()).unwrap();
/// let result = summarizer.summarize("Hôm nay trời đẹp.");
/// assert!(result.success);
/// assert_eq!(result.result, "Hôm nay trời đẹp.");
/// ```
#[derive(Debug, Clone)]
pub struct Summarizer {
    config: SummarizerConfig,
    pipeline: Pipeline,
}

impl Summarizer {
    /// Summarizer using the built-in [`RuleBasedAnnotator`] for the
    /// configured language.
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        let annotator = RuleBasedAnnotator::new(&config.language);
        Self::with_annotator(config, Arc::new(annotator))
    }

    /// Summarizer calling `annotator` for tokens and tags.
    ///
    /// Fails with [`SummarizeError::InvalidConfig`] listing every validation
    /// error; warnings are only logged.
    pub fn with_annotator(config: SummarizerConfig, annotator: Arc<dyn Annotator>) -> Result<Self> {
        let report = config.validate();

        #[cfg(feature = "tracing")]
        for warning in report.warnings() {
            tracing::warn!(path = %warning.path, "{}", warning.message);
        }

        if report.has_errors() {
            return Err(SummarizeError::InvalidConfig(report.error_summary()));
        }

        let pipeline = Pipeline::from_config(&config, annotator)?;
        Ok(Self { config, pipeline })
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    pub fn summarize(&self, text: &str) -> SummaryResult {
        self.summarize_observed(text, false, &mut NoopObserver)
    }

    /// Like [`summarize`](Self::summarize), with the intermediate artifacts
    /// attached to the result.
    pub fn summarize_debug(&self, text: &str) -> SummaryResult {
        self.summarize_observed(text, true, &mut NoopObserver)
    }

    /// Run the pipeline with `observer` notified at every stage boundary.
    ///
    /// Errors and panics inside the pipeline become a failure result.
    pub fn summarize_observed(
        &self,
        text: &str,
        debug: bool,
        observer: &mut impl PipelineObserver,
    ) -> SummaryResult {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.pipeline.run(text, debug, observer)
        }));
        settle(outcome)
    }
}

/// Turn a caught pipeline outcome into the caller-facing result.
fn settle(outcome: thread::Result<Result<PipelineOutput>>) -> SummaryResult {
    let err = match outcome {
        Ok(Ok(output)) => return SummaryResult::ok(output.text).with_debug(output.debug),
        Ok(Err(err)) => err,
        Err(payload) => SummarizeError::Internal(panic_message(payload.as_ref())),
    };

    #[cfg(feature = "tracing")]
    if matches!(err, SummarizeError::EmptyText) {
        tracing::debug!("empty input");
    } else {
        tracing::warn!(error = %err, "summarization failed");
    }

    SummaryResult::from(&err)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "pipeline panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{AnnotatorError, ErrorCode};
    use crate::types::{NerTag, PosTag};

    struct Exploding;

    impl Annotator for Exploding {
        fn name(&self) -> &str {
            "exploding"
        }
        fn tokenize(&self, _text: &str) -> std::result::Result<Vec<String>, AnnotatorError> {
            panic!("model crashed")
        }
        fn pos_tag(&self, _text: &str) -> std::result::Result<Vec<(String, PosTag)>, AnnotatorError> {
            panic!("model crashed")
        }
        fn ner_tag(&self, _text: &str) -> std::result::Result<Vec<(String, NerTag)>, AnnotatorError> {
            panic!("model crashed")
        }
    }

    #[test]
    fn test_invalid_config_lists_every_error() {
        let mut config = SummarizerConfig::default();
        config.selection.lambda = 2.0;
        config.graph.damping = 0.0;

        let err = Summarizer::new(config).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidConfig);
        let message = err.to_string();
        assert!(message.contains("/selection/lambda"));
        assert!(message.contains("/graph/damping"));
    }

    #[test]
    fn test_empty_text() {
        let summarizer = Summarizer::new(SummarizerConfig::default()).unwrap();
        for text in ["", "   \n\t  "] {
            let result = summarizer.summarize(text);
            assert!(!result.success);
            assert_eq!(result.error_code, Some(ErrorCode::EmptyText));
            assert_eq!(result.result, "EMPTY_TEXT");
        }
    }

    #[test]
    fn test_panicking_annotator_degrades() {
        let config = SummarizerConfig::default()
            .with_annotator_timeout(None)
            .with_parallel(false);
        let summarizer = Summarizer::with_annotator(config, Arc::new(Exploding)).unwrap();

        let result = summarizer.summarize_debug(
            "Doanh thu tăng 12,5% trong quý này. Tuy nhiên, chi phí cũng tăng theo. \
             Công ty cần xem xét lại kế hoạch.",
        );
        assert!(result.success);
        assert_eq!(result.lines().len(), 3);
        assert_eq!(result.debug.unwrap().annotation_fallbacks, 3);
    }

    #[test]
    fn test_pipeline_panic_becomes_internal_error() {
        let outcome = panic::catch_unwind(|| -> Result<PipelineOutput> {
            panic!("similarity row out of bounds")
        });
        let result = settle(outcome);

        assert!(!result.success);
        assert_eq!(result.error_code, Some(ErrorCode::InternalError));
        assert_eq!(result.result, "INTERNAL_ERROR");
    }

    #[test]
    fn test_panic_message_extraction() {
        let err = panic::catch_unwind(|| panic!("index {} out of range", 7)).unwrap_err();
        assert_eq!(panic_message(err.as_ref()), "index 7 out of range");

        let err = panic::catch_unwind(|| std::panic::panic_any(42_u8)).unwrap_err();
        assert_eq!(panic_message(err.as_ref()), "pipeline panicked");

        let internal = SummarizeError::Internal(panic_message(&"boom"));
        assert_eq!(internal.code(), ErrorCode::InternalError);
        assert_eq!(internal.to_string(), "internal pipeline failure: boom");
    }

    #[test]
    fn test_summarizer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Summarizer>();
    }
}
