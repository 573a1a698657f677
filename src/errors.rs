//! Error types
//!
//! Only [`SummarizeError::EmptyText`] is an expected, user-facing failure.
//! Annotation problems, degenerate graphs and selection shortfalls are
//! recovered inside the pipeline and never surface here.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Stable, machine-readable failure codes reported in a `SummaryResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input was empty or whitespace-only after normalization.
    EmptyText,
    /// The configuration failed validation.
    InvalidConfig,
    /// Any other failure caught at the summarization boundary.
    InternalError,
}

impl ErrorCode {
    /// Returns the wire name of the code (e.g. `"EMPTY_TEXT"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyText => "EMPTY_TEXT",
            Self::InvalidConfig => "INVALID_CONFIG",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced while configuring or running the summarizer.
#[derive(Error, Debug)]
pub enum SummarizeError {
    /// The input text is empty after normalization.
    #[error("input text is empty")]
    EmptyText,

    /// The configuration failed one or more validation rules.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration JSON could not be parsed.
    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// An internal invariant was violated while running a stage.
    #[error("internal pipeline failure: {0}")]
    Internal(String),
}

impl SummarizeError {
    /// The code reported to callers for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyText => ErrorCode::EmptyText,
            Self::InvalidConfig(_) | Self::ConfigParse(_) => ErrorCode::InvalidConfig,
            Self::Internal(_) => ErrorCode::InternalError,
        }
    }
}

impl From<regex::Error> for SummarizeError {
    fn from(err: regex::Error) -> Self {
        SummarizeError::InvalidConfig(format!("lexicon pattern: {err}"))
    }
}

/// Result type alias for summarizer operations.
pub type Result<T> = std::result::Result<T, SummarizeError>;

/// Failures of an external [`Annotator`](crate::annotate::Annotator).
///
/// These are recovered by the adapter, which switches the affected unit to
/// the regex fallback.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnnotatorError {
    /// The annotator backend is not available at all.
    #[error("annotator unavailable: {0}")]
    Unavailable(String),

    /// The annotator rejected or failed on the input.
    #[error("annotation failed: {0}")]
    Failed(String),

    /// The annotator did not answer within the configured deadline.
    #[error("annotation timed out after {0:?}")]
    Timeout(Duration),

    /// The annotator panicked while processing the input.
    #[error("annotator panicked")]
    Panicked,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SummarizeError::EmptyText.code(), ErrorCode::EmptyText);
        assert_eq!(
            SummarizeError::InvalidConfig("x".into()).code(),
            ErrorCode::InvalidConfig
        );
        assert_eq!(
            SummarizeError::Internal("x".into()).code(),
            ErrorCode::InternalError
        );
    }

    #[test]
    fn test_error_code_wire_format() {
        let json = serde_json::to_string(&ErrorCode::EmptyText).unwrap();
        assert_eq!(json, "\"EMPTY_TEXT\"");
        assert_eq!(ErrorCode::InternalError.to_string(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_parse_error_maps_to_invalid_config() {
        let err: SummarizeError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(err.code(), ErrorCode::InvalidConfig);
    }
}
