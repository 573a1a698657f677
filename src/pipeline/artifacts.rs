//! Pipeline artifacts and the public result type.
//!
//! [`SummaryResult`] is the stability boundary: everything before it is
//! internal and may change. [`SummaryDebug`] exposes the intermediate
//! artifacts of one run for test and inspection tooling.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorCode, SummarizeError};
use crate::summarizer::selector::StopReason;
use crate::types::{ScoreRow, Sentence, Unit};

/// Why the pipeline skipped the ranking stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortCircuit {
    /// One sentence shorter than the short-text threshold
    ShortText,
    /// Segmentation or annotation left at most one unit
    SingleUnit,
}

/// Intermediate artifacts of one summarization run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryDebug {
    pub sentences: Vec<Sentence>,
    pub units: Vec<Unit>,
    pub keyphrases: Vec<String>,
    pub scores: Vec<ScoreRow>,
    /// Selected unit indexes in document order
    pub picked_unit_indexes: Vec<usize>,
    pub target: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<StopReason>,
    pub backfilled: Vec<usize>,
    /// Units annotated by the fallback tokenizer
    pub annotation_fallbacks: usize,
    pub graph_edges: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_circuit: Option<ShortCircuit>,
}

/// Outcome of a summarization call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub success: bool,
    /// Newline-joined bullets, the verbatim text of a trivial input, or the
    /// error code on failure
    pub result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<SummaryDebug>,
}

impl SummaryResult {
    pub fn ok(result: impl Into<String>) -> Self {
        Self {
            success: true,
            result: result.into(),
            error_code: None,
            debug: None,
        }
    }

    pub fn failure(code: ErrorCode) -> Self {
        Self {
            success: false,
            result: code.as_str().to_string(),
            error_code: Some(code),
            debug: None,
        }
    }

    pub fn with_debug(mut self, debug: Option<SummaryDebug>) -> Self {
        self.debug = debug;
        self
    }

    /// Rendered bullet lines (the single line of a short-circuited input).
    pub fn lines(&self) -> Vec<&str> {
        if !self.success || self.result.is_empty() {
            return Vec::new();
        }
        self.result.lines().collect()
    }
}

impl From<&SummarizeError> for SummaryResult {
    fn from(err: &SummarizeError) -> Self {
        Self::failure(err.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_serialization() {
        let result = SummaryResult::from(&SummarizeError::EmptyText);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["result"], "EMPTY_TEXT");
        assert_eq!(json["error_code"], "EMPTY_TEXT");
        assert!(json.get("debug").is_none());
    }

    #[test]
    fn test_success_omits_error_code() {
        let result = SummaryResult::ok("- một\n- hai");
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("error_code").is_none());
        assert_eq!(result.lines(), vec!["- một", "- hai"]);
    }

    #[test]
    fn test_debug_payload_names() {
        let debug = SummaryDebug {
            stop_reason: Some(StopReason::CandidatesExhausted),
            short_circuit: None,
            ..Default::default()
        };
        let json = serde_json::to_value(&debug).unwrap();
        assert_eq!(json["stop_reason"], "candidates_exhausted");
        assert!(json.get("short_circuit").is_none());
        assert!(json["picked_unit_indexes"].as_array().unwrap().is_empty());

        let json = serde_json::to_value(ShortCircuit::SingleUnit).unwrap();
        assert_eq!(json, "single_unit");
    }
}
