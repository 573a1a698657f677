//! Summarizer configuration
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration:
//!
//! ```json
//! {
//!   "language": "vi",
//!   "selection": { "min_bullets": 3, "max_bullets": 12, "target_ratio": 0.3 },
//!   "graph": { "edge_threshold": 0.1 },
//!   "lexicons": { "action_cues": ["cần", "gửi", "nộp"] }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::Result;
use crate::pipeline::validation::{ValidationEngine, ValidationReport};

/// Top-level configuration for a [`Summarizer`](crate::Summarizer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Language code selecting the default stopwords and lexicons.
    pub language: String,
    pub selection: SelectionConfig,
    pub graph: GraphConfig,
    pub segmenter: SegmenterConfig,
    /// Size of the document keyphrase set.
    pub keyphrase_top_k: usize,
    pub weights: ScoringWeights,
    pub lexicons: LexiconOverrides,
    /// Per-unit deadline for the external annotator; `None` calls it inline.
    pub annotator_timeout_ms: Option<u64>,
    /// Annotate units and build similarity rows on the rayon pool.
    pub parallel: bool,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            language: "vi".to_string(),
            selection: SelectionConfig::default(),
            graph: GraphConfig::default(),
            segmenter: SegmenterConfig::default(),
            keyphrase_top_k: 25,
            weights: ScoringWeights::default(),
            lexicons: LexiconOverrides::default(),
            annotator_timeout_ms: Some(2000),
            parallel: true,
        }
    }
}

impl SummarizerConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Run every validation rule and collect the diagnostics.
    pub fn validate(&self) -> ValidationReport {
        ValidationEngine::with_defaults().validate(self)
    }

    /// Set the language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the annotator deadline (`None` disables it)
    pub fn with_annotator_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.annotator_timeout_ms = timeout.map(|t| t.as_millis() as u64);
        self
    }

    /// Enable or disable rayon fan-out
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn annotator_timeout(&self) -> Option<Duration> {
        self.annotator_timeout_ms.map(Duration::from_millis)
    }
}

/// Bullet count bounds and MMR parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub min_bullets: usize,
    pub max_bullets: usize,
    /// Fraction of the sentence count to select before clamping.
    pub target_ratio: f64,
    /// Weight of the normalized quality score; coverage gets `1 - lambda`.
    pub lambda: f64,
    /// Weight of the redundancy penalty.
    pub redundancy_penalty: f64,
    /// Candidates at or above this similarity to a picked unit are skipped.
    pub redundancy_cutoff: f64,
    /// Number of new keyphrases that saturates the coverage term.
    pub coverage_saturation: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            min_bullets: 3,
            max_bullets: 12,
            target_ratio: 0.30,
            lambda: 0.70,
            redundancy_penalty: 0.60,
            redundancy_cutoff: 0.85,
            coverage_saturation: 3.0,
        }
    }
}

impl SelectionConfig {
    /// `clamp(ceil(sentence_count * ratio), min, max)`
    pub fn target_count(&self, sentence_count: usize) -> usize {
        let raw = (sentence_count.max(1) as f64 * self.target_ratio).ceil() as usize;
        raw.max(self.min_bullets).min(self.max_bullets)
    }
}

/// Similarity graph and PageRank parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Minimum cosine similarity for an edge between two units.
    pub edge_threshold: f64,
    pub damping: f64,
    pub max_iterations: usize,
    pub convergence_threshold: f64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            edge_threshold: 0.10,
            damping: 0.85,
            max_iterations: 100,
            convergence_threshold: 1e-6,
        }
    }
}

/// Character-length thresholds used during segmentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// A single-sentence document shorter than this is returned verbatim.
    pub short_text_chars: usize,
    /// Chunks longer than this are re-split at discourse markers.
    pub max_unit_chars: usize,
    /// Chunks shorter than this are dropped as noise.
    pub min_unit_chars: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            short_text_chars: 120,
            max_unit_chars: 220,
            min_unit_chars: 20,
        }
    }
}

/// Weights of the scoring signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub topic: f64,
    pub conclusion: f64,
    pub doc_topic: f64,
    pub doc_conclusion: f64,
    pub cue: f64,
    pub action: f64,
    pub deadline: f64,
    pub keyphrase: f64,
    pub centroid: f64,
    pub centrality: f64,
    pub noun_phrase: f64,
    pub pos: f64,
    pub ner: f64,
    pub numeric: f64,
    pub length: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            topic: 0.9,
            conclusion: 0.7,
            doc_topic: 0.3,
            doc_conclusion: 0.3,
            cue: 0.7,
            action: 0.8,
            deadline: 0.7,
            keyphrase: 1.0,
            centroid: 1.0,
            centrality: 1.0,
            noun_phrase: 0.8,
            pos: 0.6,
            ner: 0.7,
            numeric: 0.6,
            length: 0.6,
        }
    }
}

impl ScoringWeights {
    /// Field name and value pairs, in declaration order.
    pub fn entries(&self) -> [(&'static str, f64); 15] {
        [
            ("topic", self.topic),
            ("conclusion", self.conclusion),
            ("doc_topic", self.doc_topic),
            ("doc_conclusion", self.doc_conclusion),
            ("cue", self.cue),
            ("action", self.action),
            ("deadline", self.deadline),
            ("keyphrase", self.keyphrase),
            ("centroid", self.centroid),
            ("centrality", self.centrality),
            ("noun_phrase", self.noun_phrase),
            ("pos", self.pos),
            ("ner", self.ner),
            ("numeric", self.numeric),
            ("length", self.length),
        ]
    }
}

/// Optional lexicon replacements. `None` keeps the language default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconOverrides {
    pub stopwords: Option<Vec<String>>,
    pub discourse_markers: Option<Vec<String>>,
    pub cue_phrases: Option<Vec<String>>,
    pub action_cues: Option<Vec<String>>,
    pub time_words: Option<Vec<String>>,
}

impl LexiconOverrides {
    /// True when every lexicon is supplied explicitly.
    pub fn is_complete(&self) -> bool {
        self.stopwords.is_some()
            && self.discourse_markers.is_some()
            && self.cue_phrases.is_some()
            && self.action_cues.is_some()
            && self.time_words.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let config = SummarizerConfig::from_json("{}").unwrap();
        assert_eq!(config, SummarizerConfig::default());
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config = SummarizerConfig::from_json(
            r#"{ "language": "en", "selection": { "max_bullets": 5 } }"#,
        )
        .unwrap();
        assert_eq!(config.language, "en");
        assert_eq!(config.selection.max_bullets, 5);
        assert_eq!(config.selection.min_bullets, 3);
        assert!((config.graph.damping - 0.85).abs() < 1e-12);
    }

    #[test]
    fn test_null_timeout_disables_deadline() {
        let config = SummarizerConfig::from_json(r#"{ "annotator_timeout_ms": null }"#).unwrap();
        assert_eq!(config.annotator_timeout(), None);
        assert_eq!(
            SummarizerConfig::default().annotator_timeout(),
            Some(Duration::from_millis(2000))
        );
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(SummarizerConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn test_target_count() {
        let selection = SelectionConfig::default();
        assert_eq!(selection.target_count(20), 6);
        assert_eq!(selection.target_count(3), 3);
        assert_eq!(selection.target_count(0), 3);
        assert_eq!(selection.target_count(100), 12);
        assert_eq!(selection.target_count(11), 4);
    }

    #[test]
    fn test_lexicon_overrides_completeness() {
        let mut lexicons = LexiconOverrides::default();
        assert!(!lexicons.is_complete());
        lexicons.stopwords = Some(vec![]);
        lexicons.discourse_markers = Some(vec![]);
        lexicons.cue_phrases = Some(vec![]);
        lexicons.action_cues = Some(vec![]);
        lexicons.time_words = Some(vec![]);
        assert!(lexicons.is_complete());
    }
}
