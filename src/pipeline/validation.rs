//! Validation engine for summarizer configurations.
//!
//! The engine runs all registered [`ValidationRule`]s against a
//! [`SummarizerConfig`] and collects every diagnostic into a
//! [`ValidationReport`]. It never short-circuits on the first error,
//! so users see all problems at once.
//!
//! # Quick start
//!
//! ```rust
//! use ensemble_summarizer::pipeline::validation::ValidationEngine;
//! use ensemble_summarizer::SummarizerConfig;
//!
//! let report = ValidationEngine::with_defaults().validate(&SummarizerConfig::default());
//! assert!(report.is_valid());
//! ```

use serde::Serialize;

use crate::config::SummarizerConfig;
use crate::nlp::stopwords::is_supported_language;

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Issue ──────────────────────────────────────────────────────────────────

/// One problem with a configuration, located by a JSON pointer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigIssue {
    /// JSON pointer to the offending field, e.g. `/selection/lambda`
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ConfigIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " ({hint})")?;
        }
        Ok(())
    }
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single validation finding: an issue with its severity.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub issue: ConfigIssue,
}

impl ValidationDiagnostic {
    pub fn error(issue: ConfigIssue) -> Self {
        Self {
            severity: Severity::Error,
            issue,
        }
    }

    pub fn warning(issue: ConfigIssue) -> Self {
        Self {
            severity: Severity::Warning,
            issue,
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    /// Iterate over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &ConfigIssue> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.issue)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &ConfigIssue> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.issue)
    }

    /// Returns `true` if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// Total number of diagnostics (errors + warnings).
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns `true` if there are no diagnostics at all.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// All errors on one line, `; `-separated.
    pub fn error_summary(&self) -> String {
        self.errors()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects a [`SummarizerConfig`] and returns
/// zero or more diagnostics.
///
/// Rules are stateless and must be `Send + Sync` so they can be shared
/// across threads.
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"bullet_bounds"`).
    fn name(&self) -> &str;

    /// Inspect `config` and return any findings.
    fn validate(&self, config: &SummarizerConfig) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s against a [`SummarizerConfig`] and
/// collects all diagnostics into a [`ValidationReport`].
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Create an empty engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create an engine pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(BulletBoundsRule));
        engine.add_rule(Box::new(SelectionParamsRule));
        engine.add_rule(Box::new(GraphParamsRule));
        engine.add_rule(Box::new(ScoringWeightsRule));
        engine.add_rule(Box::new(SegmenterLengthsRule));
        engine.add_rule(Box::new(KeyphraseCountRule));
        engine.add_rule(Box::new(AnnotatorTimeoutRule));
        engine.add_rule(Box::new(LanguageRule));
        engine
    }

    /// Register an additional rule.
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Names of the registered rules, in run order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run all rules against `config` and return the collected report.
    pub fn validate(&self, config: &SummarizerConfig) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(config));
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Error diagnostic unless `ok`.
fn check(ok: bool, path: &str, message: String, hint: &str) -> Option<ValidationDiagnostic> {
    if ok {
        None
    } else {
        Some(ValidationDiagnostic::error(
            ConfigIssue::new(path, message).with_hint(hint),
        ))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. 1 <= min_bullets <= max_bullets ─────────────────────────────────────

struct BulletBoundsRule;

impl ValidationRule for BulletBoundsRule {
    fn name(&self) -> &str {
        "bullet_bounds"
    }

    fn validate(&self, config: &SummarizerConfig) -> Vec<ValidationDiagnostic> {
        let s = &config.selection;
        [
            check(
                s.min_bullets >= 1,
                "/selection/min_bullets",
                "min_bullets must be at least 1".to_string(),
                "Set min_bullets to a positive value",
            ),
            check(
                s.min_bullets <= s.max_bullets,
                "/selection/max_bullets",
                format!(
                    "max_bullets ({}) is smaller than min_bullets ({})",
                    s.max_bullets, s.min_bullets
                ),
                "Raise max_bullets or lower min_bullets",
            ),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

// ─── 2. MMR parameters ──────────────────────────────────────────────────────

struct SelectionParamsRule;

impl ValidationRule for SelectionParamsRule {
    fn name(&self) -> &str {
        "selection_params"
    }

    fn validate(&self, config: &SummarizerConfig) -> Vec<ValidationDiagnostic> {
        let s = &config.selection;
        [
            check(
                s.target_ratio > 0.0 && s.target_ratio <= 1.0,
                "/selection/target_ratio",
                format!("target_ratio must be in (0, 1], got {}", s.target_ratio),
                "The default is 0.3",
            ),
            check(
                (0.0..=1.0).contains(&s.lambda),
                "/selection/lambda",
                format!("lambda must be in [0, 1], got {}", s.lambda),
                "The default is 0.7",
            ),
            check(
                s.redundancy_penalty.is_finite() && s.redundancy_penalty >= 0.0,
                "/selection/redundancy_penalty",
                format!(
                    "redundancy_penalty must be a non-negative number, got {}",
                    s.redundancy_penalty
                ),
                "The default is 0.6",
            ),
            check(
                s.redundancy_cutoff > 0.0 && s.redundancy_cutoff <= 1.0,
                "/selection/redundancy_cutoff",
                format!(
                    "redundancy_cutoff must be in (0, 1], got {}",
                    s.redundancy_cutoff
                ),
                "The default is 0.85",
            ),
            check(
                s.coverage_saturation.is_finite() && s.coverage_saturation > 0.0,
                "/selection/coverage_saturation",
                format!(
                    "coverage_saturation must be positive, got {}",
                    s.coverage_saturation
                ),
                "The default is 3",
            ),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

// ─── 3. Graph and PageRank parameters ───────────────────────────────────────

struct GraphParamsRule;

impl ValidationRule for GraphParamsRule {
    fn name(&self) -> &str {
        "graph_params"
    }

    fn validate(&self, config: &SummarizerConfig) -> Vec<ValidationDiagnostic> {
        let g = &config.graph;
        [
            check(
                (0.0..=1.0).contains(&g.edge_threshold),
                "/graph/edge_threshold",
                format!("edge_threshold must be in [0, 1], got {}", g.edge_threshold),
                "The default is 0.1",
            ),
            check(
                g.damping > 0.0 && g.damping < 1.0,
                "/graph/damping",
                format!("damping must be in (0, 1), got {}", g.damping),
                "The default is 0.85",
            ),
            check(
                g.max_iterations > 0,
                "/graph/max_iterations",
                "max_iterations must be greater than 0".to_string(),
                "The default is 100",
            ),
            check(
                g.convergence_threshold.is_finite() && g.convergence_threshold > 0.0,
                "/graph/convergence_threshold",
                format!(
                    "convergence_threshold must be positive, got {}",
                    g.convergence_threshold
                ),
                "The default is 1e-6",
            ),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

// ─── 4. Signal weights ──────────────────────────────────────────────────────

struct ScoringWeightsRule;

impl ValidationRule for ScoringWeightsRule {
    fn name(&self) -> &str {
        "scoring_weights"
    }

    fn validate(&self, config: &SummarizerConfig) -> Vec<ValidationDiagnostic> {
        let entries = config.weights.entries();
        let mut out: Vec<ValidationDiagnostic> = entries
            .iter()
            .filter(|(_, w)| !(w.is_finite() && *w >= 0.0))
            .map(|(name, w)| {
                ValidationDiagnostic::error(
                    ConfigIssue::new(
                        format!("/weights/{name}"),
                        format!("weight {name} must be a non-negative number, got {w}"),
                    )
                    .with_hint("Use 0 to disable a signal"),
                )
            })
            .collect();

        if out.is_empty() && entries.iter().all(|(_, w)| *w == 0.0) {
            out.push(ValidationDiagnostic::warning(
                ConfigIssue::new("/weights", "every signal weight is 0")
                    .with_hint("Selection will fall back to keyphrase coverage and document order"),
            ));
        }
        out
    }
}

// ─── 5. Segmenter lengths ───────────────────────────────────────────────────

struct SegmenterLengthsRule;

impl ValidationRule for SegmenterLengthsRule {
    fn name(&self) -> &str {
        "segmenter_lengths"
    }

    fn validate(&self, config: &SummarizerConfig) -> Vec<ValidationDiagnostic> {
        let s = &config.segmenter;
        check(
            s.min_unit_chars < s.max_unit_chars,
            "/segmenter/min_unit_chars",
            format!(
                "min_unit_chars ({}) must be smaller than max_unit_chars ({})",
                s.min_unit_chars, s.max_unit_chars
            ),
            "The defaults are 20 and 220",
        )
        .into_iter()
        .collect()
    }
}

// ─── 6. Keyphrase count ─────────────────────────────────────────────────────

struct KeyphraseCountRule;

impl ValidationRule for KeyphraseCountRule {
    fn name(&self) -> &str {
        "keyphrase_top_k"
    }

    fn validate(&self, config: &SummarizerConfig) -> Vec<ValidationDiagnostic> {
        check(
            config.keyphrase_top_k > 0,
            "/keyphrase_top_k",
            "keyphrase_top_k must be greater than 0".to_string(),
            "The default is 25",
        )
        .into_iter()
        .collect()
    }
}

// ─── 7. Annotator deadline must be positive when set ────────────────────────

struct AnnotatorTimeoutRule;

impl ValidationRule for AnnotatorTimeoutRule {
    fn name(&self) -> &str {
        "annotator_timeout"
    }

    fn validate(&self, config: &SummarizerConfig) -> Vec<ValidationDiagnostic> {
        check(
            config.annotator_timeout_ms != Some(0),
            "/annotator_timeout_ms",
            "annotator_timeout_ms must be greater than 0".to_string(),
            "Use null to call the annotator without a deadline",
        )
        .into_iter()
        .collect()
    }
}

// ─── 8. Unknown language without explicit lexicons (warning) ────────────────

struct LanguageRule;

impl ValidationRule for LanguageRule {
    fn name(&self) -> &str {
        "language"
    }

    fn validate(&self, config: &SummarizerConfig) -> Vec<ValidationDiagnostic> {
        if is_supported_language(&config.language) || config.lexicons.is_complete() {
            return vec![];
        }
        vec![ValidationDiagnostic::warning(
            ConfigIssue::new(
                "/language",
                format!(
                    "no built-in stopwords for language \"{}\"",
                    config.language
                ),
            )
            .with_hint("Provide every list under /lexicons, or use a supported language code"),
        )]
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: build a config from JSON.
    fn config(json: &str) -> SummarizerConfig {
        SummarizerConfig::from_json(json).unwrap()
    }

    fn engine() -> ValidationEngine {
        ValidationEngine::with_defaults()
    }

    // ─── Valid configs ──────────────────────────────────────────────────

    #[test]
    fn test_default_config_is_valid() {
        let report = engine().validate(&SummarizerConfig::default());
        assert!(report.is_valid());
        assert!(report.is_empty());
    }

    #[test]
    fn test_english_config_is_valid() {
        let report = engine().validate(&config(r#"{ "language": "en" }"#));
        assert!(report.is_empty());
    }

    #[test]
    fn test_null_timeout_is_valid() {
        let report = engine().validate(&config(r#"{ "annotator_timeout_ms": null }"#));
        assert!(report.is_valid());
    }

    // ─── Rule: bullet_bounds ────────────────────────────────────────────

    #[test]
    fn test_min_above_max_fails() {
        let report = engine().validate(&config(
            r#"{ "selection": { "min_bullets": 5, "max_bullets": 2 } }"#,
        ));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].path, "/selection/max_bullets");
    }

    #[test]
    fn test_zero_min_bullets_fails() {
        let report = engine().validate(&config(r#"{ "selection": { "min_bullets": 0 } }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].path, "/selection/min_bullets");
    }

    // ─── Rule: selection_params ─────────────────────────────────────────

    #[test]
    fn test_selection_ranges() {
        let report = engine().validate(&config(
            r#"{ "selection": {
                "target_ratio": 0.0,
                "lambda": 1.5,
                "redundancy_penalty": -1.0,
                "redundancy_cutoff": 0.0,
                "coverage_saturation": 0.0
            } }"#,
        ));
        let paths: Vec<_> = report.errors().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "/selection/target_ratio",
                "/selection/lambda",
                "/selection/redundancy_penalty",
                "/selection/redundancy_cutoff",
                "/selection/coverage_saturation",
            ]
        );
    }

    #[test]
    fn test_ratio_of_one_is_valid() {
        let report = engine().validate(&config(r#"{ "selection": { "target_ratio": 1.0 } }"#));
        assert!(report.is_valid());
    }

    // ─── Rule: graph_params ─────────────────────────────────────────────

    #[test]
    fn test_graph_ranges() {
        let report = engine().validate(&config(
            r#"{ "graph": { "edge_threshold": 1.2, "damping": 1.0, "max_iterations": 0 } }"#,
        ));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 3);
        assert!(errs.iter().all(|e| e.path.starts_with("/graph/")));
    }

    // ─── Rule: scoring_weights ──────────────────────────────────────────

    #[test]
    fn test_negative_weight_fails() {
        let report = engine().validate(&config(r#"{ "weights": { "centrality": -0.5 } }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].path, "/weights/centrality");
    }

    #[test]
    fn test_all_zero_weights_warns() {
        let mut cfg = SummarizerConfig::default();
        cfg.weights = serde_json::from_str(
            r#"{ "topic": 0, "conclusion": 0, "doc_topic": 0, "doc_conclusion": 0,
                 "cue": 0, "action": 0, "deadline": 0, "keyphrase": 0, "centroid": 0,
                 "centrality": 0, "noun_phrase": 0, "pos": 0, "ner": 0, "numeric": 0,
                 "length": 0 }"#,
        )
        .unwrap();
        let report = engine().validate(&cfg);
        assert!(report.is_valid());
        assert_eq!(report.warnings().count(), 1);
    }

    // ─── Rule: segmenter_lengths / keyphrase_top_k / annotator_timeout ──

    #[test]
    fn test_segmenter_lengths() {
        let report = engine().validate(&config(
            r#"{ "segmenter": { "min_unit_chars": 300, "max_unit_chars": 200 } }"#,
        ));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].path, "/segmenter/min_unit_chars");
    }

    #[test]
    fn test_zero_top_k_and_timeout_fail() {
        let report = engine().validate(&config(
            r#"{ "keyphrase_top_k": 0, "annotator_timeout_ms": 0 }"#,
        ));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 2);
    }

    // ─── Rule: language ─────────────────────────────────────────────────

    #[test]
    fn test_unknown_language_warns() {
        let report = engine().validate(&config(r#"{ "language": "tlh" }"#));
        assert!(report.is_valid());
        let warns: Vec<_> = report.warnings().collect();
        assert_eq!(warns.len(), 1);
        assert_eq!(warns[0].path, "/language");
    }

    #[test]
    fn test_unknown_language_with_full_lexicons_is_clean() {
        let report = engine().validate(&config(
            r#"{
                "language": "tlh",
                "lexicons": {
                    "stopwords": ["ghaH"],
                    "discourse_markers": [],
                    "cue_phrases": [],
                    "action_cues": [],
                    "time_words": []
                }
            }"#,
        ));
        assert!(report.is_empty());
    }

    // ─── Report helpers ─────────────────────────────────────────────────

    #[test]
    fn test_multiple_rules_fire_independently() {
        let report = engine().validate(&config(
            r#"{
                "language": "tlh",
                "selection": { "min_bullets": 0 },
                "graph": { "damping": 0.0 },
                "keyphrase_top_k": 0
            }"#,
        ));
        assert_eq!(report.errors().count(), 3);
        assert_eq!(report.warnings().count(), 1);
        assert_eq!(report.len(), 4);
        assert_eq!(report.error_summary().matches("; ").count(), 2);
    }

    #[test]
    fn test_custom_rule() {
        struct AlwaysWarnRule;
        impl ValidationRule for AlwaysWarnRule {
            fn name(&self) -> &str {
                "always_warn"
            }
            fn validate(&self, _config: &SummarizerConfig) -> Vec<ValidationDiagnostic> {
                vec![ValidationDiagnostic::warning(ConfigIssue::new("", "custom warning"))]
            }
        }

        let mut eng = ValidationEngine::new();
        eng.add_rule(Box::new(AlwaysWarnRule));
        let report = eng.validate(&SummarizerConfig::default());
        assert!(report.is_valid()); // warnings only
        assert_eq!(report.warnings().count(), 1);
        assert_eq!(eng.rule_names(), vec!["always_warn"]);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = engine().validate(&config(r#"{ "keyphrase_top_k": 0 }"#));
        let json = serde_json::to_value(&report).unwrap();
        let diags = json["diagnostics"].as_array().unwrap();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0]["severity"], "error");
        assert_eq!(diags[0]["path"], "/keyphrase_top_k");
    }
}
