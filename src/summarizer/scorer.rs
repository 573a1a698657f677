//! Multi-criterion unit scoring
//!
//! Every unit gets fifteen signals, each roughly in `[0, 1]`, and a total
//! that is their weighted sum. Totals are not normalized here; the selector
//! divides by the maximum.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ScoringWeights;
use crate::nlp::lexicon::{contains_any, LexiconSet};
use crate::types::{PosTag, ScoreRow, SignalBreakdown, Unit};

/// `d/m`, `d-m`, `d/m/yy`, `d/m/yyyy`
static DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{1,2}[/\-]\d{1,2}(?:[/\-]\d{2,4})?\b").unwrap());

/// Clock times written `14h` or `14h30`
static CLOCK_TIME: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{1,2}h(?:\d{2})?\b").unwrap());

/// Token counts in this band get the full length score.
const IDEAL_LENGTH: std::ops::RangeInclusive<usize> = 8..=28;

/// Document-level inputs shared by every unit's score.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub sentence_count: usize,
    pub keyphrases: &'a [String],
    /// Cosine similarity of each unit to the corpus centroid
    pub centroid: &'a [f64],
    /// Normalized graph centrality of each unit
    pub centrality: &'a [f64],
}

/// Weighted-sum scorer
#[derive(Debug, Clone)]
pub struct Scorer {
    weights: ScoringWeights,
    cue_phrases: Vec<String>,
    action_cues: Vec<String>,
    time_words: Vec<String>,
}

impl Scorer {
    pub fn new(weights: ScoringWeights, lexicons: &LexiconSet) -> Self {
        Self {
            weights,
            cue_phrases: lexicons.cue_phrases.clone(),
            action_cues: lexicons.action_cues.clone(),
            time_words: lexicons.time_words.clone(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score rows for all units, in unit order.
    pub fn score_all(&self, units: &[Unit], ctx: &ScoringContext<'_>) -> Vec<ScoreRow> {
        units
            .iter()
            .map(|unit| {
                let signals = self.signals(unit, ctx);
                ScoreRow {
                    unit_index: unit.index,
                    total_score: weighted_total(&signals, &self.weights),
                    signals,
                }
            })
            .collect()
    }

    pub fn signals(&self, unit: &Unit, ctx: &ScoringContext<'_>) -> SignalBreakdown {
        let text = unit.text.to_lowercase();
        let token_string = unit.token_string();
        let last_sentences = ctx.sentence_count.max(1).saturating_sub(2);
        let last_in_paragraph = unit.sentence_count_in_paragraph.saturating_sub(2);

        SignalBreakdown {
            topic: flag(unit.position_in_paragraph <= 1),
            conclusion: flag(unit.position_in_paragraph >= last_in_paragraph),
            doc_topic: flag(unit.sentence_id <= 1),
            doc_conclusion: flag(unit.sentence_id >= last_sentences),
            cue: flag(contains_any(&text, &self.cue_phrases)),
            action: flag(contains_any(&text, &self.action_cues)),
            deadline: flag(contains_any(&text, &self.time_words) || has_date_or_time(&text)),
            keyphrase: keyphrase_overlap(&token_string, ctx.keyphrases),
            centroid: ctx.centroid.get(unit.index).copied().unwrap_or(0.0),
            centrality: ctx.centrality.get(unit.index).copied().unwrap_or(0.0),
            noun_phrase: (unit.noun_phrases.len() as f64 / 3.0).min(1.0),
            pos: pos_score(&unit.pos_tags),
            ner: (unit.entity_count() as f64 / 2.0).min(1.0),
            numeric: flag(text.chars().any(|c| c.is_ascii_digit())),
            length: length_score(unit.tokens.len()),
        }
    }
}

/// Weighted sum of a breakdown
pub fn weighted_total(s: &SignalBreakdown, w: &ScoringWeights) -> f64 {
    w.topic * s.topic
        + w.conclusion * s.conclusion
        + w.doc_topic * s.doc_topic
        + w.doc_conclusion * s.doc_conclusion
        + w.cue * s.cue
        + w.action * s.action
        + w.deadline * s.deadline
        + w.keyphrase * s.keyphrase
        + w.centroid * s.centroid
        + w.centrality * s.centrality
        + w.noun_phrase * s.noun_phrase
        + w.pos * s.pos
        + w.ner * s.ner
        + w.numeric * s.numeric
        + w.length * s.length
}

fn flag(hit: bool) -> f64 {
    if hit {
        1.0
    } else {
        0.0
    }
}

/// Fraction of keyphrases found as substrings of the token string.
pub fn keyphrase_overlap(token_string: &str, keyphrases: &[String]) -> f64 {
    let hits = keyphrases
        .iter()
        .filter(|kp| token_string.contains(kp.as_str()))
        .count();
    hits as f64 / keyphrases.len().max(1) as f64
}

/// Mean per-token POS weight, capped at 1.
pub fn pos_score(tags: &[PosTag]) -> f64 {
    if tags.is_empty() {
        return 0.0;
    }
    let sum: f64 = tags.iter().map(PosTag::weight).sum();
    (sum / tags.len() as f64).min(1.0)
}

/// 1.0 inside the ideal band, `n/8` below it, linear decay to 0 above it.
pub fn length_score(n_tokens: usize) -> f64 {
    if n_tokens == 0 {
        return 0.0;
    }
    if IDEAL_LENGTH.contains(&n_tokens) {
        return 1.0;
    }
    let (low, high) = (*IDEAL_LENGTH.start() as f64, *IDEAL_LENGTH.end() as f64);
    let n = n_tokens as f64;
    if n < low {
        n / low
    } else {
        (1.0 - (n - high) / high).max(0.0)
    }
}

/// Whether `text` contains a numeric date or a clock time.
pub fn has_date_or_time(text: &str) -> bool {
    DATE.is_match(text) || CLOCK_TIME.is_match(text)
}
