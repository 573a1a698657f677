//! Core data types shared across pipeline stages
//!
//! Every value here lives for exactly one summarization call.

use serde::{Deserialize, Serialize};

/// Coarse part-of-speech categories understood by the scorer and chunker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosTag {
    Noun,
    ProperNoun,
    Verb,
    Adjective,
    Numeral,
    Other,
}

impl PosTag {
    /// Common or proper noun.
    pub fn is_noun(&self) -> bool {
        matches!(self, PosTag::Noun | PosTag::ProperNoun)
    }

    /// Tokens that may extend a noun phrase (nouns and adjectives).
    pub fn is_phrase_member(&self) -> bool {
        self.is_noun() || *self == PosTag::Adjective
    }

    /// Contribution of a token with this tag to the POS signal.
    pub fn weight(&self) -> f64 {
        match self {
            PosTag::Noun | PosTag::ProperNoun => 1.0,
            PosTag::Verb => 0.7,
            PosTag::Adjective => 0.5,
            PosTag::Numeral | PosTag::Other => 0.1,
        }
    }

    /// Parse a tag emitted by an external tagger.
    ///
    /// Accepts Universal Dependencies tags (`NOUN`, `PROPN`, `VERB`, `ADJ`,
    /// `NUM`, ...) and VLSP-style tags (`N`, `Np`, `Nc`, `V`, `A`, `M`, ...).
    /// Anything unrecognized maps to [`PosTag::Other`].
    pub fn from_tag(tag: &str) -> Self {
        let upper = tag.trim().to_uppercase();
        match upper.as_str() {
            "NOUN" => return PosTag::Noun,
            "PROPN" | "NP" => return PosTag::ProperNoun,
            "VERB" => return PosTag::Verb,
            "ADJ" => return PosTag::Adjective,
            "NUM" => return PosTag::Numeral,
            "ADV" | "ADP" | "AUX" | "CCONJ" | "SCONJ" | "DET" | "INTJ" | "PART" | "PRON"
            | "PUNCT" | "SYM" | "X" | "CH" => return PosTag::Other,
            _ => {}
        }
        match upper.chars().next() {
            Some('N') => PosTag::Noun,
            Some('V') => PosTag::Verb,
            Some('A') => PosTag::Adjective,
            Some('M') => PosTag::Numeral,
            _ => PosTag::Other,
        }
    }
}

/// Named-entity tag for a single raw token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NerTag {
    /// Not part of an entity.
    Outside,
    Person,
    Organization,
    Location,
    Misc,
}

impl NerTag {
    pub fn is_entity(&self) -> bool {
        *self != NerTag::Outside
    }

    /// Parse an IOB/BIOES or bare entity label (`B-PER`, `I-LOC`, `ORG`, `O`).
    pub fn from_tag(tag: &str) -> Self {
        let upper = tag.trim().to_uppercase();
        let label = match upper.split_once('-') {
            Some((prefix, rest)) if matches!(prefix, "B" | "I" | "E" | "S" | "L" | "U") => rest,
            _ => upper.as_str(),
        };
        match label {
            "" | "O" => NerTag::Outside,
            "PER" | "PERSON" => NerTag::Person,
            "ORG" | "ORGANIZATION" => NerTag::Organization,
            "LOC" | "LOCATION" | "GPE" => NerTag::Location,
            _ => NerTag::Misc,
        }
    }
}

impl Default for NerTag {
    fn default() -> Self {
        NerTag::Outside
    }
}

/// A sentence with its paragraph coordinates, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Position of the sentence in the whole document.
    pub global_id: usize,
    pub paragraph_index: usize,
    pub index_in_paragraph: usize,
    pub sentence_count_in_paragraph: usize,
    pub text: String,
}

impl Sentence {
    pub fn new(
        global_id: usize,
        paragraph_index: usize,
        index_in_paragraph: usize,
        sentence_count_in_paragraph: usize,
        text: impl Into<String>,
    ) -> Self {
        Self {
            global_id,
            paragraph_index,
            index_in_paragraph,
            sentence_count_in_paragraph,
            text: text.into(),
        }
    }
}

/// A clause-level span of a sentence: the atomic scoring element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub index: usize,
    pub text: String,
    /// `global_id` of the owning sentence.
    pub sentence_id: usize,
    pub paragraph_index: usize,
    /// Index of the owning sentence inside its paragraph.
    pub position_in_paragraph: usize,
    pub sentence_count_in_paragraph: usize,
    /// Tokens as returned by the annotator, unfiltered.
    pub raw_tokens: Vec<String>,
    /// Lowercased tokens with stopwords removed.
    pub tokens: Vec<String>,
    /// Aligned with `raw_tokens`.
    pub pos_tags: Vec<PosTag>,
    /// Aligned with `raw_tokens`.
    pub ner_tags: Vec<NerTag>,
    pub noun_phrases: Vec<String>,
}

impl Unit {
    /// Filtered tokens joined by single spaces; keyphrases are matched here.
    pub fn token_string(&self) -> String {
        self.tokens.join(" ")
    }

    /// Number of raw tokens tagged as part of a named entity.
    pub fn entity_count(&self) -> usize {
        self.ner_tags.iter().filter(|t| t.is_entity()).count()
    }
}

/// Per-signal values that make up a unit's total score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalBreakdown {
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

/// Score of one unit, with its breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub unit_index: usize,
    pub total_score: f64,
    pub signals: SignalBreakdown,
}
