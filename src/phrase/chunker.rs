//! Noun phrase detection
//!
//! Groups runs of noun and adjective tokens into phrases using the POS and
//! NER tags aligned with a unit's raw tokens. Pattern: (NOUN|ADJ){2,}.
//! A named-entity token always stands alone: it closes the current run and
//! is emitted as a one-token phrase.

use rustc_hash::FxHashSet;

use crate::types::{NerTag, PosTag};

/// Shortest noun/adjective run that counts as a phrase
pub const MIN_PHRASE_TOKENS: usize = 2;

/// Noun phrase detector
#[derive(Debug, Clone, Copy, Default)]
pub struct NounChunker;

impl NounChunker {
    pub fn new() -> Self {
        Self
    }

    /// Extract noun phrases from aligned token/tag streams.
    ///
    /// Missing tags (streams of different lengths) count as `Other`/`Outside`.
    /// The result is deduplicated case-insensitively, first spelling kept.
    pub fn extract(&self, tokens: &[String], pos: &[PosTag], ner: &[NerTag]) -> Vec<String> {
        let mut phrases: Vec<String> = Vec::new();
        let mut run: Vec<&str> = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            let tag = pos.get(i).copied().unwrap_or(PosTag::Other);
            let entity = ner.get(i).copied().unwrap_or_default();

            if entity.is_entity() {
                self.flush(&mut run, &mut phrases);
                phrases.push(token.clone());
                continue;
            }

            if tag.is_phrase_member() {
                run.push(token);
            } else {
                self.flush(&mut run, &mut phrases);
            }
        }
        self.flush(&mut run, &mut phrases);

        dedup_case_insensitive(phrases)
    }

    fn flush(&self, run: &mut Vec<&str>, phrases: &mut Vec<String>) {
        if run.len() >= MIN_PHRASE_TOKENS {
            phrases.push(run.join(" "));
        }
        run.clear();
    }
}

fn dedup_case_insensitive(phrases: Vec<String>) -> Vec<String> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    phrases
        .into_iter()
        .filter_map(|p| {
            let trimmed = p.trim();
            let key = trimmed.to_lowercase();
            if key.is_empty() || !seen.insert(key) {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}
