//! Document keyphrase extraction
//!
//! Candidates come from three pools, in this order: every unit's noun
//! phrases, every raw token tagged as a named entity, and the corpus terms
//! with the largest summed TF-IDF weight. Candidates are lowercased and
//! trimmed; anything shorter than two characters is dropped, and a candidate
//! already contained in a kept phrase is skipped. The first `top_k`
//! survivors form the keyphrase set.

use crate::nlp::tokenizer::char_len;
use crate::summarizer::tfidf::TfidfModel;
use crate::types::Unit;

/// Builds the keyphrase set of a document.
#[derive(Debug, Clone)]
pub struct KeyphraseExtractor {
    top_k: usize,
}

impl Default for KeyphraseExtractor {
    fn default() -> Self {
        Self::new(25)
    }
}

impl KeyphraseExtractor {
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Extract keyphrases from annotated units and their TF-IDF space.
    pub fn extract(&self, units: &[Unit], model: &TfidfModel) -> Vec<String> {
        let noun_phrases = units.iter().flat_map(|u| u.noun_phrases.iter().cloned());
        let entities = units.iter().flat_map(|u| {
            u.raw_tokens
                .iter()
                .zip(&u.ner_tags)
                .filter(|(_, tag)| tag.is_entity())
                .map(|(token, _)| token.clone())
        });
        let terms = model.top_terms(self.top_k);

        self.merge(noun_phrases.chain(entities).chain(terms))
    }

    /// Lowercase, filter and deduplicate candidates in order.
    pub fn merge(&self, candidates: impl IntoIterator<Item = String>) -> Vec<String> {
        let mut kept: Vec<String> = Vec::new();
        for candidate in candidates {
            let phrase = candidate.trim().to_lowercase();
            if char_len(&phrase) < 2 {
                continue;
            }
            if kept.iter().any(|k| k.contains(phrase.as_str())) {
                continue;
            }
            kept.push(phrase);
        }
        kept.truncate(self.top_k);
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarizer::tfidf::TfidfVectorizer;
    use crate::types::{NerTag, PosTag};

    fn unit(index: usize, raw: &[&str], ner: &[NerTag], nps: &[&str]) -> Unit {
        let raw_tokens: Vec<String> = raw.iter().map(|s| s.to_string()).collect();
        Unit {
            index,
            text: raw.join(" "),
            sentence_id: index,
            paragraph_index: 0,
            position_in_paragraph: index,
            sentence_count_in_paragraph: 2,
            tokens: raw_tokens.iter().map(|t| t.to_lowercase()).collect(),
            pos_tags: vec![PosTag::Other; raw.len()],
            ner_tags: ner.to_vec(),
            raw_tokens,
            noun_phrases: nps.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_merge_substring_dedup_is_order_sensitive() {
        let extractor = KeyphraseExtractor::new(10);
        let merged = extractor.merge(
            ["Lãi suất điều hành", "lãi suất", "x", "  Tỷ giá ", "tỷ giá trung tâm"]
                .iter()
                .map(|s| s.to_string()),
        );
        // "tỷ giá" was kept first, so the longer phrase still gets in
        assert_eq!(
            merged,
            vec!["lãi suất điều hành", "tỷ giá", "tỷ giá trung tâm"]
        );
    }

    #[test]
    fn test_merge_truncates_to_top_k() {
        let extractor = KeyphraseExtractor::new(2);
        let merged = extractor.merge(["aa", "bb", "cc"].iter().map(|s| s.to_string()));
        assert_eq!(merged, vec!["aa", "bb"]);
    }

    #[test]
    fn test_extract_pools_in_order() {
        let units = vec![
            unit(
                0,
                &["Ngân", "hàng", "Vietcombank", "tăng", "lãi", "suất"],
                &[
                    NerTag::Outside,
                    NerTag::Outside,
                    NerTag::Organization,
                    NerTag::Outside,
                    NerTag::Outside,
                    NerTag::Outside,
                ],
                &["ngân hàng", "Vietcombank"],
            ),
            unit(1, &["lãi", "suất", "cho", "vay"], &[NerTag::Outside; 4], &[]),
        ];
        let docs: Vec<String> = units.iter().map(|u| u.token_string()).collect();
        let model = TfidfVectorizer::new().fit_transform(&docs, false);

        let keyphrases = KeyphraseExtractor::new(25).extract(&units, &model);
        assert_eq!(keyphrases[0], "ngân hàng");
        assert_eq!(keyphrases[1], "vietcombank");
        assert!(keyphrases.contains(&"lãi suất".to_string()));
        // unigram "ngân" is absorbed by "ngân hàng"
        assert!(!keyphrases.contains(&"ngân".to_string()));
        assert!(keyphrases.len() <= 25);
    }
}
