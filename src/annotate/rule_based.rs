//! Rule-based annotator
//!
//! A small in-process tagger built from closed word lists and surface cues.
//! Function words, verbs and adjectives come from lexicons; numerals from
//! the numeric pattern; capitalized tokens that do not open the text (and
//! all-caps acronyms anywhere) are proper-noun candidates. Runs of such
//! tokens become entities, typed by the words around them: a person title
//! before the run makes it a person, an organization or location indicator
//! before it (or an organization suffix after it) types it accordingly, and
//! anything else is `Misc`.

use rustc_hash::FxHashSet;

use crate::errors::AnnotatorError;
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tokenizer::{char_len, is_numeric_token, Tokenizer};
use crate::types::{NerTag, PosTag};

use super::Annotator;

const VERBS: &[&str] = &[
    // vi
    "tăng", "giảm", "cần", "xem", "xét", "làm", "gửi", "nộp", "mua", "bán", "đạt", "giữ", "tạo",
    "họp", "ký", "trả", "dừng", "mở", "đóng", "chuyển", "thực", "hiện", "triển", "khai", "kiểm",
    "tra", "cập", "nhật", "hoàn", "báo", "cáo", "phê", "duyệt", "yêu", "cầu", "đề", "nghị", "xác",
    "nhận", "ghi", "đi", "bị",
    // en
    "increase", "decrease", "rise", "rose", "fall", "fell", "grow", "grew", "submit", "update",
    "review", "confirm", "send", "sent", "report", "require", "need", "must", "approve",
    "complete", "deliver", "announce", "launch", "reach", "cut", "raise", "meet", "check",
];

const ADJECTIVES: &[&str] = &[
    // vi
    "mới", "cao", "thấp", "lớn", "nhỏ", "mạnh", "nhẹ", "tốt", "xấu", "nhanh", "chậm", "chính",
    "yếu", "khó", "dễ", "đẹp", "nhiều", "ít", "trọng", "tích", "cực", "tiêu", "ổn",
    // en
    "new", "high", "low", "large", "small", "strong", "weak", "good", "bad", "fast", "slow",
    "important", "key", "major", "main", "significant", "higher", "lower",
];

const PERSON_TITLES: &[&str] = &[
    "ông", "bà", "anh", "chị", "giám đốc", "chủ tịch", "bộ trưởng", "thủ tướng", "tổng thống",
    "mr", "mrs", "ms", "dr", "president", "minister", "ceo",
];

const ORG_INDICATORS: &[&str] = &[
    "công ty", "tập đoàn", "ngân hàng", "bộ", "sở", "trường", "viện", "hãng", "company", "bank",
];

const ORG_SUFFIXES: &[&str] = &["corp", "inc", "ltd", "group", "jsc", "plc"];

const LOCATION_INDICATORS: &[&str] = &[
    "tỉnh", "thành phố", "tp", "quận", "huyện", "xã", "phường", "nước", "city", "province",
];

/// Lexicon and capitalization based POS/NER tagger.
#[derive(Debug, Clone)]
pub struct RuleBasedAnnotator {
    tokenizer: Tokenizer,
    function_words: StopwordFilter,
    verbs: FxHashSet<String>,
    adjectives: FxHashSet<String>,
    /// Multi-word cues, lowercased and split on whitespace
    person_titles: Vec<Vec<String>>,
    org_indicators: Vec<Vec<String>>,
    org_suffixes: FxHashSet<String>,
    location_indicators: Vec<Vec<String>>,
}

impl Default for RuleBasedAnnotator {
    fn default() -> Self {
        Self::new("vi")
    }
}

impl RuleBasedAnnotator {
    /// Annotator whose function words are the stopwords of `language`.
    pub fn new(language: &str) -> Self {
        Self::with_function_words(StopwordFilter::new(language))
    }

    pub fn with_function_words(function_words: StopwordFilter) -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            function_words,
            verbs: word_set(VERBS),
            adjectives: word_set(ADJECTIVES),
            person_titles: cue_list(PERSON_TITLES),
            org_indicators: cue_list(ORG_INDICATORS),
            org_suffixes: word_set(ORG_SUFFIXES),
            location_indicators: cue_list(LOCATION_INDICATORS),
        }
    }

    /// Tokens of `text` with their POS and NER tags.
    pub fn analyze(&self, text: &str) -> Vec<(String, PosTag, NerTag)> {
        let tokens = self.tokenizer.words(text);
        let lower: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        let ner = self.entity_tags(&tokens, &lower);

        tokens
            .into_iter()
            .zip(lower.iter())
            .zip(ner)
            .map(|((token, low), entity)| {
                let pos = if entity.is_entity() {
                    PosTag::ProperNoun
                } else {
                    self.word_class(&token, low)
                };
                (token, pos, entity)
            })
            .collect()
    }

    /// POS of a token outside any entity.
    fn word_class(&self, token: &str, lower: &str) -> PosTag {
        if is_numeric_token(token) {
            return PosTag::Numeral;
        }
        if !token.chars().any(char::is_alphabetic) || self.function_words.is_stopword(lower) {
            return PosTag::Other;
        }
        if self.verbs.contains(lower) {
            return PosTag::Verb;
        }
        if self.adjectives.contains(lower) {
            return PosTag::Adjective;
        }
        if lower.is_ascii() && char_len(lower) > 4 {
            if lower.ends_with("ing") || lower.ends_with("ed") {
                return PosTag::Verb;
            }
            if ["ous", "ful", "ive", "able", "ible", "al"]
                .iter()
                .any(|s| lower.ends_with(s))
            {
                return PosTag::Adjective;
            }
        }
        PosTag::Noun
    }

    fn entity_tags(&self, tokens: &[String], lower: &[String]) -> Vec<NerTag> {
        let mut tags = vec![NerTag::Outside; tokens.len()];
        let name_like: Vec<bool> = (0..tokens.len())
            .map(|i| self.is_name_like(tokens, lower, i))
            .collect();

        let mut i = 0;
        while i < tokens.len() {
            if !name_like[i] {
                i += 1;
                continue;
            }
            let start = i;
            while i < tokens.len() && name_like[i] {
                i += 1;
            }
            let label = self.classify_span(lower, start, i);
            for tag in &mut tags[start..i] {
                *tag = label;
            }
        }
        tags
    }

    /// Capitalized and not text-initial, or an acronym. A text-initial
    /// capitalized word counts only when a capitalized word follows it.
    fn is_name_like(&self, tokens: &[String], lower: &[String], i: usize) -> bool {
        let token = &tokens[i];
        if is_acronym(token) {
            return true;
        }
        if !is_capitalized(token) || self.is_closed_class(&lower[i]) {
            return false;
        }
        if i > 0 {
            return true;
        }
        tokens.get(1).is_some_and(|next| is_capitalized(next))
    }

    fn is_closed_class(&self, lower: &str) -> bool {
        self.function_words.is_stopword(lower)
            || self.verbs.contains(lower)
            || self.adjectives.contains(lower)
            || self.org_suffixes.contains(lower)
            || self.person_titles.iter().any(|t| t.len() == 1 && t[0] == lower)
    }

    fn classify_span(&self, lower: &[String], start: usize, end: usize) -> NerTag {
        let before = &lower[..start];
        if ends_with_cue(before, &self.person_titles) {
            NerTag::Person
        } else if ends_with_cue(before, &self.org_indicators)
            || lower.get(end).is_some_and(|next| self.org_suffixes.contains(next))
        {
            NerTag::Organization
        } else if ends_with_cue(before, &self.location_indicators) {
            NerTag::Location
        } else {
            NerTag::Misc
        }
    }
}

impl Annotator for RuleBasedAnnotator {
    fn name(&self) -> &str {
        "rule-based"
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>, AnnotatorError> {
        Ok(self.tokenizer.words(text))
    }

    fn pos_tag(&self, text: &str) -> Result<Vec<(String, PosTag)>, AnnotatorError> {
        Ok(self
            .analyze(text)
            .into_iter()
            .map(|(token, pos, _)| (token, pos))
            .collect())
    }

    fn ner_tag(&self, text: &str) -> Result<Vec<(String, NerTag)>, AnnotatorError> {
        Ok(self
            .analyze(text)
            .into_iter()
            .map(|(token, _, ner)| (token, ner))
            .collect())
    }
}

fn word_set(words: &[&str]) -> FxHashSet<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

fn cue_list(cues: &[&str]) -> Vec<Vec<String>> {
    let mut out = Vec::new();
    for cue in cues {
        push_cue(&mut out, cue);
    }
    out
}

fn push_cue(list: &mut Vec<Vec<String>>, cue: &str) {
    let parts: Vec<String> = cue.split_whitespace().map(|p| p.to_lowercase()).collect();
    if !parts.is_empty() {
        list.push(parts);
    }
}

/// True when the last tokens of `before` spell one of `cues`.
fn ends_with_cue(before: &[String], cues: &[Vec<String>]) -> bool {
    cues.iter().any(|cue| before.ends_with(cue))
}

fn is_capitalized(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_uppercase)
}

/// Two or more letters, all uppercase (digits and hyphens allowed).
fn is_acronym(token: &str) -> bool {
    let letters = token.chars().filter(|c| c.is_alphabetic()).count();
    letters >= 2
        && token
            .chars()
            .all(|c| c.is_uppercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(annotator: &RuleBasedAnnotator, text: &str) -> Vec<(String, PosTag, NerTag)> {
        annotator.analyze(text)
    }

    #[test]
    fn test_word_classes() {
        let annotator = RuleBasedAnnotator::new("vi");
        let out = tags(&annotator, "Doanh thu tăng 12,5% trong quý mới");

        assert_eq!(out[0].1, PosTag::Noun);
        assert_eq!(out[0].2, NerTag::Outside); // text-initial capital only
        assert_eq!(out[2].1, PosTag::Verb);
        assert_eq!(out[3].1, PosTag::Numeral);
        assert_eq!(out[4].1, PosTag::Other);
        assert_eq!(out[6].1, PosTag::Adjective);
    }

    #[test]
    fn test_person_after_title() {
        let annotator = RuleBasedAnnotator::new("vi");
        let out = tags(&annotator, "Hôm qua ông Nguyễn Văn An đã ký hợp đồng");

        let person: Vec<_> = out
            .iter()
            .filter(|(_, _, n)| *n == NerTag::Person)
            .map(|(t, _, _)| t.as_str())
            .collect();
        assert_eq!(person, vec!["Nguyễn", "Văn", "An"]);
        assert_eq!(out[0].2, NerTag::Outside);
    }

    #[test]
    fn test_org_and_location_indicators() {
        let annotator = RuleBasedAnnotator::new("vi");
        let out = tags(&annotator, "Ngân hàng Vietcombank mở chi nhánh tại thành phố Đà Nẵng");

        let vcb = out.iter().find(|(t, _, _)| t == "Vietcombank").unwrap();
        assert_eq!(vcb.2, NerTag::Organization);
        assert_eq!(vcb.1, PosTag::ProperNoun);

        let da_nang: Vec<_> = out
            .iter()
            .filter(|(t, _, _)| t == "Đà" || t == "Nẵng")
            .map(|(_, _, n)| *n)
            .collect();
        assert_eq!(da_nang, vec![NerTag::Location, NerTag::Location]);
    }

    #[test]
    fn test_text_initial_name_with_capitalized_follower() {
        let annotator = RuleBasedAnnotator::new("vi");
        let out = tags(&annotator, "Hà Nội mưa to");
        assert_eq!(out[0].2, NerTag::Misc);
        assert_eq!(out[1].2, NerTag::Misc);
        assert_eq!(out[2].2, NerTag::Outside);
    }

    #[test]
    fn test_acronym_and_org_suffix() {
        let annotator = RuleBasedAnnotator::new("en");
        let out = tags(&annotator, "FPT signed a deal with Acme Corp yesterday");

        assert_eq!(out[0].2, NerTag::Misc);
        let acme = out.iter().find(|(t, _, _)| t == "Acme").unwrap();
        assert_eq!(acme.2, NerTag::Organization);
    }

    #[test]
    fn test_english_suffix_rules() {
        let annotator = RuleBasedAnnotator::new("en");
        let out = tags(&annotator, "prices kept rising across several regional markets");

        let rising = out.iter().find(|(t, _, _)| t == "rising").unwrap();
        assert_eq!(rising.1, PosTag::Verb);
        let regional = out.iter().find(|(t, _, _)| t == "regional").unwrap();
        assert_eq!(regional.1, PosTag::Adjective);
    }

    #[test]
    fn test_trait_methods_align() {
        let annotator = RuleBasedAnnotator::default();
        let text = "Công ty cần xem xét lại kế hoạch.";
        let tokens = annotator.tokenize(text).unwrap();
        let pos = annotator.pos_tag(text).unwrap();
        let ner = annotator.ner_tag(text).unwrap();

        assert_eq!(tokens.len(), pos.len());
        assert_eq!(tokens.len(), ner.len());
        assert!(ner.iter().all(|(_, n)| !n.is_entity()));
    }
}
