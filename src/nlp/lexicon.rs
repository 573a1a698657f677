//! Language lexicons: stopwords, discourse markers and cue phrases
//!
//! Lexicons are resolved once per [`Summarizer`](crate::Summarizer): explicit
//! overrides from the configuration win, otherwise the built-in list for the
//! configured language is used. Languages without built-in cue lists fall
//! back to the English ones.

use crate::config::LexiconOverrides;

use super::stopwords::StopwordFilter;

const VI_DISCOURSE_MARKERS: &[&str] = &[
    "nhưng", "tuy nhiên", "do đó", "vì vậy", "từ đó", "dẫn đến", "ngoài ra", "đồng thời",
    "mặt khác",
];

const VI_CUE_PHRASES: &[&str] = &[
    "tóm lại", "kết luận", "nhìn chung", "tổng quan", "nói chung", "do đó", "vì vậy", "từ đó",
    "dẫn đến", "mục tiêu", "nhằm", "để", "đề xuất", "giải pháp", "khuyến nghị", "cần", "nên",
];

const VI_ACTION_CUES: &[&str] = &[
    "cần", "yêu cầu", "đề nghị", "thực hiện", "triển khai", "kiểm tra", "cập nhật", "gửi",
    "xác nhận", "hoàn thành", "báo cáo", "nộp",
];

const VI_TIME_WORDS: &[&str] = &[
    "trước", "trong vòng", "hạn", "deadline", "ngày", "tuần này", "tháng", "giờ", "phút",
];

const EN_DISCOURSE_MARKERS: &[&str] = &[
    "however", "therefore", "moreover", "furthermore", "consequently", "in addition",
    "as a result", "meanwhile", "on the other hand",
];

const EN_CUE_PHRASES: &[&str] = &[
    "in summary", "in conclusion", "to summarize", "overall", "in short", "therefore",
    "as a result", "consequently", "the goal", "in order to", "we propose", "solution",
    "recommend", "should",
];

const EN_ACTION_CUES: &[&str] = &[
    "must", "require", "request", "submit", "update", "confirm", "complete", "review", "send",
    "report", "implement", "deploy", "check",
];

const EN_TIME_WORDS: &[&str] = &[
    "deadline", "before", "within", "due", "today", "tomorrow", "this week", "next week",
    "month", "hour", "minute",
];

/// Fully resolved lexicons used by the segmenter, annotator adapter and scorer.
#[derive(Debug, Clone)]
pub struct LexiconSet {
    pub stopwords: StopwordFilter,
    pub discourse_markers: Vec<String>,
    pub cue_phrases: Vec<String>,
    pub action_cues: Vec<String>,
    pub time_words: Vec<String>,
}

impl LexiconSet {
    /// Built-in lexicons for `language`.
    pub fn for_language(language: &str) -> Self {
        Self::resolve(language, &LexiconOverrides::default())
    }

    /// Built-in lexicons for `language` with `overrides` applied.
    pub fn resolve(language: &str, overrides: &LexiconOverrides) -> Self {
        let vietnamese = matches!(language.to_lowercase().as_str(), "vi" | "vietnamese");
        let pick = |custom: &Option<Vec<String>>, vi: &[&str], en: &[&str]| -> Vec<String> {
            match custom {
                Some(words) => normalize_entries(words.iter().map(String::as_str)),
                None if vietnamese => normalize_entries(vi.iter().copied()),
                None => normalize_entries(en.iter().copied()),
            }
        };

        let stopwords = match &overrides.stopwords {
            Some(words) => StopwordFilter::from_list(words),
            None => StopwordFilter::new(language),
        };

        Self {
            stopwords,
            discourse_markers: pick(
                &overrides.discourse_markers,
                VI_DISCOURSE_MARKERS,
                EN_DISCOURSE_MARKERS,
            ),
            cue_phrases: pick(&overrides.cue_phrases, VI_CUE_PHRASES, EN_CUE_PHRASES),
            action_cues: pick(&overrides.action_cues, VI_ACTION_CUES, EN_ACTION_CUES),
            time_words: pick(&overrides.time_words, VI_TIME_WORDS, EN_TIME_WORDS),
        }
    }
}

/// Lowercase, trim, drop empties and duplicates, keep first-seen order.
fn normalize_entries<'a>(words: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for word in words {
        let w = word.trim().to_lowercase();
        if !w.is_empty() && !out.contains(&w) {
            out.push(w);
        }
    }
    out
}

/// True when `text` (already lowercased) contains any entry of `lexicon`.
pub fn contains_any(text: &str, lexicon: &[String]) -> bool {
    lexicon.iter().any(|entry| text.contains(entry.as_str()))
}
