//! Paragraph, sentence and clause segmentation
//!
//! Normalized text is split into paragraphs on blank lines, paragraphs into
//! sentences at terminal punctuation followed by whitespace, and sentences
//! into clause-level units at commas, semicolons and colons. A comma between
//! two digits (`3,62`) never splits. Overlong clauses are re-split in front
//! of discourse markers, and clauses shorter than the noise threshold are
//! dropped.

use regex::Regex;

use crate::config::SegmenterConfig;
use crate::errors::Result;
use crate::types::Sentence;

use super::tokenizer::char_len;

const SENTENCE_TERMINATORS: [char; 4] = ['.', '!', '?', ';'];

/// Clause text tagged with the `global_id` of its sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawUnit {
    pub sentence_id: usize,
    pub text: String,
}

/// Output of one segmentation pass.
#[derive(Debug, Clone, Default)]
pub struct Segmentation {
    pub sentences: Vec<Sentence>,
    pub units: Vec<RawUnit>,
}

/// Splits normalized text into sentences and clause units.
#[derive(Debug, Clone)]
pub struct Segmenter {
    config: SegmenterConfig,
    /// Matches any discourse marker as a whole word; `None` when no markers.
    marker: Option<Regex>,
}

impl Segmenter {
    /// Build a segmenter that re-splits long clauses at `markers`.
    pub fn new(config: SegmenterConfig, markers: &[String]) -> Result<Self> {
        let mut alternatives: Vec<&str> = markers
            .iter()
            .map(|m| m.trim())
            .filter(|m| !m.is_empty())
            .collect();
        // longest alternatives first
        alternatives.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let marker = if alternatives.is_empty() {
            None
        } else {
            let body = alternatives
                .iter()
                .map(|m| regex::escape(m))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!(r"(?i)\b(?:{body})\b"))?)
        };

        Ok(Self { config, marker })
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Segment a normalized document.
    pub fn segment(&self, text: &str) -> Segmentation {
        let mut out = Segmentation::default();

        for (paragraph_index, paragraph) in split_paragraphs(text).into_iter().enumerate() {
            let sentences = split_sentences(paragraph);
            let count = sentences.len();

            for (index_in_paragraph, sentence) in sentences.into_iter().enumerate() {
                let global_id = out.sentences.len();
                for text in self.units_of(&sentence) {
                    out.units.push(RawUnit {
                        sentence_id: global_id,
                        text,
                    });
                }
                out.sentences.push(Sentence::new(
                    global_id,
                    paragraph_index,
                    index_in_paragraph,
                    count,
                    sentence,
                ));
            }
        }

        out
    }

    /// Clause units of one sentence, after length filtering and fallback.
    ///
    /// A sentence without clause punctuation is one unit, whatever its length.
    pub fn units_of(&self, sentence: &str) -> Vec<String> {
        let chunks = split_clauses(sentence);
        if chunks.len() <= 1 {
            return vec![sentence.trim().to_string()];
        }

        let pieces: Vec<String> = chunks
            .into_iter()
            .flat_map(|chunk| self.split_long(chunk))
            .collect();

        let kept: Vec<String> = pieces
            .into_iter()
            .filter(|p| char_len(p) >= self.config.min_unit_chars)
            .collect();

        if kept.is_empty() {
            vec![sentence.trim().to_string()]
        } else {
            kept
        }
    }

    /// Re-split a chunk longer than `max_unit_chars` in front of each marker.
    fn split_long(&self, chunk: &str) -> Vec<String> {
        let marker = match &self.marker {
            Some(m) if char_len(chunk) > self.config.max_unit_chars => m,
            _ => return vec![chunk.to_string()],
        };

        let mut pieces = Vec::new();
        let mut start = 0;
        for m in marker.find_iter(chunk) {
            if m.start() == 0 {
                continue;
            }
            push_trimmed(&mut pieces, &chunk[start..m.start()]);
            start = m.start();
        }
        push_trimmed(&mut pieces, &chunk[start..]);
        pieces
    }
}

/// Non-empty, trimmed paragraphs separated by blank lines.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Sentences of a paragraph, terminal punctuation kept.
///
/// A boundary is one of `. ! ? ;` followed by whitespace. Without any
/// boundary the whole paragraph is one sentence.
pub fn split_sentences(paragraph: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = paragraph.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !SENTENCE_TERMINATORS.contains(&c) {
            continue;
        }
        match chars.peek() {
            Some(&(_, next)) if next.is_whitespace() => {
                let end = i + c.len_utf8();
                push_trimmed(&mut sentences, &paragraph[start..end]);
                while let Some(&(_, ws)) = chars.peek() {
                    if !ws.is_whitespace() {
                        break;
                    }
                    chars.next();
                }
                start = chars.peek().map_or(paragraph.len(), |&(j, _)| j);
            }
            _ => {}
        }
    }
    push_trimmed(&mut sentences, &paragraph[start..]);
    sentences
}

/// Clause chunks of a sentence, split at `,` `;` `:`.
///
/// A comma with a digit on both sides belongs to a number and is kept.
pub fn split_clauses(sentence: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = sentence.char_indices().collect();
    let mut chunks = Vec::new();
    let mut start = 0;

    for (k, &(i, c)) in chars.iter().enumerate() {
        let split = match c {
            ';' | ':' => true,
            ',' => {
                let before = k > 0 && chars[k - 1].1.is_ascii_digit();
                let after = chars.get(k + 1).is_some_and(|&(_, n)| n.is_ascii_digit());
                !(before && after)
            }
            _ => false,
        };
        if split {
            let chunk = sentence[start..i].trim();
            if !chunk.is_empty() {
                chunks.push(chunk);
            }
            start = i + c.len_utf8();
        }
    }

    let tail = sentence[start..].trim();
    if !tail.is_empty() {
        chunks.push(tail);
    }
    chunks
}

fn push_trimmed(out: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        out.push(piece.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmenter() -> Segmenter {
        let markers = vec!["tuy nhiên".to_string(), "do đó".to_string()];
        Segmenter::new(SegmenterConfig::default(), &markers).unwrap()
    }

    #[test]
    fn test_paragraphs_skip_empty() {
        assert_eq!(split_paragraphs("a\n\n\n\nb"), vec!["a", "b"]);
        assert_eq!(split_paragraphs(" a \n\n  "), vec!["a"]);
    }

    #[test]
    fn test_sentences_keep_punctuation() {
        let sentences = split_sentences("Một câu. Hai câu!  Ba câu? Bốn; năm");
        assert_eq!(sentences, vec!["Một câu.", "Hai câu!", "Ba câu?", "Bốn;", "năm"]);
    }

    #[test]
    fn test_sentences_need_whitespace_after_terminator() {
        assert_eq!(split_sentences("Giảm 3.62 điểm."), vec!["Giảm 3.62 điểm."]);
        assert_eq!(split_sentences("không có dấu câu"), vec!["không có dấu câu"]);
    }

    #[test]
    fn test_clauses_protect_decimal_comma() {
        let chunks = split_clauses("VN-Index giảm 3,62%, thanh khoản thấp: khối ngoại bán");
        assert_eq!(
            chunks,
            vec!["VN-Index giảm 3,62%", "thanh khoản thấp", "khối ngoại bán"]
        );
    }

    #[test]
    fn test_clauses_split_comma_with_one_digit_neighbour() {
        assert_eq!(split_clauses("năm 2023,tăng"), vec!["năm 2023", "tăng"]);
        assert_eq!(split_clauses("a, 5"), vec!["a", "5"]);
    }

    #[test]
    fn test_short_chunks_dropped() {
        let seg = segmenter();
        let units = seg.units_of("Tuy nhiên, chi phí cũng tăng theo.");
        assert_eq!(units, vec!["chi phí cũng tăng theo."]);
    }

    #[test]
    fn test_single_chunk_sentence_kept_whole() {
        let seg = segmenter();
        assert_eq!(seg.units_of("Ngắn."), vec!["Ngắn."]);
    }

    #[test]
    fn test_all_chunks_short_falls_back_to_sentence() {
        let seg = segmenter();
        assert_eq!(seg.units_of("Một, hai, ba."), vec!["Một, hai, ba."]);
    }

    #[test]
    fn test_long_chunk_resplit_at_marker() {
        let seg = Segmenter::new(
            SegmenterConfig {
                max_unit_chars: 40,
                ..Default::default()
            },
            &["tuy nhiên".to_string()],
        )
        .unwrap();
        let units = seg.units_of(
            "Doanh thu quý này tăng mạnh nhờ xuất khẩu tuy nhiên chi phí vận chuyển tăng nhanh hơn, \
             ban lãnh đạo đã họp khẩn",
        );
        assert_eq!(
            units,
            vec![
                "Doanh thu quý này tăng mạnh nhờ xuất khẩu",
                "tuy nhiên chi phí vận chuyển tăng nhanh hơn",
                "ban lãnh đạo đã họp khẩn",
            ]
        );
    }

    #[test]
    fn test_long_single_chunk_sentence_not_resplit() {
        let sentence = "Doanh thu quý này tăng mạnh nhờ xuất khẩu sang thị trường châu Âu và Bắc Mỹ \
                        trong nhiều tháng liền tuy nhiên chi phí vận chuyển và nguyên vật liệu đầu vào \
                        lại tăng nhanh hơn dự kiến khiến biên lợi nhuận giảm đáng kể so với kỳ vọng của \
                        ban lãnh đạo công ty.";
        let seg = segmenter();
        assert!(char_len(sentence) > seg.config().max_unit_chars);

        assert_eq!(seg.units_of(sentence), vec![sentence]);
    }

    #[test]
    fn test_segment_coordinates() {
        let seg = segmenter();
        let doc = "Câu thứ nhất khá dài để giữ lại. Câu thứ hai cũng đủ dài.\n\nĐoạn hai chỉ có một câu.";
        let out = seg.segment(doc);

        assert_eq!(out.sentences.len(), 3);
        assert_eq!(out.sentences[1].index_in_paragraph, 1);
        assert_eq!(out.sentences[1].sentence_count_in_paragraph, 2);
        assert_eq!(out.sentences[2].paragraph_index, 1);
        assert_eq!(out.sentences[2].global_id, 2);
        assert_eq!(out.units.len(), 3);
        assert_eq!(out.units[2].sentence_id, 2);
    }

    #[test]
    fn test_no_markers_means_no_resplit() {
        let seg = Segmenter::new(
            SegmenterConfig {
                max_unit_chars: 10,
                ..Default::default()
            },
            &[],
        )
        .unwrap();
        assert_eq!(seg.units_of("một câu khá dài nhưng không có dấu phẩy"), vec![
            "một câu khá dài nhưng không có dấu phẩy"
        ]);
    }
}
