//! Text normalization
//!
//! Cleans raw input (often OCR output) before segmentation:
//! NFC composition, newline unification, repair of hyphenated line wraps,
//! joining of wrapped lines inside a paragraph, and whitespace collapsing.
//! Paragraph breaks (blank lines) survive as exactly one `"\n\n"`.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static LINE_ENDINGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\r").unwrap());

static HYPHEN_WRAP: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w)-\s*\n\s*(\w)").unwrap());

static HORIZONTAL_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\u{00A0}]+").unwrap());

static EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Normalizer for raw input text
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize `text`. Returns an empty string for blank input.
    pub fn normalize(&self, text: &str) -> String {
        let composed: String = text.trim().nfc().collect();
        let text = LINE_ENDINGS.replace_all(&composed, "\n");
        let text = HYPHEN_WRAP.replace_all(&text, "${1}-${2}");
        let text = join_wrapped_lines(&text);
        let text = HORIZONTAL_SPACE.replace_all(&text, " ");
        let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");
        text.trim().to_string()
    }
}

/// Replace every isolated `\n` with a space; runs of two or more are kept.
fn join_wrapped_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0usize;

    for c in text.chars() {
        if c == '\n' {
            run += 1;
            continue;
        }
        flush_newlines(&mut out, run);
        run = 0;
        out.push(c);
    }
    flush_newlines(&mut out, run);
    out
}

fn flush_newlines(out: &mut String, run: usize) {
    match run {
        0 => {}
        1 => out.push(' '),
        n => out.extend(std::iter::repeat('\n').take(n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(text: &str) -> String {
        Normalizer.normalize(text)
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  \n\t \r\n "), "");
    }

    #[test]
    fn test_crlf_and_wrapped_lines() {
        assert_eq!(normalize("dòng một\r\ndòng hai"), "dòng một dòng hai");
        assert_eq!(normalize("a\rb"), "a b");
    }

    #[test]
    fn test_hyphenated_wrap_repair() {
        assert_eq!(normalize("cổ phiếu blue-\nchips tăng"), "cổ phiếu blue-chips tăng");
        assert_eq!(normalize("blue- \n  chips"), "blue-chips");
    }

    #[test]
    fn test_paragraph_breaks_preserved() {
        assert_eq!(normalize("đoạn một.\n\nđoạn hai."), "đoạn một.\n\nđoạn hai.");
        assert_eq!(normalize("đoạn một.\n\n\n\nđoạn hai."), "đoạn một.\n\nđoạn hai.");
    }

    #[test]
    fn test_space_collapse() {
        assert_eq!(normalize("a  \t b\u{00A0}\u{00A0}c"), "a b c");
    }

    #[test]
    fn test_nfc_composition() {
        // "e" + combining circumflex + combining dot below -> "ệ"
        let decomposed = "Vi\u{0065}\u{0302}\u{0323}t";
        assert_eq!(normalize(decomposed), "Việt");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize("x  y\nz\n\n\n\nw-\nv");
        assert_eq!(normalize(&once), once);
    }
}
