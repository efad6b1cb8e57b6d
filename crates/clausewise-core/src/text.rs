//! Text normalization and preview helpers.
//!
//! The core assumes upstream extraction already produced plain UTF-8 text;
//! these helpers only tidy whitespace and build display previews.

use unicode_segmentation::UnicodeSegmentation;

/// Words whose presence suggests the text is actually a legal document.
const LEGAL_INDICATORS: &[&str] = &[
    "agreement",
    "contract",
    "party",
    "parties",
    "terms",
    "conditions",
    "liability",
    "indemnity",
    "confidential",
    "termination",
    "clause",
    "section",
    "whereas",
    "therefore",
    "herein",
    "hereby",
];

/// Normalise extracted text: trim every line and drop blank ones, so the
/// segmenter sees one clean line per extracted paragraph.
pub fn normalize(text: &str) -> String {
    let cleaned: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    cleaned.join("\n")
}

/// Grapheme-safe truncation to at most `max` graphemes, appending "..." when
/// anything was cut.
pub fn preview(text: &str, max: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= max {
        return text.to_string();
    }
    let mut out: String = graphemes[..max].concat();
    out.push_str("...");
    out
}

/// Heuristic check that extracted text looks like a legal document.
///
/// Requires at least 100 characters and at least 3 distinct legal indicator
/// words. Advisory only; callers warn rather than abort.
pub fn looks_like_legal_document(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.chars().count() < 100 {
        return false;
    }
    let lower = trimmed.to_lowercase();
    let hits = LEGAL_INDICATORS
        .iter()
        .filter(|term| lower.contains(*term))
        .count();
    hits >= 3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_drops_blank_lines() {
        let raw = "  1. First clause.  \n\n\n   \n2. Second clause.\n";
        assert_eq!(normalize(raw), "1. First clause.\n2. Second clause.");
    }

    #[test]
    fn normalize_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n  \n"), "");
    }

    #[test]
    fn preview_short_text_unchanged() {
        assert_eq!(preview("short", 100), "short");
    }

    #[test]
    fn preview_truncates_with_ellipsis() {
        let long = "a".repeat(250);
        let p = preview(&long, 200);
        assert_eq!(p.len(), 203);
        assert!(p.ends_with("..."));
    }

    #[test]
    fn preview_respects_grapheme_boundaries() {
        // Combining sequences must never be split mid-cluster.
        let text = "é".repeat(50) + &"a".repeat(100);
        let p = preview(&text, 100);
        assert!(p.ends_with("..."));
        assert_eq!(p.trim_end_matches("...").graphemes(true).count(), 100);
    }

    #[test]
    fn legal_document_detection() {
        let contract = "This agreement is made between the parties. The terms \
                        and conditions herein govern liability and termination.";
        assert!(looks_like_legal_document(contract));

        assert!(!looks_like_legal_document("too short"));

        let prose = "The quick brown fox jumps over the lazy dog, again and \
                     again, every single morning, without any purpose at all \
                     beyond sheer enjoyment of the run.";
        assert!(!looks_like_legal_document(prose));
    }
}
