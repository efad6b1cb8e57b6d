//! Clause segmentation.
//!
//! Splits raw document text into an ordered sequence of [`Clause`] records.
//! Two strategies:
//!
//! - **Sentence-aware** (default): split into sentences, then group them into
//!   clauses at clause-start indicators (numbered markers, lettered
//!   sub-markers, WHEREAS/NOW THEREFORE/IN WITNESS WHEREOF, all-caps headers
//!   ending in a colon).
//! - **Structural**: a cumulative pipeline of section-break regexes applied
//!   over a list-of-sections accumulator. Coarser, but needs no sentence
//!   detection at all.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::clause::Clause;

/// Sentences at or below this length are discarded as noise before grouping.
///
/// Known quirk: a genuinely short clause header ("PAYMENT:") falls under this
/// floor and merges into the neighbouring clause. Changing the floor moves
/// clause boundaries and every downstream risk count, so it stays.
const MIN_SENTENCE_CHARS: usize = 20;

/// Structural sections at or below this length are dropped.
const MIN_SECTION_CHARS: usize = 50;

/// Clause-start indicators, tested against a sentence's leading text.
static CLAUSE_START: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^\d+\.",
        r"(?i)^\([a-z]\)",
        r"(?i)^WHEREAS",
        r"(?i)^NOW THEREFORE",
        r"(?i)^IN WITNESS WHEREOF",
        r"(?i)^[A-Z][A-Z\s]+:",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("clause-start pattern"))
    .collect()
});

/// Section-break patterns for the structural strategy, applied in order.
static SECTION_BREAKS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\n\s*\d+\.\s+",
        r"\n\s*\(\w\)\s+",
        r"\n\s*[A-Z][A-Z\s]+:",
        r"\n\s*WHEREAS\s+",
        r"\n\s*NOW THEREFORE\s+",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("section-break pattern"))
    .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentStrategy {
    SentenceAware,
    Structural,
}

/// Splits raw document text into ordered clauses.
pub struct Segmenter {
    strategy: SegmentStrategy,
}

impl Segmenter {
    /// Sentence-aware segmenter (the primary path).
    pub fn new() -> Self {
        Self {
            strategy: SegmentStrategy::SentenceAware,
        }
    }

    /// Structural regex segmenter (the fallback path).
    pub fn structural() -> Self {
        Self {
            strategy: SegmentStrategy::Structural,
        }
    }

    pub fn strategy(&self) -> SegmentStrategy {
        self.strategy
    }

    /// Segment `text` into clauses with contiguous 1-based ids.
    ///
    /// Empty or whitespace-only input yields an empty list. Text with no
    /// matching indicators yields a single clause covering the whole input.
    pub fn segment(&self, text: &str) -> Vec<Clause> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let clauses = match self.strategy {
            SegmentStrategy::SentenceAware => segment_by_sentences(text),
            SegmentStrategy::Structural => segment_by_structure(text),
        };
        debug!(
            strategy = ?self.strategy,
            clauses = clauses.len(),
            "segmented document"
        );
        clauses
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

// ── Sentence-aware strategy ──

fn segment_by_sentences(text: &str) -> Vec<Clause> {
    let sentences: Vec<String> = split_sentences(text)
        .into_iter()
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .collect();

    let mut clauses: Vec<Clause> = Vec::new();
    let mut current = String::new();

    for sentence in sentences {
        if is_clause_start(&sentence) {
            if !current.trim().is_empty() {
                let id = clauses.len() as u32 + 1;
                // The triggering sentence becomes the emitted clause's
                // start_sentence preview.
                clauses.push(Clause::new(id, current.trim().to_string(), &sentence));
            }
            current = sentence;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&sentence);
        }
    }

    let tail = current.trim();
    if !tail.is_empty() {
        let id = clauses.len() as u32 + 1;
        clauses.push(Clause::new(id, tail.to_string(), tail));
    }

    clauses
}

/// Does this sentence open a new clause?
fn is_clause_start(sentence: &str) -> bool {
    let lead = sentence.trim();
    CLAUSE_START.iter().any(|re| re.is_match(lead))
}

/// Split text into sentences.
///
/// Lines are hard boundaries. Within a line, a boundary is a `.`/`!`/`?`
/// followed by whitespace and an upper-case, digit, or parenthesised
/// continuation — but only once the pending sentence exceeds the noise floor,
/// so enumeration markers ("1.") and short heads ("1. Liability.") stay glued
/// to the sentence they introduce.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut start = 0usize;
        for (pos, ch) in line.char_indices() {
            if !matches!(ch, '.' | '!' | '?') {
                continue;
            }
            let after = pos + ch.len_utf8();
            let rest = &line[after..];
            if !rest.starts_with(char::is_whitespace) {
                continue;
            }
            let pending = line[start..after].trim();
            if pending.chars().count() <= MIN_SENTENCE_CHARS {
                continue;
            }
            let continuation = rest.trim_start().chars().next();
            if matches!(continuation, Some(c) if c.is_uppercase() || c.is_ascii_digit() || c == '(')
            {
                sentences.push(pending.to_string());
                start = after + (rest.len() - rest.trim_start().len());
            }
        }

        let tail = line[start..].trim();
        if !tail.is_empty() {
            sentences.push(tail.to_string());
        }
    }

    sentences
}

// ── Structural strategy ──

fn segment_by_structure(text: &str) -> Vec<Clause> {
    // Cumulative split pipeline: the output of each pattern feeds the next.
    let mut sections: Vec<String> = vec![text.to_string()];
    for pattern in SECTION_BREAKS.iter() {
        let mut next = Vec::new();
        for section in &sections {
            for piece in pattern.split(section) {
                let piece = piece.trim();
                if !piece.is_empty() {
                    next.push(piece.to_string());
                }
            }
        }
        sections = next;
    }

    let mut clauses = Vec::new();
    for section in sections {
        if section.chars().count() > MIN_SECTION_CHARS {
            let id = clauses.len() as u32 + 1;
            clauses.push(Clause::new(id, section.clone(), &section));
        }
    }
    clauses
}

#[cfg(test)]
mod tests {
    use super::*;

    const NUMBERED: &str = "1. Liability. The Company shall not be liable for indirect damages of any kind.\n2. Termination. Either party may terminate this agreement with thirty days notice.";

    #[test]
    fn empty_input_yields_no_clauses() {
        let seg = Segmenter::new();
        assert!(seg.segment("").is_empty());
        assert!(seg.segment("   \n\t  ").is_empty());
        assert!(Segmenter::structural().segment("  \n ").is_empty());
    }

    #[test]
    fn numbered_sections_become_separate_clauses() {
        let clauses = Segmenter::new().segment(NUMBERED);
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].id, 1);
        assert_eq!(clauses[1].id, 2);
        assert!(clauses[0].text.starts_with("1. Liability."));
        assert!(clauses[1].text.starts_with("2. Termination."));
    }

    #[test]
    fn no_indicators_yields_single_clause() {
        let text = "The parties agree to cooperate in good faith on all matters arising under this arrangement.";
        let clauses = Segmenter::new().segment(text);
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].id, 1);
        assert_eq!(clauses[0].text, text);
    }

    #[test]
    fn whereas_lines_each_start_a_clause() {
        let text = "WHEREAS the first party wishes to engage the second party for consulting services;\nWHEREAS the second party has agreed to provide such services on the stated terms;\nNOW THEREFORE the parties agree as follows for the consideration described herein.";
        let clauses = Segmenter::new().segment(text);
        assert_eq!(clauses.len(), 3);
        assert!(clauses[0].text.starts_with("WHEREAS the first"));
        assert!(clauses[1].text.starts_with("WHEREAS the second"));
        assert!(clauses[2].text.starts_with("NOW THEREFORE"));
    }

    #[test]
    fn ids_are_contiguous_and_text_is_preserved() {
        let clauses = Segmenter::new().segment(NUMBERED);
        for (i, clause) in clauses.iter().enumerate() {
            assert_eq!(clause.id, i as u32 + 1);
        }
        // Concatenation reconstructs the input up to whitespace.
        let joined: String = clauses
            .iter()
            .map(|c| c.text.as_str())
            .collect::<String>()
            .split_whitespace()
            .collect();
        let original: String = NUMBERED.split_whitespace().collect();
        assert_eq!(joined, original);
    }

    #[test]
    fn short_headers_fall_under_the_noise_floor() {
        // "PAYMENT:" is 8 chars, below the noise floor, so it never reaches
        // the grouping loop. Preserved quirk.
        let text = "PAYMENT:\nAll fees are due within thirty days of the invoice date without exception.";
        let clauses = Segmenter::new().segment(text);
        assert_eq!(clauses.len(), 1);
        assert!(clauses[0].text.starts_with("All fees"));
    }

    #[test]
    fn long_caps_header_starts_a_clause() {
        let text = "The introduction paragraph describes the background of this engagement.\nCONFIDENTIALITY AND NON DISCLOSURE: Each party shall protect the other party's confidential information.";
        let clauses = Segmenter::new().segment(text);
        assert_eq!(clauses.len(), 2);
        assert!(clauses[1].text.starts_with("CONFIDENTIALITY"));
    }

    #[test]
    fn emitted_clause_carries_the_triggering_sentence_preview() {
        let clauses = Segmenter::new().segment(NUMBERED);
        // First clause's preview records the sentence that closed it.
        assert!(clauses[0].start_sentence.starts_with("2. Termination."));
        // Tail clause previews its own opening text.
        assert!(clauses[1].start_sentence.starts_with("2. Termination."));
    }

    #[test]
    fn start_sentence_is_capped_at_preview_length() {
        let text = format!("1. {} end.", "word ".repeat(60));
        let clauses = Segmenter::new().segment(&text);
        assert_eq!(clauses.len(), 1);
        assert!(clauses[0].start_sentence.chars().count() <= 103);
        assert!(clauses[0].start_sentence.ends_with("..."));
    }

    #[test]
    fn mid_line_sentences_are_split_and_regrouped() {
        let text = "The contractor shall maintain comprehensive insurance at all times. The client shall provide access to the premises as reasonably required.";
        let sentences = split_sentences(text);
        assert_eq!(sentences.len(), 2);

        // Neither sentence is a clause start, so they regroup into one clause.
        let clauses = Segmenter::new().segment(text);
        assert_eq!(clauses.len(), 1);
        assert!(clauses[0].text.contains("insurance at all times. The client"));
    }

    #[test]
    fn enumeration_markers_stay_glued_to_their_sentence() {
        let sentences = split_sentences(
            "1. Liability. The Company shall not be liable for indirect damages.",
        );
        assert_eq!(sentences.len(), 1);
        assert!(sentences[0].starts_with("1. Liability."));
    }

    #[test]
    fn structural_split_on_numbered_sections() {
        let text = "PREAMBLE TEXT DESCRIBING THE OVERALL AGREEMENT AND ITS PURPOSE IN DETAIL\n1. The first section covers obligations of the supplier in considerable depth.\n2. The second section covers payment schedules and invoicing requirements fully.";
        let clauses = Segmenter::structural().segment(text);
        assert_eq!(clauses.len(), 3);
        assert_eq!(
            clauses.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn structural_patterns_apply_cumulatively() {
        let text = "INTRODUCTION CLAUSE TEXT LONG ENOUGH TO SURVIVE THE SECTION LENGTH FLOOR HERE\n1. Numbered section text that is comfortably longer than fifty characters total.\n(a) Lettered subsection text that is also longer than fifty characters in total.\nWHEREAS this whereas section text exceeds fifty characters and stands alone too.";
        let clauses = Segmenter::structural().segment(text);
        assert_eq!(clauses.len(), 4);
    }

    #[test]
    fn structural_drops_short_sections() {
        let text = "Short bit.\n1. Tiny.\n2. This numbered section is long enough to clear the fifty character floor easily.";
        let clauses = Segmenter::structural().segment(text);
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].id, 1);
        assert!(clauses[0].text.starts_with("This numbered section"));
    }

    #[test]
    fn structural_no_breaks_yields_single_section() {
        let text = "A single block of contract prose without any structural markers, long enough to clear the floor.";
        let clauses = Segmenter::structural().segment(text);
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].text, text);
    }
}
