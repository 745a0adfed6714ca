//! Word-band enforcement for report fields.
//!
//! Every field leaves this module non-empty, single-spaced, terminated,
//! and with a whitespace-word count inside the requested band. Short
//! text is padded with context phrases, long text is trimmed at clause
//! boundaries when possible, and empty text is seeded from the fallback
//! corpus before enforcement so nothing downstream ever sees a hole.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::corpus;
use super::fields::FieldKind;

/// Inputs below this length get up to two longer lead phrases before
/// the padding loop, so heavily padded fields do not read as a chain of
/// short fillers.
const SHORT_INPUT_WORDS: usize = 15;

/// Sentence-ending marks the finalizer accepts as already terminal.
const TERMINATORS: [char; 3] = ['.', '!', '؟'];

/// Inclusive word-count band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordBand {
    pub min: usize,
    pub max: usize,
}

impl WordBand {
    /// Standard band for report fields.
    pub const DEFAULT: WordBand = WordBand { min: 25, max: 35 };

    pub fn new(min: usize, max: usize) -> Self {
        debug_assert!(min <= max);
        Self { min, max }
    }

    pub fn contains(&self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

impl Default for WordBand {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Whitespace-split word count, the only counting rule in the pipeline.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Bring one field into the band.
///
/// Text already inside the band passes through up to whitespace
/// normalization and terminal punctuation, so a compliant report is a
/// fixed point of the pipeline.
pub fn enforce_band(
    text: &str,
    kind: FieldKind,
    band: WordBand,
    report_type: &str,
    rng: &mut impl Rng,
) -> String {
    let trimmed = text.trim();
    let base = if trimmed.is_empty() {
        corpus::fallback_for(kind, rng).to_string()
    } else {
        trimmed.to_string()
    };

    let count = word_count(&base);
    let shaped = if count < band.min {
        pad(&base, band, report_type, rng)
    } else if count > band.max {
        trim_clause_aware(&base, band)
    } else {
        base
    };

    finalize(&shaped)
}

/// Pad below-band text with phrases from the context set, clamping once
/// at the end if the final append overshoots the upper bound.
fn pad(text: &str, band: WordBand, report_type: &str, rng: &mut impl Rng) -> String {
    let phrases = corpus::phrase_set_for(report_type);
    let mut out = text.to_string();

    if word_count(&out) < SHORT_INPUT_WORDS {
        for lead in pick_two_distinct(corpus::HIGH_VALUE_PHRASES, rng) {
            if word_count(&out) >= band.min {
                break;
            }
            out.push(' ');
            out.push_str(lead);
        }
    }

    while word_count(&out) < band.min {
        out.push(' ');
        out.push_str(phrases[rng.gen_range(0..phrases.len())]);
    }

    if word_count(&out) > band.max {
        out = truncate_words(&out, band.max);
    }
    out
}

/// Trim above-band text at clause boundaries: keep whole clauses while
/// the running count stays at most `max - 5`, then close with the fixed
/// tail. Falls back to a hard cut when the kept clauses would drop
/// below the lower bound.
fn trim_clause_aware(text: &str, band: WordBand) -> String {
    let budget = band.max.saturating_sub(5);
    let mut kept: Vec<&str> = Vec::new();
    let mut total = 0;

    for clause in text.split(['،', ',']) {
        let clause = clause.trim();
        if clause.is_empty() {
            continue;
        }
        let words = word_count(clause);
        if total + words > budget {
            break;
        }
        kept.push(clause);
        total += words;
    }

    if total >= band.min {
        format!("{}، {}", kept.join("، "), corpus::CLOSING_CLAUSE)
    } else {
        truncate_words(text, band.max)
    }
}

/// Cut to exactly `limit` words at a word boundary.
fn truncate_words(text: &str, limit: usize) -> String {
    text.split_whitespace()
        .take(limit)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collapse whitespace and guarantee a terminal sentence mark.
fn finalize(text: &str) -> String {
    let mut collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if !collapsed.is_empty() && !collapsed.ends_with(TERMINATORS) {
        collapsed.push('.');
    }
    collapsed
}

/// Two distinct entries from `options`; requires `options.len() >= 2`.
fn pick_two_distinct<'a>(options: &[&'a str], rng: &mut impl Rng) -> [&'a str; 2] {
    let first = rng.gen_range(0..options.len());
    let second = (first + 1 + rng.gen_range(0..options.len() - 1)) % options.len();
    [options[first], options[second]]
}
