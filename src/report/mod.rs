//! AI output → complete seven-field report.
//!
//! The model behind the report generator is an untrusted producer of an
//! unstructured string. This pipeline turns whatever it emits, or fails
//! to emit, into a report whose seven fields are always populated and
//! always inside the word band. It is a pure function of its inputs and
//! never errors; malformed input degrades to the fallback corpus, not to
//! a failure the caller has to handle.

pub mod corpus;
pub mod enrich;
pub mod extract;
pub mod fields;
pub mod sanitize;

use rand::Rng;
use serde::{Deserialize, Serialize};

pub use enrich::{word_count, WordBand};
pub use fields::FieldKind;

/// A normalized report: all seven fields populated and band-compliant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFields {
    pub goal: String,
    pub summary: String,
    pub steps: String,
    pub strategies: String,
    pub strengths: String,
    pub improve: String,
    pub recommendations: String,
}

impl ReportFields {
    pub fn get(&self, kind: FieldKind) -> &str {
        match kind {
            FieldKind::Goal => &self.goal,
            FieldKind::Summary => &self.summary,
            FieldKind::Steps => &self.steps,
            FieldKind::Strategies => &self.strategies,
            FieldKind::Strengths => &self.strengths,
            FieldKind::Improve => &self.improve,
            FieldKind::Recommendations => &self.recommendations,
        }
    }

    fn set(&mut self, kind: FieldKind, value: String) {
        match kind {
            FieldKind::Goal => self.goal = value,
            FieldKind::Summary => self.summary = value,
            FieldKind::Steps => self.steps = value,
            FieldKind::Strategies => self.strategies = value,
            FieldKind::Strengths => self.strengths = value,
            FieldKind::Improve => self.improve = value,
            FieldKind::Recommendations => self.recommendations = value,
        }
    }

    /// Fields in document order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldKind, &str)> + '_ {
        FieldKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

/// Normalize raw model output into a complete report.
pub fn normalize_report(raw: &str, report_type: &str, band: WordBand) -> ReportFields {
    normalize_report_with_rng(raw, report_type, band, &mut rand::thread_rng())
}

/// Same as [`normalize_report`] with caller-supplied randomness, so
/// fallback and phrase selection can be made deterministic.
pub fn normalize_report_with_rng(
    raw: &str,
    report_type: &str,
    band: WordBand,
    rng: &mut impl Rng,
) -> ReportFields {
    let cleaned = sanitize::clean_model_output(raw);
    let extracted = extract::extract_fields(&cleaned);

    let found = extracted.iter().filter(|s| !s.is_empty()).count();
    tracing::debug!(found, "fields extracted from model output");

    let mut report = ReportFields::default();
    for (kind, text) in FieldKind::ALL.iter().zip(extracted.iter()) {
        report.set(
            *kind,
            enrich::enforce_band(text, *kind, band, report_type, rng),
        );
    }
    report
}
