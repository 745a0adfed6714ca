//! The seven fixed semantic slots of a normalized report.

use serde::{Deserialize, Serialize};

/// One of the seven report slots, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Goal,
    Summary,
    Steps,
    Strategies,
    Strengths,
    Improve,
    Recommendations,
}

impl FieldKind {
    /// All slots in document order, slot 1 first.
    pub const ALL: [FieldKind; 7] = [
        FieldKind::Goal,
        FieldKind::Summary,
        FieldKind::Steps,
        FieldKind::Strategies,
        FieldKind::Strengths,
        FieldKind::Improve,
        FieldKind::Recommendations,
    ];

    /// Slot for a 1-based ordinal marker. `None` outside 1..=7.
    pub fn from_slot(slot: usize) -> Option<FieldKind> {
        match slot {
            1..=7 => Some(Self::ALL[slot - 1]),
            _ => None,
        }
    }

    /// 1-based position in the document.
    pub fn slot(self) -> usize {
        self as usize + 1
    }

    /// Stable key used in serialized reports.
    pub fn key(self) -> &'static str {
        match self {
            FieldKind::Goal => "goal",
            FieldKind::Summary => "summary",
            FieldKind::Steps => "steps",
            FieldKind::Strategies => "strategies",
            FieldKind::Strengths => "strengths",
            FieldKind::Improve => "improve",
            FieldKind::Recommendations => "recommendations",
        }
    }
}
