//! Scoring
//!
//! Reduces page and site signals to a fixed, ordered checklist of twelve
//! weighted checks and a 0-100 score. Every check resolves to one of three
//! statuses whose factor (1, 0.5, 0) scales the check's weight:
//!
//! ```text
//! score = round(100 * Σ(weight × factor) / Σ weight)
//! ```
//!
//! Evaluation is a pure function of its inputs.

mod checks;
mod suggestions;

pub use checks::{build_checklist, is_blocked, CheckKey};
pub use suggestions::suggestions;

use crate::scan::{PageSignals, SiteSignals};
use serde::Serialize;

/// Outcome of one check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Good,
    Warn,
    Bad,
}

impl Status {
    /// Multiplier applied to the check's weight
    pub fn factor(self) -> f64 {
        match self {
            Status::Good => 1.0,
            Status::Warn => 0.5,
            Status::Bad => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Good => "good",
            Status::Warn => "warn",
            Status::Bad => "bad",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One evaluated checklist entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckItem {
    pub key: CheckKey,
    pub status: Status,
    pub weight: u32,
    pub note: String,
}

impl CheckItem {
    pub fn new(key: CheckKey, status: Status, note: impl Into<String>) -> Self {
        Self {
            key,
            status,
            weight: key.weight(),
            note: note.into(),
        }
    }
}

/// Checklist plus the score derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub checklist: Vec<CheckItem>,
    pub score: u8,
}

/// Evaluates all checks and computes the score
pub fn evaluate(page: &PageSignals, site: &SiteSignals) -> Evaluation {
    let checklist = build_checklist(page, site);
    let score = compute_score(&checklist);
    Evaluation { checklist, score }
}

/// Weighted score of a checklist, rounded half away from zero
pub fn compute_score(checklist: &[CheckItem]) -> u8 {
    let total: u32 = checklist.iter().map(|item| item.weight).sum();
    if total == 0 {
        return 0;
    }

    let raw: f64 = checklist
        .iter()
        .map(|item| f64::from(item.weight) * item.status.factor())
        .sum();

    (raw / f64::from(total) * 100.0).round().clamp(0.0, 100.0) as u8
}
