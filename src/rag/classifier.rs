//! Query intent classification
//!
//! A deterministic, priority-ordered keyword matcher. Keyword sets are
//! evaluated top-down and the first match wins, so a query mentioning both a
//! practitioner and a symptom is always classified as a doctor query. The
//! ordering of `INTENT_KEYWORDS` is load-bearing and must not change.

/// The classified purpose of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryIntent {
    /// The user is looking for a practitioner
    Doctor,
    /// The user describes a health condition or asks about treatment
    HealthCondition,
    /// Anything else
    General,
}

/// Keywords marking a doctor-seeking query
const DOCTOR_KEYWORDS: &[&str] = &["doctor", "practitioner", "physician", "vaidya"];

/// Keywords marking a health-condition query
const HEALTH_KEYWORDS: &[&str] = &[
    "treat",
    "cure",
    "healing",
    "medicine",
    "therapy",
    "disease",
    "condition",
    "problem",
    "pain",
];

/// Ordered (keyword set, intent) pairs, checked top-down
const INTENT_KEYWORDS: &[(&[&str], QueryIntent)] = &[
    (DOCTOR_KEYWORDS, QueryIntent::Doctor),
    (HEALTH_KEYWORDS, QueryIntent::HealthCondition),
];

/// Classify a raw query into an intent.
///
/// Case-insensitive substring test against each keyword set in order;
/// falls back to [`QueryIntent::General`]. Never fails.
#[must_use]
pub fn classify(query: &str) -> QueryIntent {
    let folded = query.to_lowercase();

    for (keywords, intent) in INTENT_KEYWORDS {
        if keywords.iter().any(|keyword| folded.contains(keyword)) {
            return *intent;
        }
    }

    QueryIntent::General
}
