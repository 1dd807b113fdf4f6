//! Keyword heuristics mapping free-form announcement text to a status and reason.

use crate::model::Status;

const SUSPENSION_KEYWORDS: [&str; 5] = ["suspend", "cancel", "postpone", "walang pasok", "no classes"];

const NORMAL_KEYWORDS: [&str; 4] = ["resume", "normal", "continue", "proceed"];

// Earlier entries win, regardless of where they occur in the text.
const REASON_KEYWORDS: [&str; 12] = [
    "heavy rainfall",
    "flooding",
    "typhoon",
    "storm",
    "earthquake",
    "volcanic activity",
    "landslide",
    "strong winds",
    "bad weather",
    "disaster",
    "emergency",
    "safety concerns",
];

/// Reason used when no topical keyword is found.
pub const FALLBACK_REASON: &str = "Weather-related concerns";

/// Classify text as a suspension or a normal-operations notice.
///
/// Suspension keywords take precedence over normal ones. Text matching neither is treated as
/// [`Status::Suspended`] so that an unclear notice is never silently dropped.
#[must_use]
pub fn classify_status(text: &str) -> Status {
    let lowered = text.to_lowercase();

    if SUSPENSION_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
    {
        return Status::Suspended;
    }

    if NORMAL_KEYWORDS.iter().any(|keyword| lowered.contains(keyword)) {
        return Status::Normal;
    }

    Status::Suspended
}

/// Derive a short canonical reason such as `"Due to typhoon"` from the text.
#[must_use]
pub fn extract_reason(text: &str) -> String {
    let lowered = text.to_lowercase();

    REASON_KEYWORDS
        .iter()
        .find(|keyword| lowered.contains(*keyword))
        .map_or_else(
            || FALLBACK_REASON.to_owned(),
            |keyword| format!("Due to {keyword}"),
        )
}
