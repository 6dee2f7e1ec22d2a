//! Free-text answer interpretation.

use triage_core::enums::AnswerKind;

/// Phrases that mean "I don't know". Checked before anything else so that
/// "not sure" or "no idea" never reads as a denial.
const UNCERTAIN_PHRASES: &[&str] = &[
    "not sure",
    "unsure",
    "don't know",
    "dont know",
    "do not know",
    "no idea",
    "not certain",
    "maybe",
];

/// Whole-word answers that confirm the symptom. Severity grades count as a yes.
const CONFIRM_WORDS: &[&str] = &[
    "y", "yeah", "yep", "yup", "true", "present", "mild", "moderate", "severe", "high",
];

const DENY_WORDS: &[&str] = &["n", "no", "nope", "nah", "none", "never", "false", "absent"];

/// Classify an answer to a symptom question.
///
/// Any answer containing "yes" or a confirming word is a confirmation; a
/// denying word makes it a denial; everything else, including the empty
/// string, is uncertain.
#[must_use]
pub fn classify_answer(answer: &str) -> AnswerKind {
    let lower = answer.trim().to_lowercase();
    if lower.is_empty() || UNCERTAIN_PHRASES.iter().any(|p| lower.contains(p)) {
        return AnswerKind::Uncertain;
    }

    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .collect();

    if lower.contains("yes") || words.iter().any(|w| CONFIRM_WORDS.contains(w)) {
        AnswerKind::Confirm
    } else if words.iter().any(|w| DENY_WORDS.contains(w)) {
        AnswerKind::Deny
    } else {
        AnswerKind::Uncertain
    }
}
