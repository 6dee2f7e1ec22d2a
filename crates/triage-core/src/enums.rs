//! Status enums, severities, and answer classifications for the triage engine.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! [`SessionStatus`] provides `allowed_next_states()` so the session state
//! machine can refuse transitions out of terminal states.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// SessionStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a triage session.
///
/// ```text
/// in_progress → finished
///             → emergency
/// ```
///
/// Both `finished` and `emergency` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Finished,
    Emergency,
}

impl SessionStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::InProgress => &[Self::Finished, Self::Emergency],
            Self::Finished | Self::Emergency => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Emergency)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Finished => "finished",
            Self::Emergency => "emergency",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Severity attached to a red-flag symptom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ConfidenceLabel
// ---------------------------------------------------------------------------

/// Confidence label attached to a final prediction.
///
/// Thresholds: `high` ≥ 0.85, `medium` ≥ 0.70, `moderate` ≥ 0.60, else `low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLabel {
    High,
    Medium,
    Moderate,
    Low,
}

impl ConfidenceLabel {
    pub const HIGH_THRESHOLD: f64 = 0.85;
    pub const MEDIUM_THRESHOLD: f64 = 0.70;
    pub const MODERATE_THRESHOLD: f64 = 0.60;

    /// Label a posterior probability.
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        if probability >= Self::HIGH_THRESHOLD {
            Self::High
        } else if probability >= Self::MEDIUM_THRESHOLD {
            Self::Medium
        } else if probability >= Self::MODERATE_THRESHOLD {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Moderate => "moderate",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for ConfidenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AnswerKind
// ---------------------------------------------------------------------------

/// How a free-text answer to a yes/no question was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    /// The symptom is present.
    Confirm,
    /// The symptom is absent.
    Deny,
    /// No usable signal; the question still counts as asked.
    Uncertain,
}

impl AnswerKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirm => "confirm",
            Self::Deny => "deny",
            Self::Uncertain => "uncertain",
        }
    }
}

impl fmt::Display for AnswerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FinishReason
// ---------------------------------------------------------------------------

/// Why a session left `in_progress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Top posterior reached the high-confidence threshold between the
    /// minimum and the soft ceiling.
    HighConfidence,
    /// Top posterior reached the low-confidence threshold past the soft ceiling.
    SoftCeiling,
    /// The hard question cap was reached.
    HardCap,
    /// No candidate question remained.
    Exhausted,
    /// A confirmed symptom matched a red flag.
    RedFlag,
}

impl FinishReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HighConfidence => "high_confidence",
            Self::SoftCeiling => "soft_ceiling",
            Self::HardCap => "hard_cap",
            Self::Exhausted => "exhausted",
            Self::RedFlag => "red_flag",
        }
    }
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
