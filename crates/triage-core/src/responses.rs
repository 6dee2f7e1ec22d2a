//! Response types handed to hosts by `start` / `update`.
//!
//! These structs are the engine's outward-facing shape: the HTTP layer (or
//! the `triage` CLI) serializes them as JSON without further mapping.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Question, RedFlagMatch};
use crate::enums::{ConfidenceLabel, FinishReason, SessionStatus};

/// One entry of the posterior, ordered by descending probability.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RankedDisease {
    pub disease: String,
    pub probability: f64,
}

/// A final prediction with its confidence label.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Prediction {
    pub rank: usize,
    pub disease: String,
    pub probability: f64,
    pub confidence: ConfidenceLabel,
}

impl Prediction {
    /// Build labelled predictions from the head of a ranked list.
    #[must_use]
    pub fn from_ranked(ranked: &[RankedDisease], limit: usize) -> Vec<Self> {
        ranked
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, r)| Self {
                rank: i + 1,
                disease: r.disease.clone(),
                probability: r.probability,
                confidence: ConfidenceLabel::from_probability(r.probability),
            })
            .collect()
    }
}

/// Snapshot of a session after `start` or `update`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SessionState {
    pub session_id: String,
    pub status: SessionStatus,
    pub ranked: Vec<RankedDisease>,
    pub next_question: Option<Question>,
    pub questions_asked: usize,
    pub confirmed_symptoms: Vec<String>,
    pub denied_symptoms: Vec<String>,
    pub red_flags: Vec<RedFlagMatch>,
    pub predictions: Vec<Prediction>,
    pub finish_reason: Option<FinishReason>,
}

impl SessionState {
    /// Whether the session reached a terminal state.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.status.is_terminal()
    }

    /// Highest posterior probability, or 0 for an empty disease set.
    #[must_use]
    pub fn top_probability(&self) -> f64 {
        self.ranked.first().map_or(0.0, |r| r.probability)
    }
}
