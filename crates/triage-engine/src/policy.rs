//! The 3-5-7 stopping rule.

use triage_config::EngineConfig;
use triage_core::enums::FinishReason;

/// Outcome of evaluating the stopping rule after an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    Continue,
    Stop(FinishReason),
}

/// Question-count and confidence thresholds deciding when a session ends.
///
/// Below `min_questions` the session always continues. Until `soft_max` it
/// stops only at `high_confidence`; from `soft_max` on, `low_confidence` is
/// enough. At `hard_max` it stops unconditionally.
#[derive(Debug, Clone, PartialEq)]
pub struct StoppingPolicy {
    min_questions: usize,
    soft_max_questions: usize,
    hard_max_questions: usize,
    high_confidence: f64,
    low_confidence: f64,
}

impl StoppingPolicy {
    #[must_use]
    pub const fn from_config(config: &EngineConfig) -> Self {
        Self {
            min_questions: config.min_questions,
            soft_max_questions: config.soft_max_questions,
            hard_max_questions: config.hard_max_questions,
            high_confidence: config.high_confidence,
            low_confidence: config.low_confidence,
        }
    }

    /// Decide after `asked` questions with top posterior `top`.
    #[must_use]
    pub fn decide(&self, asked: usize, top: f64) -> PolicyDecision {
        if asked >= self.hard_max_questions {
            PolicyDecision::Stop(FinishReason::HardCap)
        } else if asked < self.min_questions {
            PolicyDecision::Continue
        } else if asked < self.soft_max_questions {
            if top >= self.high_confidence {
                PolicyDecision::Stop(FinishReason::HighConfidence)
            } else {
                PolicyDecision::Continue
            }
        } else if top >= self.low_confidence {
            PolicyDecision::Stop(FinishReason::SoftCeiling)
        } else {
            PolicyDecision::Continue
        }
    }

    #[must_use]
    pub const fn hard_max_questions(&self) -> usize {
        self.hard_max_questions
    }
}

impl Default for StoppingPolicy {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
