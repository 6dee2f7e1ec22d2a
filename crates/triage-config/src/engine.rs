//! Engine tunables: smoothing, the 3-5-7 stopping policy, and question selection.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_smoothing() -> f64 {
    0.01
}

const fn default_min_questions() -> usize {
    3
}

const fn default_soft_max_questions() -> usize {
    5
}

const fn default_hard_max_questions() -> usize {
    7
}

const fn default_high_confidence() -> f64 {
    0.85
}

const fn default_low_confidence() -> f64 {
    0.60
}

const fn default_candidate_diseases() -> usize {
    10
}

const fn default_candidate_mass_cutoff() -> f64 {
    0.01
}

const fn default_training_gain_weight() -> f64 {
    0.1
}

const fn default_prediction_limit() -> usize {
    5
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Likelihood used for `(disease, symptom)` pairs missing from the KB.
    #[serde(default = "default_smoothing")]
    pub smoothing: f64,

    /// Questions always asked before an early stop is considered.
    #[serde(default = "default_min_questions")]
    pub min_questions: usize,

    /// From here on, stopping only needs `low_confidence`.
    #[serde(default = "default_soft_max_questions")]
    pub soft_max_questions: usize,

    /// Unconditional stop.
    #[serde(default = "default_hard_max_questions")]
    pub hard_max_questions: usize,

    /// Top posterior needed to stop between `min` and `soft_max`.
    #[serde(default = "default_high_confidence")]
    pub high_confidence: f64,

    /// Top posterior needed to stop between `soft_max` and `hard_max`.
    #[serde(default = "default_low_confidence")]
    pub low_confidence: f64,

    /// How many top diseases contribute candidate questions.
    #[serde(default = "default_candidate_diseases")]
    pub candidate_diseases: usize,

    /// Diseases at or below this posterior contribute no candidates.
    #[serde(default = "default_candidate_mass_cutoff")]
    pub candidate_mass_cutoff: f64,

    /// Blend factor for the offline-trained information gain bonus.
    #[serde(default = "default_training_gain_weight")]
    pub training_gain_weight: f64,

    /// Number of final predictions materialized on finish.
    #[serde(default = "default_prediction_limit")]
    pub prediction_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            smoothing: default_smoothing(),
            min_questions: default_min_questions(),
            soft_max_questions: default_soft_max_questions(),
            hard_max_questions: default_hard_max_questions(),
            high_confidence: default_high_confidence(),
            low_confidence: default_low_confidence(),
            candidate_diseases: default_candidate_diseases(),
            candidate_mass_cutoff: default_candidate_mass_cutoff(),
            training_gain_weight: default_training_gain_weight(),
            prediction_limit: default_prediction_limit(),
        }
    }
}

impl EngineConfig {
    /// Check value ranges and the ordering of the question caps.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.smoothing > 0.0 && self.smoothing < 1.0) {
            return Err(ConfigError::invalid(
                "engine.smoothing",
                format!("must be in (0, 1), got {}", self.smoothing),
            ));
        }
        if self.hard_max_questions == 0 {
            return Err(ConfigError::invalid("engine.hard_max_questions", "must be at least 1"));
        }
        if self.min_questions > self.soft_max_questions
            || self.soft_max_questions > self.hard_max_questions
        {
            return Err(ConfigError::invalid(
                "engine.soft_max_questions",
                format!(
                    "question caps must satisfy min <= soft_max <= hard_max, got {} / {} / {}",
                    self.min_questions, self.soft_max_questions, self.hard_max_questions
                ),
            ));
        }
        for (field, value) in [
            ("engine.high_confidence", self.high_confidence),
            ("engine.low_confidence", self.low_confidence),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::invalid(field, format!("must be in (0, 1], got {value}")));
            }
        }
        if self.low_confidence > self.high_confidence {
            return Err(ConfigError::invalid(
                "engine.low_confidence",
                "must not exceed engine.high_confidence",
            ));
        }
        if !(0.0..1.0).contains(&self.candidate_mass_cutoff) {
            return Err(ConfigError::invalid(
                "engine.candidate_mass_cutoff",
                format!("must be in [0, 1), got {}", self.candidate_mass_cutoff),
            ));
        }
        if self.candidate_diseases == 0 {
            return Err(ConfigError::invalid("engine.candidate_diseases", "must be at least 1"));
        }
        if !self.training_gain_weight.is_finite() || self.training_gain_weight < 0.0 {
            return Err(ConfigError::invalid(
                "engine.training_gain_weight",
                "must be a non-negative number",
            ));
        }
        Ok(())
    }
}
