//! Next-question selection by expected information gain.

use std::collections::HashSet;

use serde::Serialize;
use triage_config::EngineConfig;

use crate::information::expected_information_gain;
use crate::likelihood::LikelihoodModel;
use crate::posterior::Distribution;

/// A candidate question with its score breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredQuestion {
    pub symptom: String,
    /// Expected entropy reduction in bits.
    pub gain: f64,
    /// Weighted offline-trained gain added on top.
    pub bonus: f64,
    pub score: f64,
}

/// Picks the symptom to ask about next.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSelector {
    candidate_diseases: usize,
    mass_cutoff: f64,
    training_gain_weight: f64,
}

impl QuestionSelector {
    #[must_use]
    pub const fn new(candidate_diseases: usize, mass_cutoff: f64, training_gain_weight: f64) -> Self {
        Self {
            candidate_diseases,
            mass_cutoff,
            training_gain_weight,
        }
    }

    #[must_use]
    pub const fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.candidate_diseases,
            config.candidate_mass_cutoff,
            config.training_gain_weight,
        )
    }

    /// Candidate symptoms in first-seen order: the top diseases by posterior
    /// (at or above the mass cutoff) in rank order, each disease's rows in KB order.
    #[must_use]
    pub fn candidates(
        &self,
        model: &LikelihoodModel,
        current: &Distribution,
        excluded: &HashSet<&str>,
    ) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for d in current
            .ranked_indices()
            .into_iter()
            .take(self.candidate_diseases)
            .filter(|&d| current.get(d) >= self.mass_cutoff)
        {
            for symptom in model.disease_symptoms(d) {
                if excluded.contains(symptom.as_str()) || !seen.insert(symptom.as_str()) {
                    continue;
                }
                out.push(symptom.clone());
            }
        }
        out
    }

    /// Score one symptom against the current posterior.
    #[must_use]
    pub fn score(&self, model: &LikelihoodModel, current: &Distribution, symptom: &str) -> ScoredQuestion {
        let gain = expected_information_gain(model, current, symptom);
        let bonus = model
            .training_gain(symptom)
            .map_or(0.0, |g| self.training_gain_weight * g);
        ScoredQuestion {
            symptom: symptom.to_string(),
            gain,
            bonus,
            score: gain + bonus,
        }
    }

    /// The highest-scoring candidate; ties keep the first-seen one.
    #[must_use]
    pub fn best_question(
        &self,
        model: &LikelihoodModel,
        current: &Distribution,
        excluded: &HashSet<&str>,
    ) -> Option<ScoredQuestion> {
        let mut best: Option<ScoredQuestion> = None;
        for symptom in self.candidates(model, current, excluded) {
            let scored = self.score(model, current, &symptom);
            if best.as_ref().is_none_or(|b| scored.score > b.score) {
                best = Some(scored);
            }
        }
        if let Some(q) = &best {
            tracing::debug!(symptom = %q.symptom, gain = q.gain, bonus = q.bonus, "selected question");
        }
        best
    }

    /// Up to `limit` candidates by descending score, ties in first-seen order.
    #[must_use]
    pub fn rank_questions(
        &self,
        model: &LikelihoodModel,
        current: &Distribution,
        excluded: &HashSet<&str>,
        limit: usize,
    ) -> Vec<ScoredQuestion> {
        let mut scored: Vec<ScoredQuestion> = self
            .candidates(model, current, excluded)
            .iter()
            .map(|s| self.score(model, current, s))
            .collect();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(limit);
        scored
    }
}

impl Default for QuestionSelector {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
