//! Per-patient triage session.

use chrono::{DateTime, Utc};
use triage_core::entities::{AnsweredQuestion, Question, RedFlagMatch};
use triage_core::enums::{AnswerKind, FinishReason, SessionStatus};
use triage_core::errors::CoreError;
use triage_core::responses::{Prediction, RankedDisease, SessionState};

use crate::posterior::Distribution;

/// Mutable state of one triage dialogue.
///
/// Sessions are created by [`crate::TriageEngine::start`] and advanced by
/// [`crate::TriageEngine::update`]; fields are read-only to everyone else.
/// `confirmed` and `denied` never share a symptom, and `asked` only grows.
#[derive(Debug, Clone)]
pub struct TriageSession {
    id: String,
    status: SessionStatus,
    posterior: Distribution,
    ranked: Vec<RankedDisease>,
    confirmed: Vec<String>,
    denied: Vec<String>,
    asked: Vec<String>,
    answers: Vec<AnsweredQuestion>,
    unknown_symptoms: Vec<String>,
    pending: Option<Question>,
    red_flags: Vec<RedFlagMatch>,
    predictions: Vec<Prediction>,
    finish_reason: Option<FinishReason>,
    started_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TriageSession {
    pub(crate) fn new(
        id: String,
        confirmed: Vec<String>,
        unknown_symptoms: Vec<String>,
        posterior: Distribution,
        ranked: Vec<RankedDisease>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            status: SessionStatus::InProgress,
            posterior,
            ranked,
            confirmed,
            denied: Vec::new(),
            asked: Vec::new(),
            answers: Vec::new(),
            unknown_symptoms,
            pending: None,
            red_flags: Vec::new(),
            predictions: Vec::new(),
            finish_reason: None,
            started_at: now,
            updated_at: now,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    #[must_use]
    pub const fn posterior(&self) -> &Distribution {
        &self.posterior
    }

    /// Posterior by descending probability.
    #[must_use]
    pub fn ranked(&self) -> &[RankedDisease] {
        &self.ranked
    }

    /// Current probability of `disease`, 0 when unknown.
    #[must_use]
    pub fn probability_of(&self, disease: &str) -> f64 {
        self.ranked
            .iter()
            .find(|r| r.disease == disease)
            .map_or(0.0, |r| r.probability)
    }

    #[must_use]
    pub fn top_probability(&self) -> f64 {
        self.ranked.first().map_or(0.0, |r| r.probability)
    }

    #[must_use]
    pub fn confirmed(&self) -> &[String] {
        &self.confirmed
    }

    #[must_use]
    pub fn denied(&self) -> &[String] {
        &self.denied
    }

    /// Symptoms asked about, in order, whatever the answer.
    #[must_use]
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    #[must_use]
    pub fn answers(&self) -> &[AnsweredQuestion] {
        &self.answers
    }

    /// Initial symptoms with no likelihood row and no red flag.
    #[must_use]
    pub fn unknown_symptoms(&self) -> &[String] {
        &self.unknown_symptoms
    }

    #[must_use]
    pub const fn pending_question(&self) -> Option<&Question> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn red_flags(&self) -> &[RedFlagMatch] {
        &self.red_flags
    }

    #[must_use]
    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions
    }

    #[must_use]
    pub const fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason
    }

    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Snapshot handed back to hosts.
    #[must_use]
    pub fn state(&self) -> SessionState {
        SessionState {
            session_id: self.id.clone(),
            status: self.status,
            ranked: self.ranked.clone(),
            next_question: self.pending.clone(),
            questions_asked: self.asked.len(),
            confirmed_symptoms: self.confirmed.clone(),
            denied_symptoms: self.denied.clone(),
            red_flags: self.red_flags.clone(),
            predictions: self.predictions.clone(),
            finish_reason: self.finish_reason,
        }
    }

    // -----------------------------------------------------------------------
    // Mutation (engine only)
    // -----------------------------------------------------------------------

    pub(crate) fn invalid_operation(&self, reason: impl Into<String>) -> CoreError {
        CoreError::InvalidOperation {
            session_id: self.id.clone(),
            reason: reason.into(),
        }
    }

    pub(crate) fn set_pending(&mut self, question: Question) {
        self.pending = Some(question);
    }

    #[cfg(test)]
    pub(crate) fn clear_pending(&mut self) {
        self.pending = None;
    }

    pub(crate) fn set_posterior(&mut self, posterior: Distribution, ranked: Vec<RankedDisease>) {
        self.posterior = posterior;
        self.ranked = ranked;
    }

    /// Record the answer to the pending question and update the evidence lists.
    pub(crate) fn record_answer(&mut self, answered: AnsweredQuestion) {
        let symptom = answered.symptom.clone();
        match answered.kind {
            AnswerKind::Confirm if !self.denied.contains(&symptom) => {
                if !self.confirmed.contains(&symptom) {
                    self.confirmed.push(symptom.clone());
                }
            }
            AnswerKind::Deny if !self.confirmed.contains(&symptom) => {
                if !self.denied.contains(&symptom) {
                    self.denied.push(symptom.clone());
                }
            }
            _ => {}
        }
        self.asked.push(symptom);
        self.answers.push(answered);
        self.pending = None;
        self.updated_at = Utc::now();
    }

    fn transition(&mut self, next: SessionStatus) -> Result<(), CoreError> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                session_id: self.id.clone(),
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.pending = None;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Move to `finished` and materialize the top predictions.
    pub(crate) fn finish(&mut self, reason: FinishReason, prediction_limit: usize) -> Result<(), CoreError> {
        self.transition(SessionStatus::Finished)?;
        self.finish_reason = Some(reason);
        self.predictions = Prediction::from_ranked(&self.ranked, prediction_limit);
        Ok(())
    }

    /// Move to `emergency`; no predictions are produced.
    pub(crate) fn escalate(&mut self, matches: Vec<RedFlagMatch>) -> Result<(), CoreError> {
        self.transition(SessionStatus::Emergency)?;
        self.finish_reason = Some(FinishReason::RedFlag);
        self.red_flags.extend(matches);
        Ok(())
    }
}
