//! The triage engine: shared, read-only state plus the session transitions.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use triage_config::{EngineConfig, TriageConfig};
use triage_core::entities::{AnsweredQuestion, RedFlagMatch};
use triage_core::enums::FinishReason;
use triage_core::ids;
use triage_core::responses::SessionState;
use triage_core::text::normalize_symptom;
use triage_kb::KnowledgeBase;

use crate::answer::classify_answer;
use crate::error::EngineError;
use crate::likelihood::LikelihoodModel;
use crate::policy::{PolicyDecision, StoppingPolicy};
use crate::posterior::posterior;
use crate::red_flags::RedFlagIndex;
use crate::selector::{QuestionSelector, ScoredQuestion};
use crate::session::TriageSession;

/// Everything a session needs that does not change between sessions.
///
/// Build once at startup and share (`Arc<TriageEngine>`) across callers.
/// Sessions are plain values owned by the caller.
#[derive(Debug)]
pub struct TriageEngine {
    kb: Arc<KnowledgeBase>,
    model: LikelihoodModel,
    red_flags: RedFlagIndex,
    selector: QuestionSelector,
    policy: StoppingPolicy,
    prediction_limit: usize,
}

impl TriageEngine {
    /// Build an engine over `kb`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if `config` fails validation.
    pub fn new(kb: Arc<KnowledgeBase>, config: &EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let model = LikelihoodModel::from_kb(&kb, config.smoothing);
        let red_flags = RedFlagIndex::from_kb(&kb);
        tracing::debug!(
            diseases = model.len(),
            symptoms = kb.symptoms().len(),
            red_flags = red_flags.len(),
            "triage engine ready"
        );
        Ok(Self {
            kb,
            model,
            red_flags,
            selector: QuestionSelector::from_config(config),
            policy: StoppingPolicy::from_config(config),
            prediction_limit: config.prediction_limit,
        })
    }

    /// Load the configured knowledge base and build the engine.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] for invalid settings and
    /// [`EngineError::Kb`] if the knowledge base cannot be loaded.
    pub fn from_config(config: &TriageConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let kb = triage_kb::load(&config.knowledge)?;
        Self::new(Arc::new(kb), &config.engine)
    }

    #[must_use]
    pub fn kb(&self) -> &KnowledgeBase {
        &self.kb
    }

    #[must_use]
    pub const fn model(&self) -> &LikelihoodModel {
        &self.model
    }

    #[must_use]
    pub const fn red_flags(&self) -> &RedFlagIndex {
        &self.red_flags
    }

    #[must_use]
    pub const fn selector(&self) -> &QuestionSelector {
        &self.selector
    }

    #[must_use]
    pub const fn policy(&self) -> &StoppingPolicy {
        &self.policy
    }

    // -----------------------------------------------------------------------
    // Session lifecycle
    // -----------------------------------------------------------------------

    /// Open a session from the patient's initial symptoms.
    ///
    /// Symptoms are normalized and deduplicated; empty entries are dropped.
    /// A red-flag symptom puts the session straight into `emergency`.
    /// Otherwise the first question is selected, or the session finishes
    /// with [`FinishReason::Exhausted`] when there is nothing to ask.
    ///
    /// # Errors
    ///
    /// Returns an error only if a session id cannot be generated.
    pub fn start<S: AsRef<str>>(&self, symptoms: &[S]) -> Result<TriageSession, EngineError> {
        let id = ids::new_session_id()?;

        let mut confirmed: Vec<String> = Vec::new();
        let mut unknown = Vec::new();
        for raw in symptoms {
            let symptom = normalize_symptom(raw.as_ref());
            if symptom.is_empty() || confirmed.contains(&symptom) {
                continue;
            }
            if !self.kb.knows_symptom(&symptom) && self.red_flags.get(&symptom).is_none() {
                unknown.push(symptom.clone());
            }
            confirmed.push(symptom);
        }
        if !unknown.is_empty() {
            tracing::debug!(session = %id, ?unknown, "symptoms without likelihood rows");
        }

        let dist = posterior::<String>(&self.model, self.model.priors(), &confirmed, &[]);
        let ranked = dist.ranked(&self.model);
        let mut session = TriageSession::new(id, confirmed, unknown, dist, ranked);
        tracing::info!(session = %session.id(), symptoms = ?session.confirmed(), "triage session started");

        let hits: Vec<RedFlagMatch> = self
            .red_flags
            .check(session.confirmed())
            .into_iter()
            .map(|flag| RedFlagMatch::new(flag, 0))
            .collect();
        if !hits.is_empty() {
            escalate(&mut session, hits)?;
            return Ok(session);
        }

        self.advance(&mut session)?;
        Ok(session)
    }

    /// Apply the answer to the pending question and move the session on.
    ///
    /// # Errors
    ///
    /// Returns an invalid-operation error if the session is terminal or has
    /// no pending question; the session is left untouched in that case.
    pub fn update(&self, session: &mut TriageSession, answer: &str) -> Result<SessionState, EngineError> {
        if session.is_terminal() {
            let reason = format!("session is {}", session.status());
            return Err(session.invalid_operation(reason).into());
        }
        // Every in-progress session leaves `start`/`update` with a pending question.
        let Some(question) = session.pending_question().cloned() else {
            return Err(session.invalid_operation("no pending question").into());
        };

        let kind = classify_answer(answer);
        tracing::debug!(session = %session.id(), symptom = %question.symptom, ?kind, "answer recorded");
        session.record_answer(AnsweredQuestion {
            symptom: question.symptom.clone(),
            answer: answer.to_string(),
            kind,
            answered_at: Utc::now(),
        });

        let dist = posterior(&self.model, self.model.priors(), session.confirmed(), session.denied());
        let ranked = dist.ranked(&self.model);
        session.set_posterior(dist, ranked);

        let newly_flagged = self
            .red_flags
            .get(&question.symptom)
            .filter(|_| session.confirmed().contains(&question.symptom));
        if let Some(flag) = newly_flagged {
            let hit = RedFlagMatch::new(flag, session.asked().len());
            escalate(session, vec![hit])?;
            return Ok(session.state());
        }

        match self.policy.decide(session.asked().len(), session.top_probability()) {
            PolicyDecision::Stop(reason) => self.finish(session, reason)?,
            PolicyDecision::Continue => self.advance(session)?,
        }
        Ok(session.state())
    }

    /// The question the selector would ask next, without mutating the session.
    #[must_use]
    pub fn best_question(&self, session: &TriageSession) -> Option<ScoredQuestion> {
        self.selector
            .best_question(&self.model, session.posterior(), &excluded(session))
    }

    /// Top `limit` candidate questions for `session` with their scores.
    #[must_use]
    pub fn rank_questions(&self, session: &TriageSession, limit: usize) -> Vec<ScoredQuestion> {
        self.selector
            .rank_questions(&self.model, session.posterior(), &excluded(session), limit)
    }

    fn advance(&self, session: &mut TriageSession) -> Result<(), EngineError> {
        match self.best_question(session) {
            Some(next) => {
                session.set_pending(self.kb.question_for(&next.symptom));
                Ok(())
            }
            None => self.finish(session, FinishReason::Exhausted),
        }
    }

    fn finish(&self, session: &mut TriageSession, reason: FinishReason) -> Result<(), EngineError> {
        session.finish(reason, self.prediction_limit)?;
        tracing::info!(
            session = %session.id(),
            %reason,
            questions = session.asked().len(),
            top = session.top_probability(),
            "triage session finished"
        );
        Ok(())
    }
}

fn escalate(session: &mut TriageSession, hits: Vec<RedFlagMatch>) -> Result<(), EngineError> {
    for hit in &hits {
        tracing::warn!(
            session = %session.id(),
            symptom = %hit.symptom,
            severity = %hit.severity,
            "red flag raised; escalating"
        );
    }
    session.escalate(hits)?;
    Ok(())
}

/// Symptoms that must not be asked again.
fn excluded(session: &TriageSession) -> HashSet<&str> {
    session
        .confirmed()
        .iter()
        .chain(session.denied())
        .chain(session.asked())
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use triage_core::enums::SessionStatus;

    use super::*;

    #[test]
    fn invalid_config_is_rejected() {
        let kb = Arc::new(triage_kb::builtin().unwrap());
        let config = EngineConfig {
            min_questions: 9,
            ..EngineConfig::default()
        };
        let err = TriageEngine::new(kb, &config).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn default_config_uses_builtin_kb() {
        let engine = TriageEngine::from_config(&TriageConfig::default()).unwrap();
        assert_eq!(engine.kb().diseases().len(), 8);
    }

    #[test]
    fn update_without_pending_question_is_rejected() {
        let engine = TriageEngine::from_config(&TriageConfig::default()).unwrap();
        let mut session = engine.start(&["fever"]).unwrap();
        session.clear_pending();

        let err = engine.update(&mut session, "yes").unwrap_err();
        assert!(err.is_invalid_operation());
        assert!(err.to_string().contains("no pending question"), "got: {err}");
        assert!(session.asked().is_empty());
        assert_eq!(session.status(), SessionStatus::InProgress);
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TriageEngine>();
    }
}
