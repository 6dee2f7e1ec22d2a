//! Invariants that must hold after every step of any dialogue.

use std::collections::HashSet;
use std::sync::Arc;

use rstest::rstest;
use triage_config::EngineConfig;
use triage_core::enums::{ConfidenceLabel, SessionStatus};
use triage_core::responses::SessionState;
use triage_engine::{TriageEngine, TriageSession};

fn engine() -> TriageEngine {
    TriageEngine::new(Arc::new(triage_kb::builtin().unwrap()), &EngineConfig::default()).unwrap()
}

fn check_invariants(state: &SessionState, session: &TriageSession) {
    let total: f64 = state.ranked.iter().map(|r| r.probability).sum();
    assert!((total - 1.0).abs() < 1e-9, "posterior sums to {total}");
    assert!(state.ranked.windows(2).all(|w| w[0].probability >= w[1].probability));

    let confirmed: HashSet<&String> = state.confirmed_symptoms.iter().collect();
    assert!(
        state.denied_symptoms.iter().all(|d| !confirmed.contains(d)),
        "confirmed and denied overlap: {state:?}"
    );

    assert!(state.questions_asked <= 7);
    assert_eq!(state.questions_asked, session.asked().len());
    assert_eq!(state.status.is_terminal(), state.next_question.is_none());

    if let Some(question) = &state.next_question {
        assert!(!session.asked().contains(&question.symptom));
        assert!(!state.confirmed_symptoms.contains(&question.symptom));
        assert!(!state.denied_symptoms.contains(&question.symptom));
    }

    match state.status {
        SessionStatus::Finished => {
            assert!(!state.predictions.is_empty() && state.predictions.len() <= 5);
            for p in &state.predictions {
                assert_eq!(p.confidence, ConfidenceLabel::from_probability(p.probability));
            }
        }
        SessionStatus::Emergency => {
            assert!(state.predictions.is_empty());
            assert!(!state.red_flags.is_empty());
        }
        SessionStatus::InProgress => assert!(state.finish_reason.is_none()),
    }
}

/// Run a dialogue answering from `script` cyclically until it ends.
fn run(engine: &TriageEngine, symptoms: &[&str], script: &[&str]) -> (Vec<String>, SessionState) {
    let mut session = engine.start(symptoms).unwrap();
    let mut state = session.state();
    check_invariants(&state, &session);
    let mut questions = Vec::new();

    for answer in script.iter().cycle() {
        if state.is_complete() {
            break;
        }
        questions.push(state.next_question.as_ref().unwrap().symptom.clone());
        let before = state.questions_asked;
        state = engine.update(&mut session, answer).unwrap();
        assert_eq!(state.questions_asked, before + 1);
        check_invariants(&state, &session);
    }
    (questions, state)
}

#[rstest]
fn dialogues_keep_invariants(
    #[values(&[][..], &["fever"][..], &["fever", "headache"][..], &["cough", "runny nose"][..], &["diarrhea"][..])]
    symptoms: &[&str],
    #[values(&["yes"][..], &["no"][..], &["not sure"][..], &["yes", "no"][..], &["no", "not sure", "yes"][..])]
    script: &[&str],
) {
    let (_, state) = run(&engine(), symptoms, script);
    assert!(state.is_complete());
}

#[test]
fn selection_is_deterministic_across_engines() {
    for script in [&["yes", "no"][..], &["no"][..]] {
        let (qa, sa) = run(&engine(), &["fever"], script);
        let (qb, sb) = run(&engine(), &["fever"], script);
        assert_eq!(qa, qb);
        assert_eq!(sa.ranked, sb.ranked);
        assert_eq!(sa.finish_reason, sb.finish_reason);
    }
}

#[test]
fn asked_list_never_shrinks() {
    let engine = engine();
    let mut session = engine.start(&["headache"]).unwrap();
    let mut previous: Vec<String> = Vec::new();
    while !session.is_terminal() {
        engine.update(&mut session, "no").unwrap();
        assert!(session.asked().starts_with(&previous));
        previous = session.asked().to_vec();
    }
}
