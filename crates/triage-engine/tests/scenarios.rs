//! End-to-end dialogues through `TriageEngine::start` / `update`.

use std::collections::BTreeMap;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use triage_config::EngineConfig;
use triage_core::entities::{LikelihoodEntry, RedFlag};
use triage_core::enums::{ConfidenceLabel, FinishReason, SessionStatus, Severity};
use triage_engine::TriageEngine;
use triage_kb::{KbParts, KnowledgeBase};

fn rows(rows: &[(&str, &str, f64)]) -> Vec<LikelihoodEntry> {
    rows.iter()
        .map(|(d, s, w)| LikelihoodEntry {
            disease: (*d).into(),
            symptom: (*s).into(),
            weight: *w,
            info_gain: None,
        })
        .collect()
}

fn engine_from(parts: KbParts) -> TriageEngine {
    let kb = KnowledgeBase::from_parts(parts, 1e-6).unwrap();
    TriageEngine::new(Arc::new(kb), &EngineConfig::default()).unwrap()
}

fn engine(table: &[(&str, &str, f64)]) -> TriageEngine {
    engine_from(KbParts {
        rows: rows(table),
        ..KbParts::default()
    })
}

fn builtin_engine() -> TriageEngine {
    TriageEngine::new(Arc::new(triage_kb::builtin().unwrap()), &EngineConfig::default()).unwrap()
}

/// Two diseases sharing `n` symptoms: A has each with `wa`, B with `wb`.
fn two_disease(n: usize, wa: f64, wb: f64) -> TriageEngine {
    let names: Vec<String> = (0..n).map(|i| format!("s{i}")).collect();
    let mut table = Vec::new();
    for s in &names {
        table.push(("A", s.as_str(), wa));
        table.push(("B", s.as_str(), wb));
    }
    engine(&table)
}

// ---------------------------------------------------------------------------
// Posterior
// ---------------------------------------------------------------------------

#[test]
fn fever_favours_a_then_exhausts() {
    let engine = engine_from(KbParts {
        rows: rows(&[
            ("A", "fever", 0.9),
            ("A", "cough", 0.1),
            ("B", "fever", 0.1),
            ("B", "cough", 0.9),
        ]),
        priors: Some(BTreeMap::from([("A".into(), 0.5), ("B".into(), 0.5)])),
        ..KbParts::default()
    });

    let mut session = engine.start(&["fever"]).unwrap();
    assert!((session.probability_of("A") - 0.9).abs() < 1e-9);
    assert!((session.probability_of("B") - 0.1).abs() < 1e-9);
    assert_eq!(session.pending_question().unwrap().symptom, "cough");

    let state = engine.update(&mut session, "No").unwrap();
    assert_eq!(state.status, SessionStatus::Finished);
    assert_eq!(state.finish_reason, Some(FinishReason::Exhausted));
    assert_eq!(state.questions_asked, 1);
    assert_eq!(state.denied_symptoms, vec!["cough".to_string()]);
    assert_eq!(state.predictions[0].disease, "A");
    assert!((state.predictions[0].probability - 0.405 / 0.41).abs() < 1e-9);
    assert_eq!(state.predictions[0].confidence, ConfidenceLabel::High);
}

#[test]
fn certain_weight_is_rejected_at_kb_load() {
    let parts = KbParts {
        rows: rows(&[("A", "fever", 1.0), ("A", "cough", 0.5), ("B", "fever", 0.5), ("B", "cough", 0.5)]),
        ..KbParts::default()
    };
    assert!(KnowledgeBase::from_parts(parts, 1e-6).is_err());
}

#[test]
fn denying_a_near_certain_symptom_leaves_the_disease_recoverable() {
    let engine = engine(&[("A", "fever", 0.99), ("A", "cough", 0.5), ("B", "fever", 0.5), ("B", "cough", 0.5)]);
    let mut session = engine.start(&["cough"]).unwrap();
    assert_eq!(session.pending_question().unwrap().symptom, "fever");

    let state = engine.update(&mut session, "no").unwrap();
    assert_eq!(state.finish_reason, Some(FinishReason::Exhausted));
    let a = session.probability_of("A");
    assert!((a - 0.0025 / 0.1275).abs() < 1e-9, "A = {a}");
    assert!(a > 0.0);
}

#[test]
fn start_normalizes_and_dedupes() {
    let session = builtin_engine()
        .start(&["Fever", "  fever ", "body_ache", "", "   "])
        .unwrap();
    assert_eq!(session.confirmed(), ["fever".to_string(), "body ache".to_string()]);
    assert!(session.unknown_symptoms().is_empty());
}

#[test]
fn unknown_symptoms_are_neutral() {
    let engine = builtin_engine();
    let plain = engine.start(&["fever"]).unwrap();
    let noisy = engine.start(&["fever", "purple toes"]).unwrap();
    assert_eq!(noisy.unknown_symptoms(), ["purple toes".to_string()]);
    for (a, b) in plain.ranked().iter().zip(noisy.ranked()) {
        assert_eq!(a.disease, b.disease);
        assert!((a.probability - b.probability).abs() < 1e-12);
    }
}

#[test]
fn empty_start_uses_priors() {
    let session = builtin_engine().start::<&str>(&[]).unwrap();
    assert_eq!(session.status(), SessionStatus::InProgress);
    assert!((session.top_probability() - 0.125).abs() < 1e-12);
    assert!(session.pending_question().is_some());
}

// ---------------------------------------------------------------------------
// Stopping rule
// ---------------------------------------------------------------------------

#[test]
fn confident_after_three_questions() {
    let engine = two_disease(8, 0.9, 0.1);
    let mut session = engine.start::<&str>(&[]).unwrap();

    for _ in 0..2 {
        let state = engine.update(&mut session, "yes").unwrap();
        assert_eq!(state.status, SessionStatus::InProgress, "never stops before three");
    }
    let state = engine.update(&mut session, "yes").unwrap();
    assert_eq!(state.status, SessionStatus::Finished);
    assert_eq!(state.finish_reason, Some(FinishReason::HighConfidence));
    assert_eq!(state.questions_asked, 3);
    assert_eq!(state.predictions[0].disease, "A");
    assert!(state.next_question.is_none());
}

#[test]
fn confident_after_four_questions() {
    // .7 / .3 per yes: .7, .845, .927
    let engine = two_disease(8, 0.7, 0.3);
    let mut session = engine.start::<&str>(&[]).unwrap();
    for answer in ["not sure", "yes", "yes"] {
        let state = engine.update(&mut session, answer).unwrap();
        assert_eq!(state.status, SessionStatus::InProgress);
    }
    let state = engine.update(&mut session, "yes").unwrap();
    assert_eq!(state.finish_reason, Some(FinishReason::HighConfidence));
    assert_eq!(state.questions_asked, 4);
}

#[test]
fn moderate_confidence_stops_at_five() {
    let engine = two_disease(8, 0.7, 0.3);
    let mut session = engine.start::<&str>(&[]).unwrap();
    for _ in 0..4 {
        engine.update(&mut session, "not sure").unwrap();
    }
    assert_eq!(session.status(), SessionStatus::InProgress);
    let state = engine.update(&mut session, "yes").unwrap();
    assert_eq!(state.finish_reason, Some(FinishReason::SoftCeiling));
    assert_eq!(state.questions_asked, 5);
    assert_eq!(state.predictions[0].confidence, ConfidenceLabel::Medium);
}

#[test]
fn hard_cap_at_seven() {
    let table: Vec<(String, String)> = ["W", "X", "Y", "Z"]
        .iter()
        .flat_map(|d| (0..10).map(move |i| ((*d).to_string(), format!("s{i}"))))
        .collect();
    let refs: Vec<(&str, &str, f64)> = table.iter().map(|(d, s)| (d.as_str(), s.as_str(), 0.5)).collect();
    let engine = engine(&refs);
    let mut session = engine.start::<&str>(&[]).unwrap();

    for n in 1..7 {
        let state = engine.update(&mut session, "yes").unwrap();
        assert_eq!(state.status, SessionStatus::InProgress);
        assert_eq!(state.questions_asked, n);
    }
    let state = engine.update(&mut session, "yes").unwrap();
    assert_eq!(state.status, SessionStatus::Finished);
    assert_eq!(state.finish_reason, Some(FinishReason::HardCap));
    assert_eq!(state.questions_asked, 7);
    assert!((state.top_probability() - 0.25).abs() < 1e-9);
    assert_eq!(state.predictions.len(), 4);
    assert!(state.predictions.iter().all(|p| p.confidence == ConfidenceLabel::Low));
}

#[test]
fn nothing_to_ask_finishes_immediately() {
    let engine = engine(&[("Only", "x", 0.9)]);
    let session = engine.start(&["x"]).unwrap();
    assert_eq!(session.status(), SessionStatus::Finished);
    assert_eq!(session.finish_reason(), Some(FinishReason::Exhausted));
    assert_eq!(session.predictions().len(), 1);
    assert!((session.predictions()[0].probability - 1.0).abs() < 1e-12);
}

// ---------------------------------------------------------------------------
// Red flags
// ---------------------------------------------------------------------------

#[test]
fn chest_pain_is_an_emergency() {
    let engine = builtin_engine();
    let mut session = engine.start(&["fever", "chest pain"]).unwrap();
    assert_eq!(session.status(), SessionStatus::Emergency);
    assert_eq!(session.finish_reason(), Some(FinishReason::RedFlag));
    assert!(session.pending_question().is_none());
    assert!(session.predictions().is_empty());
    assert_eq!(session.red_flags().len(), 1);
    assert_eq!(session.red_flags()[0].symptom, "chest pain");
    assert_eq!(session.red_flags()[0].severity, Severity::Critical);
    assert_eq!(session.red_flags()[0].at_question, 0);

    let err = engine.update(&mut session, "yes").unwrap_err();
    assert!(err.is_invalid_operation());
}

fn flagged_engine() -> TriageEngine {
    engine_from(KbParts {
        rows: rows(&[
            ("A", "fever", 0.9),
            ("A", "shortness of breath", 0.6),
            ("B", "fever", 0.1),
        ]),
        red_flags: vec![RedFlag {
            symptom: "shortness of breath".into(),
            severity: Severity::High,
            action: "Consult doctor urgently".into(),
        }],
        ..KbParts::default()
    })
}

#[test]
fn confirming_a_red_flag_escalates() {
    let engine = flagged_engine();
    let mut session = engine.start(&["fever"]).unwrap();
    assert_eq!(session.pending_question().unwrap().symptom, "shortness of breath");

    let state = engine.update(&mut session, "Yes").unwrap();
    assert_eq!(state.status, SessionStatus::Emergency);
    assert_eq!(state.questions_asked, 1);
    assert_eq!(state.red_flags[0].at_question, 1);
    assert_eq!(state.red_flags[0].action, "Consult doctor urgently");
    assert!(state.predictions.is_empty());
}

#[test]
fn denying_a_red_flag_does_not_escalate() {
    let engine = flagged_engine();
    let mut session = engine.start(&["fever"]).unwrap();
    let state = engine.update(&mut session, "no").unwrap();
    assert_ne!(state.status, SessionStatus::Emergency);
    assert!(state.red_flags.is_empty());
}

// ---------------------------------------------------------------------------
// Misuse
// ---------------------------------------------------------------------------

#[test]
fn finished_sessions_reject_updates_unchanged() {
    let engine = engine(&[("Only", "x", 0.9)]);
    let mut session = engine.start(&["x"]).unwrap();
    let before = session.state();

    let err = engine.update(&mut session, "yes").unwrap_err();
    assert!(err.is_invalid_operation());
    assert!(err.to_string().contains("finished"), "{err}");
    assert_eq!(session.state(), before);
}

#[test]
fn answers_are_recorded_with_their_reading() {
    let engine = builtin_engine();
    let mut session = engine.start(&["fever"]).unwrap();
    let asked = session.pending_question().unwrap().symptom.clone();
    engine.update(&mut session, "Not sure").unwrap();
    assert_eq!(session.answers().len(), 1);
    assert_eq!(session.answers()[0].symptom, asked);
    assert_eq!(session.answers()[0].answer, "Not sure");
    assert_eq!(session.asked(), [asked]);
    assert!(session.denied().is_empty());
}
