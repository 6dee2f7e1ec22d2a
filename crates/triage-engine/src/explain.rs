//! Human-readable reasoning behind a session's ranking.
//!
//! Nothing here feeds back into the posterior; it only reads the model and
//! the session's evidence.

use std::collections::HashMap;

use serde::Serialize;
use triage_core::enums::ConfidenceLabel;
use triage_core::responses::RankedDisease;

use crate::engine::TriageEngine;
use crate::likelihood::LikelihoodModel;
use crate::session::TriageSession;

/// Share of the population assumed to show any given symptom.
pub const POPULATION_BASE_RATE: f64 = 0.2;

const STRONG_SUPPORT: f64 = 0.7;
const MODERATE_SUPPORT: f64 = 0.4;
const ABSENCE_EVIDENCE: f64 = 0.7;
const KEY_SYMPTOM: f64 = 0.8;
const MIN_CHANGE: f64 = 0.01;
const MAX_CHANGES: usize = 5;

/// How strongly a confirmed symptom points at a disease.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contribution {
    pub symptom: String,
    /// `P(symptom | disease) / POPULATION_BASE_RATE`, two decimals.
    pub likelihood_ratio: f64,
}

/// One step of the rule trace for a disease.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEntry {
    /// Confirmed symptom with a high likelihood for the disease.
    StrongSupport { symptom: String, weight: f64 },
    /// Confirmed symptom with a moderate likelihood.
    ModerateSupport { symptom: String, weight: f64 },
    /// Denied symptom the disease usually presents with.
    AbsenceEvidence { symptom: String, weight: f64 },
    /// Characteristic symptom nobody asked about yet.
    Unassessed { symptom: String, weight: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityChange {
    pub disease: String,
    pub previous: f64,
    pub current: f64,
    pub change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiseaseExplanation {
    pub disease: String,
    pub probability: f64,
    pub confidence: ConfidenceLabel,
    pub contributions: Vec<Contribution>,
    pub trace: Vec<TraceEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub session_id: String,
    pub confirmed: Vec<String>,
    pub denied: Vec<String>,
    pub diseases: Vec<DiseaseExplanation>,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Likelihood ratios of the confirmed symptoms for `disease`, strongest first.
#[must_use]
pub fn symptom_contributions<S: AsRef<str>>(
    model: &LikelihoodModel,
    disease: &str,
    confirmed: &[S],
) -> Vec<Contribution> {
    let mut out: Vec<Contribution> = confirmed
        .iter()
        .map(|s| Contribution {
            symptom: s.as_ref().to_string(),
            likelihood_ratio: round2(model.weight(disease, s.as_ref()) / POPULATION_BASE_RATE),
        })
        .collect();
    out.sort_by(|a, b| b.likelihood_ratio.total_cmp(&a.likelihood_ratio));
    out
}

/// Rule trace for `disease`: supporting, contradicting and unassessed symptoms.
///
/// Only KB rows count; smoothed pairs never appear in the trace.
#[must_use]
pub fn rule_trace<S: AsRef<str>>(
    model: &LikelihoodModel,
    disease: &str,
    confirmed: &[S],
    denied: &[S],
) -> Vec<TraceEntry> {
    let Some(idx) = model.disease_index(disease) else {
        return Vec::new();
    };
    let row = |s: &str| model.row_weight(idx, s).unwrap_or(0.0);
    let mut trace = Vec::new();

    for s in confirmed {
        let (symptom, weight) = (s.as_ref(), row(s.as_ref()));
        if weight > STRONG_SUPPORT {
            trace.push(TraceEntry::StrongSupport { symptom: symptom.into(), weight });
        } else if weight > MODERATE_SUPPORT {
            trace.push(TraceEntry::ModerateSupport { symptom: symptom.into(), weight });
        }
    }
    for s in denied {
        let (symptom, weight) = (s.as_ref(), row(s.as_ref()));
        if weight > ABSENCE_EVIDENCE {
            trace.push(TraceEntry::AbsenceEvidence { symptom: symptom.into(), weight });
        }
    }
    let assessed = |s: &str| {
        confirmed.iter().any(|c| c.as_ref() == s) || denied.iter().any(|d| d.as_ref() == s)
    };
    for symptom in model.disease_symptoms(idx) {
        let weight = row(symptom);
        if weight > KEY_SYMPTOM && !assessed(symptom) {
            trace.push(TraceEntry::Unassessed { symptom: symptom.clone(), weight });
        }
    }
    trace
}

/// Per-disease shifts between two rankings larger than 0.01, biggest first,
/// at most five.
#[must_use]
pub fn probability_changes(before: &[RankedDisease], after: &[RankedDisease]) -> Vec<ProbabilityChange> {
    let previous: HashMap<&str, f64> = before
        .iter()
        .map(|r| (r.disease.as_str(), r.probability))
        .collect();
    let mut changes: Vec<ProbabilityChange> = after
        .iter()
        .filter_map(|r| {
            let old = previous.get(r.disease.as_str()).copied().unwrap_or(0.0);
            let change = r.probability - old;
            (change.abs() > MIN_CHANGE).then(|| ProbabilityChange {
                disease: r.disease.clone(),
                previous: old,
                current: r.probability,
                change,
            })
        })
        .collect();
    changes.sort_by(|a, b| b.change.abs().total_cmp(&a.change.abs()));
    changes.truncate(MAX_CHANGES);
    changes
}

/// Explain the `top` most probable diseases of `session`.
#[must_use]
pub fn explain(engine: &TriageEngine, session: &TriageSession, top: usize) -> Explanation {
    let model = engine.model();
    let diseases = session
        .ranked()
        .iter()
        .take(top)
        .map(|r| DiseaseExplanation {
            disease: r.disease.clone(),
            probability: r.probability,
            confidence: ConfidenceLabel::from_probability(r.probability),
            contributions: symptom_contributions(model, &r.disease, session.confirmed()),
            trace: rule_trace(model, &r.disease, session.confirmed(), session.denied()),
        })
        .collect();
    Explanation {
        session_id: session.id().to_string(),
        confirmed: session.confirmed().to_vec(),
        denied: session.denied().to_vec(),
        diseases,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::likelihood::test_support::kb;

    fn model() -> LikelihoodModel {
        let kb = kb(
            &[
                ("Flu", "fever", 0.9),
                ("Flu", "cough", 0.5),
                ("Flu", "body ache", 0.85),
                ("Flu", "rash", 0.2),
            ],
            None,
        );
        LikelihoodModel::from_kb(&kb, 0.01)
    }

    #[test]
    fn contributions_are_ratios_to_base_rate() {
        let got = symptom_contributions(&model(), "Flu", &["cough", "fever", "sneezing"]);
        assert_eq!(
            got,
            vec![
                Contribution { symptom: "fever".into(), likelihood_ratio: 4.5 },
                Contribution { symptom: "cough".into(), likelihood_ratio: 2.5 },
                Contribution { symptom: "sneezing".into(), likelihood_ratio: 0.05 },
            ]
        );
    }

    #[test]
    fn trace_classifies_evidence() {
        let trace = rule_trace(&model(), "Flu", &["fever", "cough", "rash"], &["body ache"]);
        assert_eq!(
            trace,
            vec![
                TraceEntry::StrongSupport { symptom: "fever".into(), weight: 0.9 },
                TraceEntry::ModerateSupport { symptom: "cough".into(), weight: 0.5 },
                TraceEntry::AbsenceEvidence { symptom: "body ache".into(), weight: 0.85 },
            ]
        );
    }

    #[test]
    fn trace_lists_unassessed_key_symptoms() {
        let trace = rule_trace::<&str>(&model(), "Flu", &[], &[]);
        assert_eq!(
            trace,
            vec![
                TraceEntry::Unassessed { symptom: "fever".into(), weight: 0.9 },
                TraceEntry::Unassessed { symptom: "body ache".into(), weight: 0.85 },
            ]
        );
        assert!(rule_trace::<&str>(&model(), "Nope", &[], &[]).is_empty());
    }

    #[test]
    fn trace_entries_serialize_with_kind_tag() {
        let entry = TraceEntry::AbsenceEvidence { symptom: "rash".into(), weight: 0.75 };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "absence_evidence", "symptom": "rash", "weight": 0.75})
        );
    }

    #[test]
    fn changes_are_filtered_and_sorted() {
        let r = |d: &str, p: f64| RankedDisease { disease: d.into(), probability: p };
        let before = vec![r("A", 0.5), r("B", 0.3), r("C", 0.2)];
        let after = vec![r("A", 0.8), r("B", 0.195), r("C", 0.005)];
        let got = probability_changes(&before, &after);
        let names: Vec<&str> = got.iter().map(|c| c.disease.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "B"]);
        assert!((got[0].change - 0.3).abs() < 1e-9);

        let same = probability_changes(&before, &before);
        assert!(same.is_empty());
    }
}
