//! Built-in demo tables: eight common conditions, uniform priors, nine red flags.
//!
//! Used when no knowledge directory is configured, and by tests that need a
//! realistic KB without touching the filesystem.

use std::collections::BTreeMap;

use triage_core::entities::{LikelihoodEntry, RedFlag};
use triage_core::enums::Severity;

use crate::base::{KbParts, QuestionTemplate};

const ROWS: &[(&str, &str, f64)] = &[
    ("Dengue", "fever", 0.95),
    ("Dengue", "headache", 0.85),
    ("Dengue", "body ache", 0.80),
    ("Dengue", "joint pain", 0.75),
    ("Dengue", "rash", 0.50),
    ("Dengue", "nausea", 0.45),
    ("Malaria", "fever", 0.95),
    ("Malaria", "chills", 0.90),
    ("Malaria", "sweating", 0.75),
    ("Malaria", "headache", 0.70),
    ("Malaria", "fatigue", 0.65),
    ("Common Cold", "runny nose", 0.90),
    ("Common Cold", "sneezing", 0.85),
    ("Common Cold", "sore throat", 0.80),
    ("Common Cold", "cough", 0.70),
    ("Common Cold", "mild fever", 0.40),
    ("Influenza", "fever", 0.90),
    ("Influenza", "body ache", 0.85),
    ("Influenza", "fatigue", 0.80),
    ("Influenza", "cough", 0.75),
    ("Influenza", "headache", 0.70),
    ("COVID-19", "fever", 0.85),
    ("COVID-19", "cough", 0.80),
    ("COVID-19", "loss of taste", 0.75),
    ("COVID-19", "loss of smell", 0.75),
    ("COVID-19", "fatigue", 0.70),
    ("COVID-19", "shortness of breath", 0.60),
    ("Typhoid", "fever", 0.95),
    ("Typhoid", "abdominal pain", 0.80),
    ("Typhoid", "headache", 0.70),
    ("Typhoid", "weakness", 0.65),
    ("Typhoid", "constipation", 0.50),
    ("Gastroenteritis", "diarrhea", 0.90),
    ("Gastroenteritis", "vomiting", 0.85),
    ("Gastroenteritis", "abdominal pain", 0.80),
    ("Gastroenteritis", "nausea", 0.75),
    ("Gastroenteritis", "fever", 0.50),
    ("Migraine", "severe headache", 0.95),
    ("Migraine", "nausea", 0.70),
    ("Migraine", "light sensitivity", 0.75),
    ("Migraine", "vision changes", 0.50),
];

const RED_FLAGS: &[(&str, Severity, &str)] = &[
    ("chest pain", Severity::Critical, "Seek emergency care immediately"),
    ("difficulty breathing", Severity::Critical, "Seek emergency care immediately"),
    ("shortness of breath", Severity::High, "Consult doctor urgently"),
    ("severe headache", Severity::High, "Consult doctor urgently"),
    ("confusion", Severity::Critical, "Seek emergency care immediately"),
    ("loss of consciousness", Severity::Critical, "Call emergency services"),
    ("severe bleeding", Severity::Critical, "Seek emergency care immediately"),
    ("high fever", Severity::High, "Consult doctor within 24 hours"),
    ("persistent vomiting", Severity::High, "Consult doctor urgently"),
];

const QUESTIONS: &[(&str, &str, &[&str])] = &[
    (
        "fever",
        "Do you have a fever? If so, how high?",
        &["Mild (99-100°F)", "Moderate (100-102°F)", "High (>102°F)", "No", "Not sure"],
    ),
    (
        "headache",
        "Do you have a headache? If so, how bad is it?",
        &["Mild", "Moderate", "Severe", "No", "Not sure"],
    ),
    (
        "cough",
        "Have you been coughing?",
        &["Yes, dry cough", "Yes, wet/productive cough", "No", "Not sure"],
    ),
    (
        "body ache",
        "Do you have aches in your joints or muscles?",
        &["Yes", "No", "Not sure"],
    ),
    (
        "fatigue",
        "Have you been feeling unusually tired? If so, how much?",
        &["Mild tiredness", "Moderate - affecting daily activities", "Severe - bed-bound", "No", "Not sure"],
    ),
    (
        "rash",
        "Have you noticed a rash or red spots on your skin?",
        &["Yes", "No", "Not sure"],
    ),
    (
        "nausea",
        "Have you been feeling nauseous?",
        &["Yes", "No", "Not sure"],
    ),
];

const SYNONYMS: &[(&str, &[&str])] = &[
    ("fever", &["fever", "temperature", "feverish", "pyrexia", "febrile", "high temperature"]),
    ("headache", &["headache", "head pain", "head ache", "head hurts"]),
    ("cough", &["cough", "coughing", "dry cough", "wet cough"]),
    ("body ache", &["body ache", "body pain", "muscle pain", "aching", "soreness"]),
    ("fatigue", &["fatigue", "tired", "exhausted", "lethargy"]),
    ("chills", &["chills", "shivering", "cold sweats", "rigors"]),
    ("nausea", &["nausea", "nauseous", "queasy", "sick feeling"]),
    ("vomiting", &["vomiting", "vomit", "throwing up", "puking"]),
    ("diarrhea", &["diarrhea", "loose stools", "watery stools", "loose motion"]),
    ("rash", &["rash", "skin rash", "spots", "eruption"]),
    ("sore throat", &["sore throat", "throat pain", "painful throat"]),
    ("runny nose", &["runny nose", "nasal discharge", "stuffy nose", "blocked nose"]),
    ("joint pain", &["joint pain", "joint ache", "arthralgia"]),
    ("chest pain", &["chest pain", "chest tightness", "chest discomfort"]),
    ("shortness of breath", &["shortness of breath", "breathless", "dyspnea"]),
    ("difficulty breathing", &["difficulty breathing", "trouble breathing", "can't breathe"]),
    ("loss of taste", &["loss of taste", "can't taste", "ageusia"]),
    ("loss of smell", &["loss of smell", "can't smell", "anosmia"]),
    ("abdominal pain", &["abdominal pain", "stomach pain", "belly pain", "stomach ache"]),
    ("weakness", &["weakness", "weak"]),
];

/// The built-in tables as unvalidated parts.
#[must_use]
pub fn parts() -> KbParts {
    KbParts {
        rows: ROWS
            .iter()
            .map(|(disease, symptom, weight)| LikelihoodEntry {
                disease: (*disease).to_string(),
                symptom: (*symptom).to_string(),
                weight: *weight,
                info_gain: None,
            })
            .collect(),
        priors: None,
        questions: QUESTIONS
            .iter()
            .map(|(symptom, text, options)| {
                (
                    (*symptom).to_string(),
                    QuestionTemplate {
                        text: (*text).to_string(),
                        options: options.iter().map(ToString::to_string).collect(),
                    },
                )
            })
            .collect(),
        red_flags: RED_FLAGS
            .iter()
            .map(|(symptom, severity, action)| RedFlag {
                symptom: (*symptom).to_string(),
                severity: *severity,
                action: (*action).to_string(),
            })
            .collect(),
        synonyms: SYNONYMS
            .iter()
            .map(|(canonical, words)| {
                (
                    (*canonical).to_string(),
                    words.iter().map(ToString::to_string).collect(),
                )
            })
            .collect::<BTreeMap<_, _>>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::KnowledgeBase;

    #[test]
    fn builtin_tables_validate() {
        let kb = KnowledgeBase::from_parts(parts(), 1e-6).expect("built-in KB is valid");
        let summary = kb.summary();
        assert_eq!(summary.diseases, 8);
        assert_eq!(summary.rows, ROWS.len());
        assert_eq!(summary.red_flags, 9);
        let total: f64 = kb.diseases().iter().map(|d| d.prior).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn builtin_red_flags_include_chest_pain() {
        let kb = KnowledgeBase::from_parts(parts(), 1e-6).unwrap();
        assert!(kb.red_flags().iter().any(|f| f.symptom == "chest pain"
            && f.severity == Severity::Critical));
    }
}
