//! The validated, immutable knowledge base.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use triage_core::entities::{Disease, LikelihoodEntry, Question, RedFlag};
use triage_core::text::normalize_symptom;

use crate::error::KbError;

/// Question text and options as stored in `symptom_questions.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionTemplate {
    pub text: String,
    pub options: Vec<String>,
}

/// Raw KB tables before validation.
///
/// The loader and the built-in tables both produce this; [`KnowledgeBase::from_parts`]
/// is the only way to get a [`KnowledgeBase`].
#[derive(Debug, Clone, Default)]
pub struct KbParts {
    pub rows: Vec<LikelihoodEntry>,
    /// `None` means uniform priors.
    pub priors: Option<BTreeMap<String, f64>>,
    pub questions: BTreeMap<String, QuestionTemplate>,
    pub red_flags: Vec<RedFlag>,
    pub synonyms: BTreeMap<String, Vec<String>>,
}

/// Counts reported by `triage kb summary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KbSummary {
    pub diseases: usize,
    pub symptoms: usize,
    pub rows: usize,
    pub questions: usize,
    pub red_flags: usize,
    pub synonym_groups: usize,
}

/// Static tables loaded once at startup. Read-only afterwards.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    diseases: Vec<Disease>,
    rows: Vec<LikelihoodEntry>,
    symptoms: Vec<String>,
    questions: HashMap<String, QuestionTemplate>,
    red_flags: Vec<RedFlag>,
    synonyms: BTreeMap<String, Vec<String>>,
}

impl KnowledgeBase {
    /// Normalize and validate raw tables.
    ///
    /// Symptom strings are canonicalized with [`normalize_symptom`]. Diseases
    /// are ordered by first appearance in `rows`, followed by any disease that
    /// only appears in the priors. Priors whose total drifts from 1 by more
    /// than `prior_tolerance` are renormalized with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`KbError::Validation`] for empty tables, out-of-range weights
    /// or priors, duplicate rows, diseases without a prior, and malformed
    /// questions or red flags.
    pub fn from_parts(parts: KbParts, prior_tolerance: f64) -> Result<Self, KbError> {
        if parts.rows.is_empty() && parts.priors.as_ref().is_none_or(BTreeMap::is_empty) {
            return Err(KbError::Validation("no diseases defined".into()));
        }

        let rows = normalize_rows(parts.rows)?;

        let mut disease_ids: Vec<String> = Vec::new();
        let mut seen_diseases = HashSet::new();
        let mut symptoms: Vec<String> = Vec::new();
        let mut seen_symptoms = HashSet::new();
        for row in &rows {
            if seen_diseases.insert(row.disease.clone()) {
                disease_ids.push(row.disease.clone());
            }
            if seen_symptoms.insert(row.symptom.clone()) {
                symptoms.push(row.symptom.clone());
            }
        }

        let diseases = resolve_priors(disease_ids, &mut seen_diseases, parts.priors, prior_tolerance)?;
        let questions = normalize_questions(parts.questions)?;
        let red_flags = normalize_red_flags(parts.red_flags)?;
        let synonyms = normalize_synonyms(parts.synonyms);

        tracing::info!(
            diseases = diseases.len(),
            symptoms = symptoms.len(),
            rows = rows.len(),
            red_flags = red_flags.len(),
            "knowledge base ready"
        );

        Ok(Self {
            diseases,
            rows,
            symptoms,
            questions,
            red_flags,
            synonyms,
        })
    }

    /// Diseases with their priors, in KB order. Priors sum to 1.
    #[must_use]
    pub fn diseases(&self) -> &[Disease] {
        &self.diseases
    }

    /// Likelihood rows in KB order, symptoms canonicalized.
    #[must_use]
    pub fn rows(&self) -> &[LikelihoodEntry] {
        &self.rows
    }

    /// Symptom vocabulary in first-seen order.
    #[must_use]
    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    #[must_use]
    pub fn red_flags(&self) -> &[RedFlag] {
        &self.red_flags
    }

    /// Canonical symptom → synonyms, canonical keys normalized.
    #[must_use]
    pub const fn synonyms(&self) -> &BTreeMap<String, Vec<String>> {
        &self.synonyms
    }

    /// Whether `symptom` (canonical form) has at least one likelihood row.
    #[must_use]
    pub fn knows_symptom(&self, symptom: &str) -> bool {
        self.symptoms.iter().any(|s| s == symptom)
    }

    /// The question for `symptom`, falling back to the generic yes/no form.
    #[must_use]
    pub fn question_for(&self, symptom: &str) -> Question {
        self.questions
            .get(symptom)
            .map_or_else(
                || Question::default_for(symptom),
                |t| Question {
                    symptom: symptom.to_string(),
                    text: t.text.clone(),
                    options: t.options.clone(),
                },
            )
    }

    #[must_use]
    pub fn summary(&self) -> KbSummary {
        KbSummary {
            diseases: self.diseases.len(),
            symptoms: self.symptoms.len(),
            rows: self.rows.len(),
            questions: self.questions.len(),
            red_flags: self.red_flags.len(),
            synonym_groups: self.synonyms.len(),
        }
    }
}

fn normalize_rows(rows: Vec<LikelihoodEntry>) -> Result<Vec<LikelihoodEntry>, KbError> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let disease = row.disease.trim().to_string();
        let symptom = normalize_symptom(&row.symptom);
        if disease.is_empty() || symptom.is_empty() {
            return Err(KbError::Validation(format!(
                "row with empty disease or symptom: {:?} / {:?}",
                row.disease, row.symptom
            )));
        }
        if !(row.weight > 0.0 && row.weight < 1.0) {
            return Err(KbError::Validation(format!(
                "weight for ({disease}, {symptom}) must be in (0, 1), got {}",
                row.weight
            )));
        }
        if let Some(gain) = row.info_gain {
            if !gain.is_finite() || gain < 0.0 {
                return Err(KbError::Validation(format!(
                    "info_gain for {symptom} must be a non-negative number, got {gain}"
                )));
            }
        }
        if !seen.insert((disease.clone(), symptom.clone())) {
            return Err(KbError::Validation(format!(
                "duplicate row for ({disease}, {symptom})"
            )));
        }
        out.push(LikelihoodEntry {
            disease,
            symptom,
            weight: row.weight,
            info_gain: row.info_gain,
        });
    }
    Ok(out)
}

fn resolve_priors(
    mut disease_ids: Vec<String>,
    seen: &mut HashSet<String>,
    priors: Option<BTreeMap<String, f64>>,
    tolerance: f64,
) -> Result<Vec<Disease>, KbError> {
    let Some(priors) = priors else {
        #[allow(clippy::cast_precision_loss)]
        let uniform = 1.0 / disease_ids.len() as f64;
        return Ok(disease_ids
            .into_iter()
            .map(|id| Disease { id, prior: uniform })
            .collect());
    };

    let priors: BTreeMap<String, f64> = priors
        .into_iter()
        .map(|(k, v)| (k.trim().to_string(), v))
        .collect();

    for (id, prior) in &priors {
        if !prior.is_finite() || *prior < 0.0 {
            return Err(KbError::Validation(format!(
                "prior for {id} must be a non-negative number, got {prior}"
            )));
        }
        if seen.insert(id.clone()) {
            disease_ids.push(id.clone());
        }
    }

    let mut diseases = Vec::with_capacity(disease_ids.len());
    for id in disease_ids {
        let prior = priors
            .get(&id)
            .copied()
            .ok_or_else(|| KbError::Validation(format!("no prior for disease {id}")))?;
        diseases.push(Disease { id, prior });
    }

    let total: f64 = diseases.iter().map(|d| d.prior).sum();
    if total <= 0.0 {
        return Err(KbError::Validation("priors sum to zero".into()));
    }
    if (total - 1.0).abs() > tolerance {
        tracing::warn!(total, "disease priors do not sum to 1; renormalizing");
        for disease in &mut diseases {
            disease.prior /= total;
        }
    }
    Ok(diseases)
}

fn normalize_questions(
    questions: BTreeMap<String, QuestionTemplate>,
) -> Result<HashMap<String, QuestionTemplate>, KbError> {
    let mut out = HashMap::with_capacity(questions.len());
    for (symptom, template) in questions {
        let symptom = normalize_symptom(&symptom);
        if template.text.trim().is_empty() || template.options.is_empty() {
            return Err(KbError::Validation(format!(
                "question for {symptom} needs text and at least one option"
            )));
        }
        out.insert(symptom, template);
    }
    Ok(out)
}

fn normalize_red_flags(flags: Vec<RedFlag>) -> Result<Vec<RedFlag>, KbError> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(flags.len());
    for flag in flags {
        let symptom = normalize_symptom(&flag.symptom);
        if symptom.is_empty() {
            return Err(KbError::Validation("red flag with empty symptom".into()));
        }
        if !seen.insert(symptom.clone()) {
            return Err(KbError::Validation(format!("duplicate red flag for {symptom}")));
        }
        out.push(RedFlag { symptom, ..flag });
    }
    Ok(out)
}

fn normalize_synonyms(synonyms: BTreeMap<String, Vec<String>>) -> BTreeMap<String, Vec<String>> {
    synonyms
        .into_iter()
        .map(|(canonical, words)| {
            let words = words
                .iter()
                .map(|w| normalize_symptom(w))
                .filter(|w| !w.is_empty())
                .collect();
            (normalize_symptom(&canonical), words)
        })
        .filter(|(canonical, _)| !canonical.is_empty())
        .collect()
}
