//! P(symptom | disease) lookup with smoothing for unseen pairs.

use std::collections::HashMap;

use triage_kb::KnowledgeBase;

/// Read-only likelihood table built once from the knowledge base.
///
/// Diseases are addressed by their index in [`Self::diseases`]; every
/// [`crate::posterior::Distribution`] uses the same indexing. Pairs missing
/// from the KB resolve to the smoothing constant, so every posterior term
/// stays strictly positive.
#[derive(Debug, Clone)]
pub struct LikelihoodModel {
    diseases: Vec<String>,
    priors: Vec<f64>,
    disease_index: HashMap<String, usize>,
    weights: Vec<HashMap<String, f64>>,
    row_order: Vec<Vec<String>>,
    training_gain: HashMap<String, f64>,
    smoothing: f64,
}

impl LikelihoodModel {
    /// Build the table. `smoothing` must already be validated to lie in (0, 1).
    #[must_use]
    pub fn from_kb(kb: &KnowledgeBase, smoothing: f64) -> Self {
        let diseases: Vec<String> = kb.diseases().iter().map(|d| d.id.clone()).collect();
        let priors = kb.diseases().iter().map(|d| d.prior).collect();
        let disease_index: HashMap<String, usize> = diseases
            .iter()
            .enumerate()
            .map(|(i, d)| (d.clone(), i))
            .collect();

        let mut weights = vec![HashMap::new(); diseases.len()];
        let mut row_order = vec![Vec::new(); diseases.len()];
        let mut training_gain = HashMap::new();

        for row in kb.rows() {
            let Some(&idx) = disease_index.get(&row.disease) else {
                continue;
            };
            weights[idx].insert(row.symptom.clone(), row.weight);
            row_order[idx].push(row.symptom.clone());
            if let Some(gain) = row.info_gain {
                training_gain.entry(row.symptom.clone()).or_insert(gain);
            }
        }

        Self {
            diseases,
            priors,
            disease_index,
            weights,
            row_order,
            training_gain,
            smoothing,
        }
    }

    /// P(symptom | disease), or the smoothing constant for unseen pairs and
    /// unknown diseases.
    #[must_use]
    pub fn weight(&self, disease: &str, symptom: &str) -> f64 {
        self.disease_index
            .get(disease)
            .map_or(self.smoothing, |&idx| self.weight_at(idx, symptom))
    }

    /// [`Self::weight`] by disease index.
    #[must_use]
    pub fn weight_at(&self, disease: usize, symptom: &str) -> f64 {
        self.row_weight(disease, symptom).unwrap_or(self.smoothing)
    }

    /// The KB weight for a pair, without smoothing.
    #[must_use]
    pub fn row_weight(&self, disease: usize, symptom: &str) -> Option<f64> {
        self.weights.get(disease).and_then(|w| w.get(symptom)).copied()
    }

    /// Symptoms with a KB row for `disease`, in KB order.
    #[must_use]
    pub fn disease_symptoms(&self, disease: usize) -> &[String] {
        self.row_order.get(disease).map_or(&[], Vec::as_slice)
    }

    /// Offline-trained information gain for `symptom`, if the KB carries one.
    #[must_use]
    pub fn training_gain(&self, symptom: &str) -> Option<f64> {
        self.training_gain.get(symptom).copied()
    }

    #[must_use]
    pub fn diseases(&self) -> &[String] {
        &self.diseases
    }

    #[must_use]
    pub fn disease_index(&self, disease: &str) -> Option<usize> {
        self.disease_index.get(disease).copied()
    }

    /// KB priors, indexed like [`Self::diseases`].
    #[must_use]
    pub fn priors(&self) -> &[f64] {
        &self.priors
    }

    #[must_use]
    pub const fn smoothing(&self) -> f64 {
        self.smoothing
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.diseases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty()
    }
}
