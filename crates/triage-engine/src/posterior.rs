//! Naive-Bayes posterior over diseases.

use triage_core::responses::RankedDisease;

use crate::information::entropy_bits;
use crate::likelihood::LikelihoodModel;

/// A normalized probability vector indexed like [`LikelihoodModel::diseases`].
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution(Vec<f64>);

impl Distribution {
    /// Equal mass on every disease.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn uniform(len: usize) -> Self {
        if len == 0 {
            return Self(Vec::new());
        }
        Self(vec![1.0 / len as f64; len])
    }

    /// Scale unnormalized mass to sum to 1.
    ///
    /// Falls back to [`Self::uniform`] when the total is zero, negative, or
    /// not finite (underflow after many small likelihood factors).
    #[must_use]
    pub fn normalized(mass: Vec<f64>) -> Self {
        let total: f64 = mass.iter().sum();
        if !total.is_finite() || total <= 0.0 {
            tracing::debug!(total, diseases = mass.len(), "posterior mass degenerate; using uniform");
            return Self::uniform(mass.len());
        }
        Self(mass.into_iter().map(|m| m / total).collect())
    }

    #[must_use]
    pub fn probabilities(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn get(&self, disease: usize) -> f64 {
        self.0.get(disease).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Shannon entropy in bits.
    #[must_use]
    pub fn entropy(&self) -> f64 {
        entropy_bits(&self.0)
    }

    /// Disease indices by descending probability; equal mass keeps KB order.
    #[must_use]
    pub fn ranked_indices(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.0.len()).collect();
        order.sort_by(|&a, &b| self.0[b].total_cmp(&self.0[a]));
        order
    }

    /// Most probable disease index and its probability.
    #[must_use]
    pub fn top(&self) -> Option<(usize, f64)> {
        self.ranked_indices().first().map(|&i| (i, self.0[i]))
    }

    /// Named, descending view for responses.
    #[must_use]
    pub fn ranked(&self, model: &LikelihoodModel) -> Vec<RankedDisease> {
        self.ranked_indices()
            .into_iter()
            .map(|i| RankedDisease {
                disease: model.diseases()[i].clone(),
                probability: self.0[i],
            })
            .collect()
    }
}

/// Posterior from `prior` given confirmed and denied symptoms.
///
/// Each confirmed symptom multiplies a disease's mass by `P(s|d)`, each denied
/// one by `1 - P(s|d)`; unseen pairs use the model's smoothing constant.
#[must_use]
pub fn posterior<S: AsRef<str>>(
    model: &LikelihoodModel,
    prior: &[f64],
    confirmed: &[S],
    denied: &[S],
) -> Distribution {
    let mass = (0..model.len())
        .map(|d| {
            let mut p = prior.get(d).copied().unwrap_or(0.0);
            for s in confirmed {
                p *= model.weight_at(d, s.as_ref());
            }
            for s in denied {
                p *= 1.0 - model.weight_at(d, s.as_ref());
            }
            p
        })
        .collect();
    Distribution::normalized(mass)
}
