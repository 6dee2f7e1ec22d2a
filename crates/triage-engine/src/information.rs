//! Entropy and expected information gain of a yes/no symptom question.

use crate::likelihood::LikelihoodModel;
use crate::posterior::Distribution;

/// Shannon entropy `-Σ p·log2 p`, skipping zero entries.
#[must_use]
pub fn entropy_bits(probabilities: &[f64]) -> f64 {
    probabilities
        .iter()
        .filter(|&&p| p > 0.0)
        .map(|&p| -p * p.log2())
        .sum()
}

/// Expected entropy reduction from asking about `symptom`, floored at 0.
///
/// `p_yes = Σ p(d)·w(d,s)`; the yes branch re-weights by `w`, the no branch
/// by `1 - w`.
#[must_use]
pub fn expected_information_gain(
    model: &LikelihoodModel,
    current: &Distribution,
    symptom: &str,
) -> f64 {
    let before = current.entropy();

    let mut yes = Vec::with_capacity(current.len());
    let mut no = Vec::with_capacity(current.len());
    let mut p_yes = 0.0;
    for (d, &p) in current.probabilities().iter().enumerate() {
        let w = model.weight_at(d, symptom);
        yes.push(p * w);
        no.push(p * (1.0 - w));
        p_yes += p * w;
    }

    let h_yes = Distribution::normalized(yes).entropy();
    let h_no = Distribution::normalized(no).entropy();
    let expected = p_yes.mul_add(h_yes, (1.0 - p_yes) * h_no);
    (before - expected).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::likelihood::test_support::{fever_cough, kb};
    use crate::posterior::posterior;

    #[test]
    fn entropy_of_fair_coin_is_one_bit() {
        assert!((entropy_bits(&[0.5, 0.5]) - 1.0).abs() < 1e-12);
        assert!(entropy_bits(&[1.0, 0.0]).abs() < 1e-12);
        assert!(entropy_bits(&[]).abs() < 1e-12);
    }

    #[test]
    fn entropy_of_uniform_four_is_two_bits() {
        let d = Distribution::uniform(4);
        assert!((d.entropy() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn discriminating_symptom_has_positive_gain() {
        let model = LikelihoodModel::from_kb(&fever_cough(), 0.01);
        let prior = posterior::<&str>(&model, model.priors(), &[], &[]);
        let gain = expected_information_gain(&model, &prior, "fever");
        // 1 - H(0.9, 0.1)
        assert!((gain - 0.531_004).abs() < 1e-3, "gain = {gain}");
    }

    #[test]
    fn non_discriminating_symptom_has_no_gain() {
        let kb = kb(&[("A", "tired", 0.5), ("B", "tired", 0.5)], None);
        let model = LikelihoodModel::from_kb(&kb, 0.01);
        let prior = posterior::<&str>(&model, model.priors(), &[], &[]);
        let gain = expected_information_gain(&model, &prior, "tired");
        assert!(gain.abs() < 1e-12);
        assert!(gain >= 0.0);
    }

    #[test]
    fn certain_distribution_has_no_gain() {
        let model = LikelihoodModel::from_kb(&fever_cough(), 0.01);
        let certain = Distribution::normalized(vec![1.0, 0.0]);
        assert!(expected_information_gain(&model, &certain, "cough").abs() < 1e-12);
    }
}
