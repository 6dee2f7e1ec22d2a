//! Emergency symptom lookup.

use std::collections::HashMap;

use triage_core::entities::RedFlag;
use triage_kb::KnowledgeBase;

/// Red flags keyed by canonical symptom.
#[derive(Debug, Clone, Default)]
pub struct RedFlagIndex {
    flags: HashMap<String, RedFlag>,
}

impl RedFlagIndex {
    #[must_use]
    pub fn from_kb(kb: &KnowledgeBase) -> Self {
        Self::new(kb.red_flags().iter().cloned())
    }

    pub fn new(flags: impl IntoIterator<Item = RedFlag>) -> Self {
        Self {
            flags: flags.into_iter().map(|f| (f.symptom.clone(), f)).collect(),
        }
    }

    #[must_use]
    pub fn get(&self, symptom: &str) -> Option<&RedFlag> {
        self.flags.get(symptom)
    }

    /// Flags hit by `symptoms`, in input order.
    pub fn check<'a, I, S>(&'a self, symptoms: I) -> Vec<&'a RedFlag>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        symptoms
            .into_iter()
            .filter_map(|s| self.flags.get(s.as_ref()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use triage_core::enums::Severity;

    use super::*;

    #[test]
    fn check_reports_hits_in_input_order() {
        let index = RedFlagIndex::from_kb(&triage_kb::builtin().unwrap());
        let hits = index.check(["fever", "shortness of breath", "chest pain"]);
        let names: Vec<&str> = hits.iter().map(|f| f.symptom.as_str()).collect();
        assert_eq!(names, vec!["shortness of breath", "chest pain"]);
        assert_eq!(hits[1].severity, Severity::Critical);
    }

    #[test]
    fn ordinary_symptoms_are_not_flags() {
        let index = RedFlagIndex::from_kb(&triage_kb::builtin().unwrap());
        assert!(index.check(["fever", "cough"]).is_empty());
        assert!(index.get("rash").is_none());
        assert_eq!(index.len(), 9);
    }
}
