//! Free text → canonical symptom ids.

use triage_core::text::normalize_symptom;
use triage_kb::KnowledgeBase;

/// Turns a patient's description into canonical symptom ids.
///
/// The engine only consumes the output; hosts pick the implementation
/// (keyword table, NER model, ...) and pass it in.
pub trait SymptomExtractor: Send + Sync {
    /// Canonical symptoms mentioned in `text`, each at most once, in the order
    /// they first appear.
    fn extract(&self, text: &str) -> Vec<String>;
}

/// Whole-word, case-insensitive synonym matcher.
///
/// Every KB symptom and red-flag symptom matches itself; the KB synonym table
/// adds alternative phrasings. Overlapping matches resolve to the longest
/// phrase starting earliest ("severe headache" wins over "headache").
#[derive(Debug, Clone)]
pub struct SynonymExtractor {
    /// `(phrase, canonical)`, phrases lowercase and single-spaced.
    phrases: Vec<(String, String)>,
}

impl SynonymExtractor {
    #[must_use]
    pub fn from_kb(kb: &KnowledgeBase) -> Self {
        let mut phrases: Vec<(String, String)> = Vec::new();
        let mut add = |phrase: &str, canonical: &str| {
            let phrase = normalize_symptom(phrase);
            if !phrase.is_empty() && !phrases.iter().any(|(p, _)| *p == phrase) {
                phrases.push((phrase, canonical.to_string()));
            }
        };
        for symptom in kb.symptoms() {
            add(symptom, symptom);
        }
        for flag in kb.red_flags() {
            add(&flag.symptom, &flag.symptom);
        }
        for (canonical, synonyms) in kb.synonyms() {
            add(canonical, canonical);
            for synonym in synonyms {
                add(synonym, canonical);
            }
        }
        Self { phrases }
    }

    /// Number of distinct phrases the extractor recognizes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

impl SymptomExtractor for SynonymExtractor {
    fn extract(&self, text: &str) -> Vec<String> {
        let haystack = text.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();

        // (start, len, canonical)
        let mut hits: Vec<(usize, usize, &str)> = Vec::new();
        for (phrase, canonical) in &self.phrases {
            for (start, _) in haystack.match_indices(phrase.as_str()) {
                if is_word_boundary(&haystack, start, start + phrase.len()) {
                    hits.push((start, phrase.len(), canonical));
                }
            }
        }
        hits.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

        let mut found: Vec<String> = Vec::new();
        let mut covered = 0;
        for (start, len, canonical) in hits {
            if start < covered {
                continue;
            }
            covered = start + len;
            if !found.iter().any(|f| f == canonical) {
                found.push(canonical.to_string());
            }
        }
        found
    }
}

fn is_word_boundary(haystack: &str, start: usize, end: usize) -> bool {
    let before = haystack[..start].chars().next_back();
    let after = haystack[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn extractor() -> SynonymExtractor {
        SynonymExtractor::from_kb(&triage_kb::builtin().unwrap())
    }

    #[test]
    fn synonyms_map_to_canonical_ids() {
        let got = extractor().extract("I have a high temperature and I keep throwing up");
        assert_eq!(got, vec!["fever".to_string(), "vomiting".to_string()]);
    }

    #[test]
    fn matching_is_case_insensitive_and_ordered() {
        let got = extractor().extract("Coughing a lot. Also a HEADACHE since Monday.");
        assert_eq!(got, vec!["cough".to_string(), "headache".to_string()]);
    }

    #[test]
    fn longest_phrase_wins() {
        let got = extractor().extract("a severe headache");
        assert_eq!(got, vec!["severe headache".to_string()]);
    }

    #[test]
    fn partial_words_do_not_match() {
        assert!(extractor().extract("feverfew tea and weakling").is_empty());
    }

    #[test]
    fn each_symptom_reported_once() {
        let got = extractor().extract("fever, feverish, pyrexia");
        assert_eq!(got, vec!["fever".to_string()]);
    }

    #[test]
    fn red_flags_are_extracted() {
        let got = extractor().extract("crushing chest pain and I can't breathe");
        assert_eq!(got, vec!["chest pain".to_string(), "difficulty breathing".to_string()]);
    }

    #[test]
    fn unmatched_text_yields_nothing() {
        assert!(extractor().extract("just feeling off today").is_empty());
        assert!(extractor().extract("").is_empty());
    }

    #[test]
    fn usable_as_trait_object() {
        let boxed: Box<dyn SymptomExtractor> = Box::new(extractor());
        assert_eq!(boxed.extract("rash"), vec!["rash".to_string()]);
    }
}
