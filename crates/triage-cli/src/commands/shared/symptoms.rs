use triage_engine::SymptomExtractor;

use crate::cli::root_commands::SymptomInput;

/// Explicit `--symptom` values first, then whatever `--text` mentions.
///
/// Duplicates are left in; the engine normalizes and dedupes on start.
pub fn collect(input: &SymptomInput, extractor: &dyn SymptomExtractor) -> Vec<String> {
    let mut symptoms = input.symptoms.clone();
    if let Some(text) = &input.text {
        let extracted = extractor.extract(text);
        tracing::debug!(?extracted, "symptoms extracted from text");
        symptoms.extend(extracted);
    }
    symptoms
}
