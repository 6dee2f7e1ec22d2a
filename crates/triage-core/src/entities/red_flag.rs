use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Severity;

/// A symptom whose presence overrides the question loop.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RedFlag {
    pub symptom: String,
    pub severity: Severity,
    pub action: String,
}

/// A red flag that fired during a session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RedFlagMatch {
    pub symptom: String,
    pub severity: Severity,
    pub action: String,
    /// Number of questions asked when the flag fired (0 = initial symptoms).
    pub at_question: usize,
}

impl RedFlagMatch {
    #[must_use]
    pub fn new(flag: &RedFlag, at_question: usize) -> Self {
        Self {
            symptom: flag.symptom.clone(),
            severity: flag.severity,
            action: flag.action.clone(),
            at_question,
        }
    }
}
