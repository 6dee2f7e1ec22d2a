use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A follow-up question about one symptom.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Question {
    pub symptom: String,
    pub text: String,
    pub options: Vec<String>,
}

impl Question {
    /// Answer options used when the knowledge base has no entry for a symptom.
    pub const DEFAULT_OPTIONS: [&'static str; 3] = ["Yes", "No", "Not sure"];

    /// The generic yes/no/not-sure question for `symptom`.
    #[must_use]
    pub fn default_for(symptom: &str) -> Self {
        Self {
            symptom: symptom.to_string(),
            text: format!("Do you have {symptom}?"),
            options: Self::DEFAULT_OPTIONS.iter().map(ToString::to_string).collect(),
        }
    }
}
