use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::AnswerKind;

/// A question the session asked and how the answer was read.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AnsweredQuestion {
    pub symptom: String,
    pub answer: String,
    pub kind: AnswerKind,
    pub answered_at: DateTime<Utc>,
}
