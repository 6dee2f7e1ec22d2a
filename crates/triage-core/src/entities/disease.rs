use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A candidate condition and its prior probability P(D).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Disease {
    pub id: String,
    pub prior: f64,
}

/// One `(disease, symptom) → P(symptom | disease)` row from the knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LikelihoodEntry {
    pub disease: String,
    pub symptom: String,
    pub weight: f64,
    /// Information gain of the symptom computed offline, if the KB ships one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_gain: Option<f64>,
}
