//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default number of ranked diseases shown by hosts.
const fn default_ranked_limit() -> usize {
    10
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// How many ranked diseases hosts print alongside a question.
    #[serde(default = "default_ranked_limit")]
    pub ranked_limit: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            ranked_limit: default_ranked_limit(),
        }
    }
}
