//! Knowledge-base location and load tolerances.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_prior_tolerance() -> f64 {
    1e-6
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct KnowledgeConfig {
    /// Directory holding the KB JSON files. Empty means the built-in demo KB.
    #[serde(default)]
    pub dir: String,

    /// How far the prior total may drift from 1 before it is renormalized.
    #[serde(default = "default_prior_tolerance")]
    pub prior_tolerance: f64,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            dir: String::new(),
            prior_tolerance: default_prior_tolerance(),
        }
    }
}

impl KnowledgeConfig {
    /// Whether an on-disk knowledge base is configured.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        !self.dir.is_empty()
    }

    /// The configured directory, if any.
    #[must_use]
    pub fn dir_path(&self) -> Option<PathBuf> {
        self.is_configured().then(|| PathBuf::from(&self.dir))
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a negative or non-finite tolerance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.prior_tolerance.is_finite() || self.prior_tolerance < 0.0 {
            return Err(ConfigError::invalid(
                "knowledge.prior_tolerance",
                format!("must be a non-negative number, got {}", self.prior_tolerance),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_dir_means_builtin() {
        let config = KnowledgeConfig::default();
        assert!(!config.is_configured());
        assert!(config.dir_path().is_none());
    }

    #[test]
    fn dir_path_round_trips() {
        let config = KnowledgeConfig {
            dir: "/srv/kb".into(),
            ..KnowledgeConfig::default()
        };
        assert_eq!(config.dir_path(), Some(PathBuf::from("/srv/kb")));
    }
}
