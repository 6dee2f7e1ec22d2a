//! Loading a knowledge base from a directory of JSON files.
//!
//! Layout:
//!
//! ```text
//! kb/
//! ├── disease_symptom.json     [{disease, symptom, weight, info_gain?}]   (required)
//! ├── disease_priors.json      {disease: prior}                           (optional)
//! ├── symptom_questions.json   {symptom: {text, options}}                 (optional)
//! ├── red_flags.json           [{symptom, severity, action}]              (optional)
//! └── symptom_synonyms.json    {canonical: [synonym]}                     (optional)
//! ```

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use triage_config::KnowledgeConfig;

use crate::base::{KbParts, KnowledgeBase};
use crate::builtin;
use crate::error::KbError;

pub const ROWS_FILE: &str = "disease_symptom.json";
pub const PRIORS_FILE: &str = "disease_priors.json";
pub const QUESTIONS_FILE: &str = "symptom_questions.json";
pub const RED_FLAGS_FILE: &str = "red_flags.json";
pub const SYNONYMS_FILE: &str = "symptom_synonyms.json";

/// Load the KB named by `config`, or the built-in tables when no directory is set.
///
/// # Errors
///
/// Propagates [`load_dir`] errors.
pub fn load(config: &KnowledgeConfig) -> Result<KnowledgeBase, KbError> {
    match config.dir_path() {
        Some(dir) => load_dir(&dir, config.prior_tolerance),
        None => {
            tracing::debug!("no knowledge dir configured; using built-in tables");
            KnowledgeBase::from_parts(builtin::parts(), config.prior_tolerance)
        }
    }
}

/// Load and validate a KB directory.
///
/// # Errors
///
/// Returns [`KbError::MissingFile`] without `disease_symptom.json`,
/// [`KbError::Io`] / [`KbError::Parse`] for unreadable files, and
/// [`KbError::Validation`] from [`KnowledgeBase::from_parts`].
pub fn load_dir(dir: &Path, prior_tolerance: f64) -> Result<KnowledgeBase, KbError> {
    tracing::info!(dir = %dir.display(), "loading knowledge base");

    let rows_path = dir.join(ROWS_FILE);
    if !rows_path.exists() {
        return Err(KbError::MissingFile(rows_path));
    }

    let parts = KbParts {
        rows: read_json(&rows_path)?,
        priors: read_optional(dir.join(PRIORS_FILE))?,
        questions: read_optional(dir.join(QUESTIONS_FILE))?.unwrap_or_default(),
        red_flags: read_optional(dir.join(RED_FLAGS_FILE))?.unwrap_or_default(),
        synonyms: read_optional(dir.join(SYNONYMS_FILE))?.unwrap_or_default(),
    };

    KnowledgeBase::from_parts(parts, prior_tolerance)
}

fn read_optional<T: DeserializeOwned>(path: PathBuf) -> Result<Option<T>, KbError> {
    if path.exists() {
        read_json(&path).map(Some)
    } else {
        tracing::debug!(path = %path.display(), "optional knowledge file absent");
        Ok(None)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, KbError> {
    let raw = std::fs::read_to_string(path).map_err(|source| KbError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| KbError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
