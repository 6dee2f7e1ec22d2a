//! # triage-kb
//!
//! Knowledge-base loading and validation for the triage engine.
//!
//! The knowledge base is pure data: diseases with priors, per-(disease, symptom)
//! likelihood rows, question templates, red flags, and symptom synonyms. It is
//! loaded once at startup, validated, and then shared read-only.
//!
//! Sources:
//! - a directory of JSON files (see [`loader`] for the layout), or
//! - the built-in demo tables in [`builtin`].

pub mod base;
pub mod builtin;
pub mod error;
pub mod loader;

pub use base::{KbParts, KbSummary, KnowledgeBase, QuestionTemplate};
pub use error::KbError;
pub use loader::{load, load_dir};

/// The built-in KB, validated with the default prior tolerance.
///
/// # Errors
///
/// Only fails if the built-in tables themselves are broken.
pub fn builtin() -> Result<KnowledgeBase, KbError> {
    KnowledgeBase::from_parts(builtin::parts(), 1e-6)
}
