//! Engine error types.
//!
//! Only caller misuse (operating on a terminal, unknown, or question-less
//! session) and startup failures surface here. Numeric degeneracy and unknown
//! symptoms are recovered inside the engine and never become errors.

use triage_config::ConfigError;
use triage_core::errors::CoreError;
use triage_kb::KbError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Session misuse or invalid transition.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Knowledge base failed to load or validate.
    #[error("knowledge base error: {0}")]
    Kb(#[from] KbError),

    /// Engine configuration is invalid.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// A session mutex was poisoned by a panicking holder.
    #[error("session {0} is unusable: a previous update panicked")]
    Poisoned(String),
}

impl EngineError {
    /// Whether the caller used a session incorrectly (as opposed to a startup fault).
    #[must_use]
    pub const fn is_invalid_operation(&self) -> bool {
        match self {
            Self::Core(core) => core.is_invalid_operation(),
            _ => false,
        }
    }
}
