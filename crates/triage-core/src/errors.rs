//! Cross-cutting error types for the triage engine.
//!
//! This module defines errors that can originate from any crate in the system.
//! Domain-specific errors (e.g., `KbError`, `ConfigError`) are defined in
//! their respective crates and converge in `triage-engine`'s `EngineError`.

use thiserror::Error;

use crate::enums::SessionStatus;

/// Errors that can be raised by any triage crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The caller asked for something the session cannot do in its current state.
    #[error("Invalid operation on session {session_id}: {reason}")]
    InvalidOperation { session_id: String, reason: String },

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: session {session_id} from {from} to {to}")]
    InvalidTransition {
        session_id: String,
        from: SessionStatus,
        to: SessionStatus,
    },

    /// Session lookup returned no result.
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Data failed validation (schema, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    /// Whether this error reports caller misuse of a session rather than bad data.
    #[must_use]
    pub const fn is_invalid_operation(&self) -> bool {
        matches!(
            self,
            Self::InvalidOperation { .. } | Self::InvalidTransition { .. } | Self::SessionNotFound(_)
        )
    }
}
