//! Session identifier generation.
//!
//! Identifiers are a short prefix plus 8 lowercase hex characters drawn from
//! the OS random source, e.g. `tri-a3f8b2c1`.

use crate::errors::CoreError;

/// Prefix for triage session identifiers.
pub const PREFIX_SESSION: &str = "tri";

/// Format an identifier from a prefix and raw bytes.
#[must_use]
pub fn format_id(prefix: &str, bytes: &[u8]) -> String {
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("{prefix}-{hex}")
}

/// Generate a fresh session identifier.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] if the OS random source is unavailable.
pub fn new_session_id() -> Result<String, CoreError> {
    let mut bytes = [0u8; 4];
    getrandom::fill(&mut bytes)
        .map_err(|e| CoreError::Validation(format!("failed to generate session id: {e}")))?;
    Ok(format_id(PREFIX_SESSION, &bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_id_is_prefixed_hex() {
        assert_eq!(format_id("tri", &[0xa3, 0xf8, 0xb2, 0xc1]), "tri-a3f8b2c1");
    }

    #[test]
    fn generated_ids_are_distinct_and_well_formed() {
        let a = new_session_id().unwrap();
        let b = new_session_id().unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("tri-"));
        assert_eq!(a.len(), "tri-".len() + 8);
    }
}
