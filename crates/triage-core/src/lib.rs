//! # triage-core
//!
//! Core types, ID generation, and error types for the symptom triage engine.
//!
//! This crate provides the foundational types shared across all triage crates:
//! - Value types for knowledge-base rows (diseases, questions, red flags)
//! - Status enums with state machine transitions
//! - Session ID generation and symptom text normalization
//! - Cross-cutting error types
//! - Response types handed to hosts after `start` / `update`

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;
pub mod text;
