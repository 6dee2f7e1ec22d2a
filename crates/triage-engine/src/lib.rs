//! # triage-engine
//!
//! Adaptive symptom triage: a naive-Bayes posterior over diseases, next
//! question chosen by expected information gain, a 3-5-7 stopping rule, and a
//! red-flag override that ends the dialogue as an emergency.
//!
//! [`TriageEngine`] owns the read-only pieces (knowledge base, likelihood
//! table, thresholds) and drives [`TriageSession`] values through
//! `start` / `update`. [`SessionRegistry`] adds per-id locking for hosts that
//! keep many sessions in memory.

pub mod answer;
pub mod engine;
pub mod error;
pub mod explain;
pub mod extract;
pub mod information;
pub mod likelihood;
pub mod policy;
pub mod posterior;
pub mod red_flags;
pub mod registry;
pub mod selector;
pub mod session;

pub use answer::classify_answer;
pub use engine::TriageEngine;
pub use error::EngineError;
pub use explain::{Explanation, ProbabilityChange, explain, probability_changes};
pub use extract::{SymptomExtractor, SynonymExtractor};
pub use likelihood::LikelihoodModel;
pub use policy::{PolicyDecision, StoppingPolicy};
pub use posterior::{Distribution, posterior};
pub use red_flags::RedFlagIndex;
pub use registry::SessionRegistry;
pub use selector::{QuestionSelector, ScoredQuestion};
pub use session::TriageSession;
