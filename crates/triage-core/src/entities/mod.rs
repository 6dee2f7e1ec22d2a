//! Value types for knowledge-base rows and session records.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema validation. None of them carry behavior beyond small
//! constructors; the engine crate owns the logic.

mod answer;
mod disease;
mod question;
mod red_flag;

pub use answer::AnsweredQuestion;
pub use disease::{Disease, LikelihoodEntry};
pub use question::Question;
pub use red_flag::{RedFlag, RedFlagMatch};
