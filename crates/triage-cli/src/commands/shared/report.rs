use serde::Serialize;
use triage_core::enums::{FinishReason, SessionStatus};
use triage_core::responses::SessionState;
use triage_engine::{Explanation, TriageEngine, TriageSession, explain};

use crate::cli::OutputFormat;
use crate::output::{output, section};

/// Diseases covered by `--explain`.
pub const EXPLAIN_TOP: usize = 3;

/// Final view of a session as printed by `run` and `simulate`.
#[derive(Debug, Serialize)]
pub struct TriageReport {
    #[serde(flatten)]
    pub state: SessionState,
    pub unknown_symptoms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<Explanation>,
}

impl TriageReport {
    pub fn new(engine: &TriageEngine, session: &TriageSession, ranked_limit: usize, with_explanation: bool) -> Self {
        let mut state = session.state();
        state.ranked.truncate(ranked_limit);
        Self {
            state,
            unknown_symptoms: session.unknown_symptoms().to_vec(),
            explanation: with_explanation.then(|| explain(engine, session, EXPLAIN_TOP)),
        }
    }
}

#[derive(Serialize)]
struct Overview<'a> {
    session_id: &'a str,
    status: SessionStatus,
    finish_reason: Option<FinishReason>,
    questions_asked: usize,
    confirmed: &'a [String],
    denied: &'a [String],
    unknown: &'a [String],
}

pub fn print(report: &TriageReport, format: OutputFormat) -> anyhow::Result<()> {
    if format != OutputFormat::Table {
        return output(report, format);
    }

    let state = &report.state;
    section(
        "Session",
        &Overview {
            session_id: &state.session_id,
            status: state.status,
            finish_reason: state.finish_reason,
            questions_asked: state.questions_asked,
            confirmed: &state.confirmed_symptoms,
            denied: &state.denied_symptoms,
            unknown: &report.unknown_symptoms,
        },
    )?;
    if !state.red_flags.is_empty() {
        section("Red flags", &state.red_flags)?;
    }
    if state.predictions.is_empty() {
        section("Ranked", &state.ranked)?;
    } else {
        section("Predictions", &state.predictions)?;
    }
    if let Some(question) = &state.next_question {
        section("Next question", question)?;
    }
    if let Some(explanation) = &report.explanation {
        for disease in &explanation.diseases {
            section(&format!("Why {} ({})", disease.disease, disease.confidence), &disease.contributions)?;
            if !disease.trace.is_empty() {
                section(&format!("Rule trace: {}", disease.disease), &disease.trace)?;
            }
        }
    }
    Ok(())
}
