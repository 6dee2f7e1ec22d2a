use serde::Serialize;
use triage_core::enums::{AnswerKind, SessionStatus};
use triage_core::responses::RankedDisease;
use triage_engine::{
    ProbabilityChange, ScoredQuestion, TriageEngine, TriageSession, classify_answer, probability_changes,
};

use crate::cli::root_commands::SimulateArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::{report, symptoms};
use crate::context::AppContext;
use crate::output::{output, section};

/// Candidate questions listed per step with `--explain`.
const CANDIDATES_PER_STEP: usize = 3;

/// One question/answer exchange of a scripted session.
#[derive(Debug, Serialize)]
pub struct Step {
    pub number: usize,
    pub symptom: String,
    pub question: String,
    pub answer: String,
    pub reading: AnswerKind,
    pub status: SessionStatus,
    pub leader: Option<RankedDisease>,
    /// Largest posterior shifts caused by this answer.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<ProbabilityChange>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<ScoredQuestion>,
}

#[derive(Debug, Serialize)]
pub struct Simulation {
    pub initial_symptoms: Vec<String>,
    pub steps: Vec<Step>,
    /// Answers left over once the session ended.
    pub unused_answers: usize,
    pub result: report::TriageReport,
}

/// Handle `triage simulate`.
pub fn handle(args: &SimulateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let initial = symptoms::collect(&args.input, &ctx.extractor);
    let mut session = ctx.engine.start(initial.as_slice())?;
    let initial_symptoms = session.confirmed().to_vec();
    let steps = play(&ctx.engine, &mut session, &args.answers, args.explain)?;

    let unused_answers = args.answers.len() - steps.len();
    if unused_answers > 0 {
        tracing::warn!(unused_answers, "session ended before all answers were used");
    }

    let simulation = Simulation {
        initial_symptoms,
        steps,
        unused_answers,
        result: report::TriageReport::new(
            &ctx.engine,
            &session,
            ctx.ranked_limit(flags.limit),
            args.explain,
        ),
    };

    if flags.format == OutputFormat::Table {
        section("Steps", &simulation.steps)?;
        report::print(&simulation.result, flags.format)
    } else {
        output(&simulation, flags.format)
    }
}

/// Feed `answers` in order until they run out or the session ends.
pub fn play(
    engine: &TriageEngine,
    session: &mut TriageSession,
    answers: &[String],
    with_candidates: bool,
) -> anyhow::Result<Vec<Step>> {
    let mut steps = Vec::new();
    for answer in answers {
        let Some(question) = session.pending_question().cloned() else {
            break;
        };
        let candidates = if with_candidates {
            engine.rank_questions(session, CANDIDATES_PER_STEP)
        } else {
            Vec::new()
        };
        let before = session.ranked().to_vec();
        let state = engine.update(session, answer)?;
        steps.push(Step {
            number: state.questions_asked,
            symptom: question.symptom,
            question: question.text,
            answer: answer.clone(),
            reading: classify_answer(answer),
            status: state.status,
            leader: state.ranked.first().cloned(),
            changes: probability_changes(&before, &state.ranked),
            candidates,
        });
    }
    Ok(steps)
}
