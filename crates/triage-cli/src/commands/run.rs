use std::io::{BufRead, Write};

use anyhow::Context;
use triage_core::entities::Question;
use triage_engine::{TriageEngine, TriageSession};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RunArgs;
use crate::commands::shared::{report, symptoms};
use crate::context::AppContext;
use crate::ui;

/// Handle `triage run`.
pub fn handle(args: &RunArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let initial = symptoms::collect(&args.input, &ctx.extractor);
    let mut session = ctx.engine.start(initial.as_slice())?;

    let stdin = std::io::stdin();
    let mut stderr = std::io::stderr();
    converse(&ctx.engine, &mut session, stdin.lock(), &mut stderr, ui::prefs().prompts)?;

    let report = report::TriageReport::new(
        &ctx.engine,
        &session,
        ctx.ranked_limit(flags.limit),
        args.explain,
    );
    report::print(&report, flags.format)
}

/// Ask questions on `prompts` and read answers from `input` until the session
/// ends or input runs out.
pub fn converse<R: BufRead, W: Write>(
    engine: &TriageEngine,
    session: &mut TriageSession,
    mut input: R,
    prompts: &mut W,
    show_prompts: bool,
) -> anyhow::Result<()> {
    let mut line = String::new();
    while let Some(question) = session.pending_question().cloned() {
        if show_prompts {
            write_prompt(prompts, session.asked().len() + 1, &question)?;
        }
        line.clear();
        let read = input.read_line(&mut line).context("failed to read answer")?;
        if read == 0 {
            tracing::warn!(session = %session.id(), "input closed before the session finished");
            break;
        }
        let answer = resolve_answer(line.trim(), &question);
        engine.update(session, &answer)?;
    }
    Ok(())
}

fn write_prompt<W: Write>(out: &mut W, number: usize, question: &Question) -> anyhow::Result<()> {
    writeln!(out, "\nQ{number}. {}", question.text)?;
    for (i, option) in question.options.iter().enumerate() {
        writeln!(out, "  {}) {option}", i + 1)?;
    }
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

/// A bare option number picks that option's text; anything else is taken as typed.
pub fn resolve_answer(line: &str, question: &Question) -> String {
    line.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| question.options.get(i))
        .map_or_else(|| line.to_string(), Clone::clone)
}
