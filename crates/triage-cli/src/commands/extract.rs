use serde::Serialize;
use triage_engine::SymptomExtractor;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExtractArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct Extracted {
    symptom: String,
    known: bool,
    red_flag: bool,
}

/// Handle `triage extract`.
pub fn handle(args: &ExtractArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&extract(ctx, &args.text), flags.format)
}

fn extract(ctx: &AppContext, text: &str) -> Vec<Extracted> {
    let kb = ctx.engine.kb();
    ctx.extractor
        .extract(text)
        .into_iter()
        .map(|symptom| Extracted {
            known: kb.knows_symptom(&symptom),
            red_flag: ctx.engine.red_flags().get(&symptom).is_some(),
            symptom,
        })
        .collect()
}
