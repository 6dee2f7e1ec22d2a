use serde::Serialize;
use triage_config::TriageConfig;
use triage_kb::KbSummary;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct KbReport {
    source: String,
    valid: bool,
    #[serde(flatten)]
    summary: KbSummary,
}

fn source(config: &TriageConfig) -> String {
    if config.knowledge.is_configured() {
        config.knowledge.dir.clone()
    } else {
        String::from("built-in")
    }
}

/// Handle `triage kb summary`.
pub fn summary(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = KbReport {
        source: source(&ctx.config),
        valid: true,
        summary: ctx.engine.kb().summary(),
    };
    output(&report, flags.format)
}

/// Handle `triage kb validate`.
///
/// Loads the knowledge base without building an engine so that load and
/// validation errors surface with the file that caused them.
pub fn validate(config: &TriageConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let kb = triage_kb::load(&config.knowledge)
        .map_err(|error| anyhow::anyhow!("knowledge base {} is invalid: {error}", source(config)))?;
    let report = KbReport {
        source: source(config),
        valid: true,
        summary: kb.summary(),
    };
    output(&report, flags.format)
}
