use anyhow::Context;
use triage_config::TriageConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, layered config, then apply `--kb`.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<TriageConfig> {
    let mut config = TriageConfig::load_with_dotenv().context("failed to load triage config")?;
    apply_overrides(&mut config, flags);
    Ok(config)
}

fn apply_overrides(config: &mut TriageConfig, flags: &GlobalFlags) {
    if let Some(dir) = &flags.kb {
        config.knowledge.dir = dir.display().to_string();
    }
}
