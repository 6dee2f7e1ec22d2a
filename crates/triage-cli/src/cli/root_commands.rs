use clap::{Args, Subcommand};

use crate::cli::subcommands::KbCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Interactive triage session on stdin.
    Run(RunArgs),
    /// Scripted session: feed answers in order and report every step.
    Simulate(SimulateArgs),
    /// Extract canonical symptoms from free text.
    Extract(ExtractArgs),
    /// Knowledge base inspection.
    Kb {
        #[command(subcommand)]
        action: KbCommands,
    },
}

/// Initial symptoms, given directly or as free text.
#[derive(Clone, Debug, Args)]
pub struct SymptomInput {
    /// Initial symptom (repeatable)
    #[arg(short, long = "symptom")]
    pub symptoms: Vec<String>,

    /// Free-text description; symptoms are extracted from it
    #[arg(short, long)]
    pub text: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub input: SymptomInput,

    /// Include the reasoning for the top diseases in the final report
    #[arg(long)]
    pub explain: bool,
}

#[derive(Clone, Debug, Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub input: SymptomInput,

    /// Answer to the next question (repeatable, used in order)
    #[arg(short, long = "answer")]
    pub answers: Vec<String>,

    /// Show candidate questions per step and the final reasoning
    #[arg(long)]
    pub explain: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ExtractArgs {
    /// Text to scan
    pub text: String,
}
