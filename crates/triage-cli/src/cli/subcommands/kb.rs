use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum KbCommands {
    /// Counts of diseases, symptoms, rows, questions, red flags.
    Summary,
    /// Load and validate the knowledge base; fails on any error.
    Validate,
}
