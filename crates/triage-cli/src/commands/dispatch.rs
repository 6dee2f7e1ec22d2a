use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::cli::subcommands::KbCommands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Run(args) => commands::run::handle(&args, ctx, flags),
        Commands::Simulate(args) => commands::simulate::handle(&args, ctx, flags),
        Commands::Extract(args) => commands::extract::handle(&args, ctx, flags),
        Commands::Kb { action } => match action {
            KbCommands::Summary => commands::kb::summary(ctx, flags),
            KbCommands::Validate => commands::kb::validate(&ctx.config, flags),
        },
    }
}
