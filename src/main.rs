mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => commands::check::run(args),
        Commands::Standings(args) => commands::standings::run(args),
        Commands::Teams(args) => commands::teams::run(args),
        Commands::Sessions(args) => commands::sessions::run(args),
        Commands::Season(args) => commands::season::run(args),
        Commands::HeadToHead(args) => commands::head_to_head::run(args),
        Commands::Trend(args) => commands::trend::run(args),
        Commands::Heatmap(args) => commands::heatmap::run(args),
        Commands::Podiums(args) => commands::podiums::run(args),
        Commands::FastestLaps(args) => commands::fastest_laps::run(args),
        Commands::Form(args) => commands::form::run(args),
        Commands::Insights(args) => commands::insights::run(args),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
