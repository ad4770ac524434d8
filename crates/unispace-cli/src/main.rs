//! Unispace CLI: the `unispace` command.

mod cli;
mod commands;
mod scenario;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Cauchy { scenario, json } => commands::run::run(scenario, Some("cauchy"), json),

        Commands::Complete { scenario, json } => {
            commands::run::run(scenario, Some("complete"), json)
        }

        Commands::Bounded { scenario, json } => commands::run::run(scenario, Some("bounded"), json),

        Commands::Compact { scenario, json } => commands::run::run(scenario, Some("compact"), json),

        Commands::Run { scenario, json } => commands::run::run(scenario, None, json),
    }
}
