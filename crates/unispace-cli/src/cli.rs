use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "unispace",
    about = "Unispace: Cauchy, completeness, boundedness, and compactness checks over declared uniform spaces",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Cauchy checks a scenario declares
    Cauchy {
        /// Scenario JSON path
        scenario: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the completeness checks (including separated unions)
    Complete {
        /// Scenario JSON path
        scenario: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the total-boundedness checks
    Bounded {
        /// Scenario JSON path
        scenario: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the compactness checks
    Compact {
        /// Scenario JSON path
        scenario: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run every check the scenario declares
    Run {
        /// Scenario JSON path
        scenario: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
