//! Command-line interface wiring for phrs-assistant.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod assess;
pub mod prompt;
pub mod serve;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Polypharmic risk score assistant", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::run(args, settings).await,
            Commands::Prompt(args) => prompt::run(args, settings),
            Commands::Assess(args) => assess::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the assessment form over HTTP.
    Serve(serve::Args),
    /// Print a rendered prompt without calling the completion endpoint.
    Prompt(prompt::Args),
    /// Fetch risks and a score for one pairing from the terminal.
    Assess(assess::Args),
}
