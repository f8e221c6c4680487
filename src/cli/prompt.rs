//! CLI entry-point for printing rendered prompts.

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Subcommand};

use crate::{
    assess::prompt::{risk_prompt, score_prompt},
    catalog::Medication,
    config::Settings,
};

/// Args for the `prompt` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    #[command(subcommand)]
    pub template: Template,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Template {
    /// The top-10 long-term risks prompt.
    Risks {
        #[arg(long)]
        medication: Medication,
    },
    /// The scoring prompt, embedding risk text read from a file.
    Score {
        #[arg(long)]
        medication: Medication,
        /// Disease or second medication, depending on the comparison kind.
        #[arg(long)]
        target: String,
        /// File holding previously fetched risk text.
        #[arg(long)]
        risks_file: std::path::PathBuf,
    },
}

pub fn run(args: Args, settings: Settings) -> Result<()> {
    let rendered = match args.template {
        Template::Risks { medication } => risk_prompt(medication),
        Template::Score {
            medication,
            target,
            risks_file,
        } => {
            let target = settings.comparison.parse(&target)?;
            let risks = std::fs::read_to_string(&risks_file)
                .with_context(|| format!("reading {}", risks_file.display()))?;
            score_prompt(medication, risks.trim(), &target)
        }
    };
    println!("{rendered}");
    Ok(())
}
