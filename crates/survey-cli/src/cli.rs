use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for the `survey-sync` binary.
#[derive(Debug, Parser)]
#[command(
    name = "survey-sync",
    version,
    about = "Sync completed survey responses into person attributes"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only, no progress display)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root holding `.survey-sync/` (defaults to the current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch completed responses and apply them to person attributes.
    Sync(SyncArgs),
    /// List configured surveys and their question mappings.
    Surveys,
    /// Print the effective configuration with secrets masked.
    Config,
}

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Only sync these survey ids (repeatable). Defaults to all configured surveys.
    #[arg(long = "survey", value_name = "ID")]
    pub surveys: Vec<String>,

    /// Resolve people and log the writes without persisting them.
    #[arg(long)]
    pub dry_run: bool,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub quiet: bool,
    pub verbose: bool,
    pub project: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            quiet: self.quiet,
            verbose: self.verbose,
            project: self.project.clone(),
        }
    }
}
