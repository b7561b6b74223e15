//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `scan`: Extract keys and update locale files (supports dry-run and missing-key listing)
//! - `generate`: Non-interactive regeneration with safe defaults (backup, sorted, no pruning)
//! - `init`: Write a default configuration file

use std::path::PathBuf;

use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Scan(cmd)) => cmd.common.verbose,
            Some(Command::Generate(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by scan and generate.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Locales to process (defaults to `locales` from the config file)
    pub locales: Vec<String>,

    /// Project root directory (defaults to the current directory)
    #[arg(long, env = "LOCSYNC_ROOT")]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output format: nested-files (php) or single-document (json)
    #[arg(long)]
    pub format: Option<String>,

    /// Remove keys that are no longer found in the source code
    #[arg(long, alias = "remove-missing")]
    pub prune_missing: bool,

    /// Sort keys alphabetically (overrides config file)
    #[arg(long, action = ArgAction::SetTrue, overrides_with = "no_sort")]
    pub sort: bool,

    /// Keep existing key order (overrides config file)
    #[arg(long, action = ArgAction::SetTrue, overrides_with = "sort")]
    pub no_sort: bool,

    /// Back up existing files before overwriting them
    #[arg(long)]
    pub backup: bool,

    /// Show what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// List keys that have no translation yet
    #[arg(long)]
    pub list_missing: bool,
}

impl ScanCommand {
    /// Sort override from `--sort` / `--no-sort`, if either was given.
    pub fn sort_override(&self) -> Option<bool> {
        match (self.sort, self.no_sort) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Debug, Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Overwrite files without creating backups
    #[arg(long)]
    pub force: bool,

    /// Only print errors
    #[arg(long)]
    pub silent: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan source files for translation keys and update locale files
    Scan(ScanCommand),
    /// Regenerate locale files from source (backup on, sorted, nothing pruned)
    Generate(GenerateCommand),
    /// Initialize a new .locsyncrc.json configuration file
    Init,
}
