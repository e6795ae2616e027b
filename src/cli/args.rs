//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Extract string literals and write per-language resource files
//! - `lookup`: Look up translations the way a running application would
//! - `init`: Initialize strloc configuration file
//! - `serve`: Start MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Log file for diagnostic output [default: strloc.log]
    #[arg(long, global = true, env = "STRLOC_LOG_FILE")]
    pub log_file: Option<PathBuf>,

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

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.args.verbose,
            Some(Command::Lookup(_)) | Some(Command::Init) | Some(Command::Serve) | None => false,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ExtractArgs {
    /// Source code root directory
    #[arg(short = 'd', long, default_value = ".")]
    pub source_root: PathBuf,

    /// Resource directory (overrides config file) [default: <source-root>/locales]
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// Base name of resource files, written as <NAME>.<code>.json (overrides config file)
    #[arg(short = 'f', long)]
    pub filename: Option<String>,

    /// Minimum literal length in characters (overrides config file)
    #[arg(short = 'm', long)]
    pub min_length: Option<usize>,

    /// Skip literals that contain no letter or digit
    #[arg(short = 'e', long)]
    pub exclude_special_chars_only: bool,

    /// Comma-separated language codes to generate (default: all)
    #[arg(short = 'i', long, value_delimiter = ',')]
    pub include_languages: Vec<String>,

    /// Comma-separated language codes to skip
    #[arg(short = 'x', long, value_delimiter = ',')]
    pub exclude_languages: Vec<String>,

    /// Name of the localization interface (overrides config file)
    #[arg(long)]
    pub interface: Option<String>,

    /// Only keep literals passed to a localization call
    #[arg(long)]
    pub localized_only: bool,

    /// Compute everything but do not write resource files
    #[arg(long)]
    pub dry_run: bool,

    /// Print a table of the generated resource files
    #[arg(long)]
    pub visualize: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub args: ExtractArgs,
}

#[derive(Debug, Clone, Args)]
pub struct LookupArgs {
    /// Language code to look keys up in
    #[arg(short = 'l', long)]
    pub language: String,

    /// Directory holding the resource files (default: outputDir from config)
    #[arg(long)]
    pub locales_dir: Option<PathBuf>,

    /// Base name of resource files (default: fileName from config)
    #[arg(short = 'f', long)]
    pub filename: Option<String>,

    /// Keys (original texts) to look up
    #[arg(required = true)]
    pub keys: Vec<String>,
}

#[derive(Debug, Args)]
pub struct LookupCommand {
    #[command(flatten)]
    pub args: LookupArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract string literals into per-language resource files
    Extract(ExtractCommand),
    /// Look up translations in generated resource files
    Lookup(LookupCommand),
    /// Initialize a new .strlocrc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}
