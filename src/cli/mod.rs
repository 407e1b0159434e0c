//! CLI command definitions and handlers

mod config;
mod repo;
mod snippet;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::reporters::OutputFormat;

/// authorscan - Estimate how much of a codebase was AI-generated
#[derive(Parser, Debug)]
#[command(name = "authorscan")]
#[command(
    version,
    about = "Estimate how much of a code snippet or GitHub repository was written by an AI assistant",
    long_about = "authorscan scores every line of code against a library of stylistic \
patterns typical of AI assistants or of human authors, adjusts for whole-file \
structure and local context, and aggregates the verdicts per file and per repository.\n\n\
It is a heuristic: treat the percentages as an estimate, not proof.",
    after_help = "\
Examples:
  authorscan snippet src/lib.rs                 Classify a local file
  cat patch.py | authorscan snippet --lang python --lines
  authorscan repo https://github.com/owner/repo
  authorscan repo owner/repo --format json      JSON output for scripting
  authorscan config show                        Show effective settings"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Output format: text, json
    #[arg(long, short = 'f', global = true, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a single file or stdin
    #[command(after_help = "\
Examples:
  authorscan snippet src/app.ts           Language taken from the extension
  authorscan snippet - --lang go < x      Read stdin
  authorscan snippet main.py --lines      Per-line verdicts and rationale")]
    Snippet {
        /// File to classify ('-' or omitted reads stdin)
        file: Option<PathBuf>,

        /// Language tag (javascript, typescript, python, rust, go, java, ...)
        #[arg(long)]
        lang: Option<String>,

        /// Show every line with its verdict and rationale
        #[arg(long)]
        lines: bool,
    },

    /// Analyze a public GitHub repository
    #[command(after_help = "\
Examples:
  authorscan repo https://github.com/owner/repo
  authorscan repo owner/repo --max-depth 6 --top 50
  authorscan repo owner/repo --path packages/core
  GITHUB_TOKEN=ghp_... authorscan repo owner/repo   Higher API rate limit")]
    Repo {
        /// Repository URL or owner/repo
        url: String,

        /// Directory levels to walk (default: 4, or [analysis] max_depth)
        #[arg(long)]
        max_depth: Option<usize>,

        /// Start from this directory instead of the repository root
        #[arg(long)]
        path: Option<String>,

        /// Skip the scaffolding-tool provenance check
        #[arg(long)]
        no_provenance: bool,

        /// Number of files to list, ranked by AI share (0 = none)
        #[arg(long, default_value = "20")]
        top: usize,
    },

    /// Inspect or create the user config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration (token masked)
    Show,
    /// Create ~/.config/authorscan/config.toml with example settings
    Init,
    /// Print the config file location
    Path,
}

/// Run the CLI
pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.format.parse()?;

    match cli.command {
        Commands::Snippet { file, lang, lines } => {
            snippet::run(file.as_deref(), lang.as_deref(), lines, format)
        }

        Commands::Repo {
            url,
            max_depth,
            path,
            no_provenance,
            top,
        } => repo::run(
            &url,
            repo::RepoArgs {
                max_depth,
                start_path: path,
                no_provenance,
                top,
            },
            format,
        ),

        Commands::Config { action } => config::run(action),
    }
}
