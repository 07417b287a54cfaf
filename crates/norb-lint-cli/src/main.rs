//! norb-lint CLI tool.
//!
//! Usage:
//! ```bash
//! norb-lint check [OPTIONS] [RAILS_ROOT]
//! norb-lint list-rules [RAILS_ROOT]
//! norb-lint init [--force]
//! ```
//!
//! `check` and `list-rules` resolve their configuration from the directory
//! they are pointed at (see [`config_resolver`]).

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Architecture linter for Ruby on Rails applications
#[derive(Parser)]
#[command(name = "norb-lint", author, version, about)]
struct Cli {
    /// Log configuration lookup and per-file progress
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file to use instead of searching up to the Rails root
    #[arg(short, long, global = true, env = "NORB_LINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the Ruby files of a Rails application
    Check(CheckArgs),

    /// Show every rule and whether the resolved configuration turns it on
    ListRules {
        /// Rails root whose configuration is shown
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Write a starter norb-lint.toml into the current directory
    Init {
        /// Replace an existing norb-lint.toml
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args)]
struct CheckArgs {
    /// Rails root, or any directory below it such as `app/models`
    #[arg(default_value = ".", value_name = "RAILS_ROOT")]
    path: PathBuf,

    /// How violations are reported
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Run only these rules, by name or NB code (e.g. `NB001,branching-logic`)
    #[arg(long, value_name = "RULES")]
    rules: Option<String>,

    /// Extra glob to skip, on top of `[analyzer] exclude` (repeatable)
    #[arg(short, long, value_name = "GLOB")]
    exclude: Vec<String>,
}

/// How `check` reports violations.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// `path:line:col: severity [code] message` lines and a summary.
    #[default]
    Text,
    /// Machine-readable JSON.
    Json,
    /// One line per violation, no summary.
    Compact,
    /// Ruby source snippets with the offending span highlighted.
    Pretty,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let explicit = cli.config.as_deref();
    match cli.command {
        Commands::Check(args) => {
            let source = config_resolver::resolve(&args.path, explicit);
            commands::check::run(&args.path, args.format, args.rules, args.exclude, &source)
        }
        Commands::ListRules { path } => {
            commands::list_rules::run(&config_resolver::resolve(&path, explicit))
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
