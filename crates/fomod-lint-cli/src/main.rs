//! fomod-lint CLI tool.
//!
//! Usage:
//! ```bash
//! fomod-lint check [OPTIONS] [PATH]
//! fomod-lint list-rules
//! fomod-lint init
//! ```
//!
//! Exit codes: 0 when no finding reaches the `fail_on` severity, 1 when one
//! does, 2 when the package or the configuration cannot be used.

use clap::{Parser, Subcommand};
use fomod_lint_core::Severity;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Semantic linter for FOMOD mod installers
#[derive(Parser)]
#[command(name = "fomod-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "FOMOD_LINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint a mod package
    Check {
        /// Package root, its fomod folder or ModuleConfig.xml (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules, by name or code (comma-separated)
        #[arg(long)]
        rules: Option<String>,

        /// Also report package files that are never installed
        #[arg(long)]
        unused: bool,

        /// Lowest severity that makes the run fail (critical or advisory)
        #[arg(long)]
        fail_on: Option<Severity>,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Colored, human-readable output with a summary.
    #[default]
    Text,
    /// The plain report text: title, lines and message per group.
    Plain,
    /// JSON output.
    Json,
    /// One-line-per-finding compact format.
    Compact,
}

/// Exit code for package and configuration errors.
const EXIT_UNUSABLE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check {
            path,
            format,
            rules,
            unused,
            fail_on,
        } => commands::check::run(
            &path,
            &commands::check::CheckOptions {
                format,
                rules,
                unused,
                fail_on,
                config: cli.config,
            },
        ),
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(ExitCode::SUCCESS)
        }
        Commands::Init { force } => commands::init::run(force).map(|()| ExitCode::SUCCESS),
    };

    result.unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        ExitCode::from(EXIT_UNUSABLE)
    })
}
