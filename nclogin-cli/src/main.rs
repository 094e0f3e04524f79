// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! nclogin - obtain a Nextcloud app password from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Log in (scheme defaults to http)
//! nclogin cloud.example.com
//!
//! # Explicit scheme and client name
//! nclogin login https://cloud.example.com --user-agent "backup-script"
//!
//! # JSON output for scripting
//! nclogin --format json --pretty login https://cloud.example.com
//!
//! # Show effective configuration
//! nclogin config show
//! ```

mod commands;
mod config;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use nclogin_flow::AuthError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{config as config_cmd, login};
use output::TextFormatter;

// ============================================================================
// CLI Definition
// ============================================================================

/// nclogin - Nextcloud browser login.
#[derive(Parser)]
#[command(name = "nclogin")]
#[command(about = "Obtain a Nextcloud app password through browser login")]
#[command(long_about = r#"
nclogin starts a login session on a Nextcloud server, prints a link to open
in the browser, and waits until the login there is finished. Press Enter to
check right away instead of waiting for the next scheduled check.

Examples:
  nclogin cloud.example.com              # Log in (http assumed)
  nclogin login https://cloud.example    # Explicit scheme
  nclogin --format json login SERVER     # JSON output
  nclogin config show                    # Effective configuration
"#)]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Subcommand to run. If none, runs 'login' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Arguments for the default 'login' command.
    #[command(flatten)]
    pub login: login::LoginArgs,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (no logging, no error messages).
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Path to the configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Configuration file in effect.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config::Config::default_path)
    }
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Log in to a server (default if no command specified).
    #[command(visible_alias = "l")]
    Login(login::LoginArgs),

    /// Inspect configuration.
    Config(config_cmd::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Interrupted by the user.
    Cancelled = 130,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("nclogin=debug,info")
    } else {
        EnvFilter::new("nclogin=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Login(args)) => login::run(args, &cli).await,
        Some(Commands::Config(args)) => config_cmd::run(args, &cli),
        None => login::run(&cli.login, &cli).await,
    };

    let code = match result {
        Ok(()) => ExitCode::Success,
        Err(e) => report(&e, &cli),
    };
    std::process::exit(code as i32);
}

/// Prints a failure and picks the exit code for it.
fn report(err: &anyhow::Error, cli: &Cli) -> ExitCode {
    let auth = err.downcast_ref::<AuthError>();
    let cancelled = auth.is_some_and(AuthError::is_cancelled);

    if !cli.quiet {
        match auth {
            Some(auth) if cli.format == OutputFormat::Text => {
                eprintln!("{}", TextFormatter::new(!cli.no_color).format_error(auth));
            }
            _ => eprintln!("Error: {err:#}"),
        }
    }

    if cancelled {
        ExitCode::Cancelled
    } else {
        ExitCode::Error
    }
}

// ============================================================================
// Tests
// ============================================================================
