//! Config command - inspect configuration.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::Config;
use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration.
    Show,

    /// Show the configuration file path.
    Path,
}

/// Runs the config command.
pub fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli),
        ConfigAction::Path => show_path(cli),
    }
}

fn show_config(cli: &Cli) -> Result<()> {
    let path = cli.config_path();
    let config = Config::load_from(&path)?;

    match cli.format {
        OutputFormat::Text => {
            println!("nclogin Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("File:             {}", path.display());
            println!("Server:           {}", config.server.as_deref().unwrap_or("(none)"));
            println!("User agent:       {}", config.user_agent);
            println!("Default scheme:   {}", config.default_scheme);
            println!("Request timeout:  {}s", config.request_timeout_secs);
            println!("Initial interval: {}s", config.initial_interval_secs);
            println!("Min poll spacing: {}s", config.min_poll_spacing_secs);
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&config)?);
        }
    }

    Ok(())
}

fn show_path(cli: &Cli) -> Result<()> {
    let path = cli.config_path();

    match cli.format {
        OutputFormat::Text => println!("{}", path.display()),
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "configFile": path.display().to_string(),
                "exists": path.exists(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}
