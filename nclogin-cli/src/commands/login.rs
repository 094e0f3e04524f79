//! Login command - run the browser login flow.

use std::io::{self, Write};

use anyhow::{Result, anyhow};
use chrono::Utc;
use clap::Args;
use nclogin_flow::{CancellationToken, LoginFlow};
use tracing::debug;

use crate::config::Config;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the login command.
#[derive(Args, Debug, Default)]
pub struct LoginArgs {
    /// Server address, e.g. `cloud.example.com` or `https://cloud.example.com`.
    pub server: Option<String>,

    /// Client name the server shows for the new app password.
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Scheme to assume when the address has none.
    #[arg(long)]
    pub default_scheme: Option<String>,
}

impl LoginArgs {
    /// Applies command-line overrides to a loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(server) = &self.server {
            config.server = Some(server.clone());
        }
        if let Some(user_agent) = &self.user_agent {
            config.user_agent.clone_from(user_agent);
        }
        if let Some(scheme) = &self.default_scheme {
            config.default_scheme.clone_from(scheme);
        }
    }
}

/// Runs the login command.
pub async fn run(args: &LoginArgs, cli: &Cli) -> Result<()> {
    let mut config = Config::load_from(&cli.config_path())?;
    args.apply(&mut config);

    let server = config.server.clone().ok_or_else(|| {
        anyhow!("No server given. Pass one as an argument or set \"server\" in the config file")
    })?;
    let flow = LoginFlow::new(config.to_settings()?)?;

    let cancel = CancellationToken::new();
    let interrupt = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("Interrupted");
                cancel.cancel();
            }
        }
    });

    // Keep stdout clean for the JSON document.
    let prompts: Box<dyn Write + Send> = match cli.format {
        OutputFormat::Text => Box::new(io::stdout()),
        OutputFormat::Json => Box::new(io::stderr()),
    };

    let result = flow
        .authenticate(&cancel, &server, &config.user_agent, prompts, io::stdin())
        .await;
    interrupt.abort();

    let creds = result?;
    let obtained_at = Utc::now();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_credentials(&creds));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_credentials(&creds, obtained_at)?);
        }
    }

    Ok(())
}
