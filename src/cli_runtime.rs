use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use oppdesk::api::ApiClient;
use oppdesk::config::ClientConfig;
use oppdesk::logging::{self, Verbosity};

use crate::Commands;

#[derive(Parser)]
#[command(name = "oppdesk", version)]
#[command(
    about = "Sales opportunity desk: pipeline dashboard, record editing and warehouse sync",
    long_about = None
)]
pub(crate) struct Cli {
    /// Backend base URL (overrides OPPDESK_API_URL)
    #[arg(long = "api-url", value_name = "URL", global = true)]
    api_url: Option<String>,

    /// Log debug detail
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Log errors only
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Append logs to this file instead of stderr
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    let verbosity = Verbosity::from_flags(cli.verbose, cli.quiet);
    let config = ClientConfig::resolve(cli.api_url.as_deref());

    match cli.command {
        None => {
            // The terminal belongs to the TUI; logs go to a file or nowhere.
            if let Some(path) = &cli.log_file {
                logging::init_file(verbosity, path)?;
            }
            oppdesk::tui::run_with_options(oppdesk::tui::TuiRunOptions { config })?;
        }
        Some(command) => {
            match &cli.log_file {
                Some(path) => logging::init_file(verbosity, path)?,
                None => logging::init_stderr(verbosity),
            }
            tracing::debug!(base_url = %config.base_url, "resolved client config");
            let client = ApiClient::new(&config)?;
            crate::cli_exec::handle_command(&client, command)?
        }
    }

    Ok(())
}
