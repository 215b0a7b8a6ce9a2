mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod logger;
mod services;
mod web;
mod workflow;

use std::io::IsTerminal;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use log::LevelFilter;

use crate::config::{AppConfig, DEFAULT_LISTEN_ADDR};
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::infra::browser::SystemBrowser;
use crate::infra::servicenow::ServiceNowClient;

#[derive(Parser)]
#[command(
    name = "snow-relay",
    author,
    version,
    about = "Local web form that creates ServiceNow incidents"
)]
struct Cli {
    /// ServiceNow hostname. example: dev12345.service-now.com
    #[arg(long)]
    hostname: Option<String>,

    /// Local address to serve the form on.
    #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
    listen: String,

    /// Do not open the form in the default browser on startup.
    #[arg(long)]
    no_browser: bool,

    /// Log level (off, error, warn, info, debug, trace).
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.hostname.as_deref(), &cli.listen, !cli.no_browser) {
        Ok(config) => config,
        Err(AppError::Configuration(message)) => {
            println!("{message}");
            println!("{}", Cli::command().render_help());
            std::process::exit(1);
        }
        Err(err) => return Err(err),
    };

    logger::initialize(cli.log_level, std::io::stdout().is_terminal())?;

    let incident_tracker = Arc::new(ServiceNowClient::new(config.instance_url.clone()));
    let context = AppContext::new(config, incident_tracker);

    cmd::serve::run(context, Arc::new(SystemBrowser)).await
}
