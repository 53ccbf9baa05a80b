use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use session::{ApiClient, ClientConfig, ScreenScope};
use tracing_subscriber::EnvFilter;

mod alert;
mod cli;
mod commands;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(api_url) = cli.api_url {
        config = config.with_base_url(api_url);
    }
    let client = ApiClient::with_keyring(config).context("failed to set up the API client")?;

    // Ctrl-C ends the screen, and with it any request in flight.
    let scope = ScreenScope::new();
    let interrupt = scope.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    match commands::run(&client, &scope, cli.command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            eprintln!("{}", alert::message(&err));
            Ok(ExitCode::FAILURE)
        }
    }
}
