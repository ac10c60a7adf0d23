use anyhow::{Context, Result};
use clap::Parser;
use job_portal::cli::{handle_command, Cli};
use job_portal::PortalConfig;
use std::fs::OpenOptions;
use std::path::Path;
use std::process::ExitCode;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

fn init_logging(log_file: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Clear file on startup
        .open(log_file)
        .with_context(|| format!("Failed to open log file: {}", log_file.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Invalid log directive")?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = PortalConfig::load()?;
    let config = cli.apply_overrides(config)?;
    init_logging(&config.log_file)?;

    info!("Environment: {}", PortalConfig::environment());
    info!("Job board: {}", config.base_url);
    info!("Refresh interval: {:?}", config.refresh_interval);

    let status = handle_command(cli, config).await?;
    Ok(status.into())
}
