// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::PortalConfig;
use crate::core::{ListingSource, PortalClient, PortfolioUploader};
use crate::error::PortalError;
use crate::export::{format_listing, OutputFormat};
use crate::listing::refresher::fetch_listing;
use crate::listing::{ConsoleListing, HtmlFileListing, ListingFilter, ListingRefresher};
use crate::profile::{ConsoleNotifier, Notifier, ProfileForm, ProfileSubmitter};

#[derive(Parser)]
#[command(name = "jobwatch")]
#[command(about = "Follow job offers and update your profile on a job board")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Job board server, overrides configuration
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch the listing once and print it
    List {
        #[arg(long)]
        filter: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Keep the listing fresh until interrupted
    Watch {
        #[arg(long)]
        filter: Option<String>,
        /// Render into this HTML file instead of the console
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        interval_secs: Option<u64>,
    },
    /// Upload the profile form
    Submit {
        /// Text field, as NAME=VALUE
        #[arg(long = "field", value_parser = parse_key_value)]
        fields: Vec<(String, String)>,
        /// File attachment, as NAME=PATH
        #[arg(long = "file", value_parser = parse_key_value)]
        files: Vec<(String, String)>,
    },
}

pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{}'", raw)),
    }
}

impl Cli {
    /// Apply command line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, mut config: PortalConfig) -> Result<PortalConfig> {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Command::Watch {
            output,
            interval_secs,
            ..
        } = &self.command
        {
            if output.is_some() {
                config.listing_output = output.clone();
            }
            if let Some(secs) = interval_secs {
                config.refresh_interval = Duration::from_secs(*secs);
            }
        }
        config.validate()?;
        Ok(config)
    }
}

/// How a command ended. A failure here was already reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failure,
}

impl From<CommandStatus> for ExitCode {
    fn from(status: CommandStatus) -> Self {
        match status {
            CommandStatus::Success => ExitCode::SUCCESS,
            CommandStatus::Failure => ExitCode::FAILURE,
        }
    }
}

pub async fn handle_command(cli: Cli, config: PortalConfig) -> Result<CommandStatus> {
    let client = PortalClient::new(&config.base_url, config.request_timeout)?;

    match cli.command {
        Command::List { filter, format } => {
            print!("{}", list_listing(&client, filter.as_deref(), format).await?);
            Ok(CommandStatus::Success)
        }

        Command::Watch { filter, .. } => {
            let filter = ListingFilter::parse(filter.as_deref());
            match config.listing_output {
                Some(path) => {
                    info!("Rendering listing into {}", path.display());
                    let refresher = ListingRefresher::new(client, HtmlFileListing::new(path))
                        .with_filter(filter);
                    watch_until_interrupted(refresher, config.refresh_interval).await?;
                }
                None => {
                    let refresher =
                        ListingRefresher::new(client, ConsoleListing).with_filter(filter);
                    watch_until_interrupted(refresher, config.refresh_interval).await?;
                }
            }
            Ok(CommandStatus::Success)
        }

        Command::Submit { fields, files } => {
            let form = build_form(&fields, &files).await?;
            let submitter = ProfileSubmitter::new(client, ConsoleNotifier);
            submit_form(&submitter, &form).await
        }
    }
}

/// Fetch the listing once and format it. Fetch failures are logged.
pub async fn list_listing<S: ListingSource>(
    source: &S,
    filter: Option<&str>,
    format: OutputFormat,
) -> Result<String> {
    let records = fetch_listing(source).await?;
    let filter = ListingFilter::parse(filter);
    format_listing(&records, filter.as_ref(), format)
}

pub async fn build_form(
    fields: &[(String, String)],
    files: &[(String, String)],
) -> Result<ProfileForm> {
    let mut form = ProfileForm::new();
    for (name, value) in fields {
        form = form.with_text(name, value);
    }
    for (name, path) in files {
        form = form.attach_path(name, Path::new(path)).await?;
    }
    if form.is_empty() {
        anyhow::bail!("Nothing to submit: pass at least one --field or --file");
    }
    Ok(form)
}

/// Submit once. An upload failure is already logged and acknowledged by
/// the submitter, so it only turns into a failed status here.
pub async fn submit_form<U, N>(
    submitter: &ProfileSubmitter<U, N>,
    form: &ProfileForm,
) -> Result<CommandStatus>
where
    U: PortfolioUploader,
    N: Notifier,
{
    match submitter.submit(form).await {
        Ok(_) => Ok(CommandStatus::Success),
        Err(PortalError::Submit(_)) => Ok(CommandStatus::Failure),
        Err(e) => Err(e.into()),
    }
}

async fn watch_until_interrupted<V>(
    refresher: ListingRefresher<PortalClient, V>,
    period: Duration,
) -> Result<()>
where
    V: crate::listing::ListingView,
{
    let handle = Arc::new(refresher).spawn(period);
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    info!("Interrupted, stopping listing refresher");
    handle.stop().await;
    Ok(())
}
