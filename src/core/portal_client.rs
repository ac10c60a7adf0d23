// src/core/portal_client.rs
//! HTTP client for the job board: listing feed and portfolio upload

use anyhow::{Context, Result};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, trace};

use crate::listing::types::JobRecord;
use crate::profile::form::ProfileForm;
use crate::utils::endpoint_url;

pub const SEARCH_ENDPOINT: &str = "/search";
pub const UPLOAD_PORTFOLIO_ENDPOINT: &str = "/upload_portfolio";

/// Anything that can produce the current job listing
pub trait ListingSource: Send + Sync + 'static {
    fn search(&self) -> impl Future<Output = Result<Vec<JobRecord>>> + Send;
}

/// Anything that accepts a profile submission and answers with JSON
pub trait PortfolioUploader: Send + Sync + 'static {
    fn upload_portfolio(
        &self,
        form: &ProfileForm,
    ) -> impl Future<Output = Result<serde_json::Value>> + Send;
}

impl<T: ListingSource> ListingSource for Arc<T> {
    fn search(&self) -> impl Future<Output = Result<Vec<JobRecord>>> + Send {
        (**self).search()
    }
}

impl<T: PortfolioUploader> PortfolioUploader for Arc<T> {
    fn upload_portfolio(
        &self,
        form: &ProfileForm,
    ) -> impl Future<Output = Result<serde_json::Value>> + Send {
        (**self).upload_portfolio(form)
    }
}

#[derive(Debug, Clone)]
pub struct PortalClient {
    client: reqwest::Client,
    base_url: String,
}

impl PortalClient {
    /// Create a client. Without a timeout the transport default applies.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }
}

impl ListingSource for PortalClient {
    async fn search(&self) -> Result<Vec<JobRecord>> {
        let url = endpoint_url(&self.base_url, SEARCH_ENDPOINT);
        info!("Fetching job listing: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to GET from {}", url))?;

        let status = response.status();
        trace!("Response status: {}", status);

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("HTTP {} error: {}", status, error_text)
        }

        let records: Vec<JobRecord> = response
            .json()
            .await
            .context("Failed to parse job listing response")?;

        info!("Received {} job records", records.len());
        Ok(records)
    }
}

impl PortfolioUploader for PortalClient {
    async fn upload_portfolio(&self, form: &ProfileForm) -> Result<serde_json::Value> {
        let url = endpoint_url(&self.base_url, UPLOAD_PORTFOLIO_ENDPOINT);
        let multipart = form.to_multipart()?;

        info!(
            "Uploading profile form with {} fields: {}",
            form.fields().len(),
            url
        );

        let response = self
            .client
            .post(&url)
            .multipart(multipart)
            .send()
            .await
            .context("HTTP request failed")?;

        let status = response.status();
        trace!("Response status: {}", status);

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Upload service error response: {}", error_text);
            anyhow::bail!("Service returned error status {}: {}", status, error_text)
        }

        let response_text = response
            .text()
            .await
            .context("Failed to read response text")?;

        serde_json::from_str(&response_text).with_context(|| {
            format!(
                "Failed to parse upload response as JSON. Raw response: {}",
                response_text
            )
        })
    }
}
