// src/error.rs
use thiserror::Error;

/// Failures surfaced by the listing refresher and the profile submitter.
///
/// Every variant keeps the full `anyhow` chain of the underlying cause so it
/// can be logged with `{:#}`.
#[derive(Debug, Error)]
pub enum PortalError {
    /// Network error, non-2xx status or badly shaped body on `/search`.
    #[error("listing fetch failed: {0:#}")]
    Fetch(anyhow::Error),

    /// The fetched listing could not be written to its view.
    #[error("listing render failed: {0:#}")]
    Render(anyhow::Error),

    /// Network error, non-2xx status or unparsable body on `/upload_portfolio`.
    #[error("profile upload failed: {0:#}")]
    Submit(anyhow::Error),
}

pub type PortalResult<T> = std::result::Result<T, PortalError>;
