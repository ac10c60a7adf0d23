// src/lib.rs
//! Client for a job board: keeps a rendered job listing fresh and uploads
//! the user's profile form.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod listing;
pub mod profile;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::core::{ListingSource, PortalClient, PortfolioUploader};
pub use config::PortalConfig;
pub use error::{PortalError, PortalResult};
pub use listing::{JobRecord, ListingRefresher, RefreshHandle, RefreshOutcome};
pub use profile::{ProfileForm, ProfileSubmitter};
