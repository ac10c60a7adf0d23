// src/core/mod.rs
//! Transport to the job board server

pub mod portal_client;

pub use portal_client::{ListingSource, PortalClient, PortfolioUploader};
