// src/listing/mod.rs
pub mod filter;
pub mod refresher;
pub mod types;
pub mod view;

pub use filter::ListingFilter;
pub use refresher::{ListingRefresher, RefreshHandle, DEFAULT_REFRESH_INTERVAL};
pub use types::{JobRecord, RefreshOutcome};
pub use view::{ConsoleListing, HtmlFileListing, JobCard, ListingView, MemoryListing};
