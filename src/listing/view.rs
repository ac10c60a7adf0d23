// src/listing/view.rs
//! Rendering of job records into cards, and the containers that show them.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, warn};

use super::filter::ListingFilter;
use super::types::JobRecord;
use crate::utils::escape_html;

pub const APPLY_LABEL: &str = "Apply";

/// View model for one rendered job record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCard {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub published: String,
    pub apply_url: String,
}

impl JobCard {
    pub fn from_record(record: &JobRecord) -> Self {
        Self {
            title: record.title.clone(),
            company: record.company.clone(),
            location: record.location.clone(),
            description: record.description.clone(),
            published: format_publish_date(&record.date),
            apply_url: record.url.clone(),
        }
    }

    /// HTML block for this card. The apply link opens in a new browsing context.
    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="list-group-item job-item">
  <h5 class="job-title">{title}</h5>
  <p class="job-company">{company}</p>
  <p class="job-location">{location}</p>
  <p class="job-description">{description}</p>
  <div class="d-flex justify-content-between align-items-center">
    <small class="text-muted">Published {published}</small>
    <a href="{url}" target="_blank" rel="noopener" class="btn btn-primary btn-sm">{label}</a>
  </div>
</div>
"#,
            title = escape_html(&self.title),
            company = escape_html(&self.company),
            location = escape_html(&self.location),
            description = escape_html(&self.description),
            published = escape_html(&self.published),
            url = escape_html(&self.apply_url),
            label = APPLY_LABEL,
        )
    }

    pub fn to_text(&self) -> String {
        format!(
            "{}\n  {} · {}\n  {}\n  Published {} · {}: {}\n",
            self.title,
            self.company,
            self.location,
            self.description,
            self.published,
            APPLY_LABEL,
            self.apply_url
        )
    }
}

/// Map records to cards, keeping server order. Records rejected by the
/// filter are skipped.
pub fn render_listing(records: &[JobRecord], filter: Option<&ListingFilter>) -> Vec<JobCard> {
    records
        .iter()
        .filter(|record| filter.map_or(true, |f| f.matches(record)))
        .map(JobCard::from_record)
        .collect()
}

/// Show ISO dates and RFC 3339 timestamps as DD/MM/YYYY, anything else verbatim
pub fn format_publish_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.format("%d/%m/%Y").to_string();
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return timestamp.format("%d/%m/%Y").to_string();
    }
    raw.to_string()
}

/// The `#jobList` container holding every card
pub fn render_container(cards: &[JobCard]) -> String {
    let mut html = String::from("<div id=\"jobList\" class=\"list-group\">\n");
    for card in cards {
        html.push_str(&card.to_html());
    }
    html.push_str("</div>\n");
    html
}

pub fn render_page(cards: &[JobCard]) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Job offers</title>
</head>
<body>
{}</body>
</html>
"#,
        render_container(cards)
    )
}

pub fn render_text(cards: &[JobCard]) -> String {
    cards
        .iter()
        .map(JobCard::to_text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Destination of rendered cards. `replace` swaps the whole content.
pub trait ListingView: Send + Sync + 'static {
    fn replace(&self, cards: Vec<JobCard>) -> impl Future<Output = Result<()>> + Send;
}

/// Keeps the current cards in memory
#[derive(Debug, Default)]
pub struct MemoryListing {
    cards: Mutex<Vec<JobCard>>,
}

impl MemoryListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cards(cards: Vec<JobCard>) -> Self {
        Self {
            cards: Mutex::new(cards),
        }
    }

    pub fn snapshot(&self) -> Vec<JobCard> {
        self.cards
            .lock()
            .map(|cards| cards.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl ListingView for MemoryListing {
    async fn replace(&self, cards: Vec<JobCard>) -> Result<()> {
        let mut current = self
            .cards
            .lock()
            .map_err(|_| anyhow::anyhow!("listing lock poisoned"))?;
        *current = cards;
        Ok(())
    }
}

/// Writes the listing as an HTML page. The file is replaced atomically so a
/// reader never sees a half-written listing.
#[derive(Debug, Clone)]
pub struct HtmlFileListing {
    path: PathBuf,
}

impl HtmlFileListing {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ListingView for HtmlFileListing {
    async fn replace(&self, cards: Vec<JobCard>) -> Result<()> {
        let tmp_path = self.path.with_extension("html.tmp");
        let written = tokio::fs::write(&tmp_path, render_page(&cards))
            .await
            .with_context(|| format!("Failed to write file: {}", tmp_path.display()));
        let replaced = match written {
            Ok(()) => tokio::fs::rename(&tmp_path, &self.path)
                .await
                .with_context(|| format!("Failed to replace file: {}", self.path.display())),
            Err(e) => Err(e),
        };

        if let Err(e) = replaced {
            let tmp_is_file = tokio::fs::metadata(&tmp_path)
                .await
                .map(|meta| meta.is_file())
                .unwrap_or(false);
            if tmp_is_file {
                if let Err(cleanup) = tokio::fs::remove_file(&tmp_path).await {
                    warn!("Failed to remove {}: {}", tmp_path.display(), cleanup);
                }
            }
            return Err(e);
        }
        debug!("Wrote {} job cards to {}", cards.len(), self.path.display());
        Ok(())
    }
}

/// Prints the listing to stdout
#[derive(Debug, Default, Clone)]
pub struct ConsoleListing;

impl ListingView for ConsoleListing {
    async fn replace(&self, cards: Vec<JobCard>) -> Result<()> {
        println!(
            "==== {} job offers ({}) ====",
            cards.len(),
            chrono::Local::now().format("%H:%M:%S")
        );
        println!("{}", render_text(&cards));
        Ok(())
    }
}
