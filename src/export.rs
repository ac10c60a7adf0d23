// src/export.rs
//! One-shot listing output for the `list` command

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use crate::listing::filter::ListingFilter;
use crate::listing::types::JobRecord;
use crate::listing::view::{render_listing, render_page, render_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
    Json,
    Csv,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    title: &'a str,
    company: &'a str,
    location: &'a str,
    description: &'a str,
    date: &'a str,
    url: &'a str,
    source: &'a str,
}

impl<'a> From<&'a JobRecord> for CsvRow<'a> {
    fn from(record: &'a JobRecord) -> Self {
        Self {
            title: &record.title,
            company: &record.company,
            location: &record.location,
            description: &record.description,
            date: &record.date,
            url: &record.url,
            source: record.source.as_deref().unwrap_or(""),
        }
    }
}

/// Render the (optionally filtered) listing in the requested format
pub fn format_listing(
    records: &[JobRecord],
    filter: Option<&ListingFilter>,
    format: OutputFormat,
) -> Result<String> {
    let selected: Vec<&JobRecord> = records
        .iter()
        .filter(|record| filter.map_or(true, |f| f.matches(record)))
        .collect();

    match format {
        OutputFormat::Text => Ok(render_text(&render_listing(records, filter))),
        OutputFormat::Html => Ok(render_page(&render_listing(records, filter))),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&selected).context("Failed to serialize listing")
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for record in selected {
                writer
                    .serialize(CsvRow::from(record))
                    .context("Failed to write CSV row")?;
            }
            let bytes = writer.into_inner().context("Failed to flush CSV output")?;
            String::from_utf8(bytes).context("CSV output is not valid UTF-8")
        }
    }
}
