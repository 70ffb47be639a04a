// src/pipeline/feed.rs

//! Single-feed pipeline: fetch, extract, render, publish.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use scraper::Html;

use crate::error::Result;
use crate::models::FetchConfig;
use crate::render::{self, FeedSpec};
use crate::services::Extractor;
use crate::storage::LocalStorage;
use crate::utils::http;

/// Everything one feed pipeline needs for a run.
pub struct FeedJob {
    /// Short name used in logs and failure summaries
    pub name: &'static str,

    /// Listing page to fetch
    pub source_url: String,

    /// Output file name under the storage root
    pub output_file: String,

    /// Channel metadata
    pub spec: FeedSpec,

    /// Extractor variant for this feed
    pub extractor: Box<dyn Extractor>,
}

/// Result of one successful feed run.
#[derive(Debug)]
pub struct FeedOutcome {
    pub name: &'static str,
    pub item_count: usize,
    pub output_path: PathBuf,
}

/// Run one feed pipeline end to end.
///
/// On any error the previously published file is left untouched; the
/// rendered document only replaces it after a complete, successful run.
pub async fn run_feed(
    client: &reqwest::Client,
    fetch_config: &FetchConfig,
    max_items: usize,
    job: &FeedJob,
    storage: &LocalStorage,
) -> Result<FeedOutcome> {
    log::info!("{}: fetching {}", job.name, job.source_url);
    let text = http::fetch_text(client, &job.source_url, fetch_config).await?;

    let (xml, item_count) = build_feed_xml(&text, job, max_items, Utc::now())?;

    storage.write_atomic(&job.output_file, xml.as_bytes()).await?;
    let output_path = storage.path(&job.output_file);
    log::info!(
        "{}: wrote {} ({item_count} items)",
        job.name,
        output_path.display()
    );

    Ok(FeedOutcome {
        name: job.name,
        item_count,
        output_path,
    })
}

/// Extract and render one feed document from fetched page text.
///
/// Split out from `run_feed` so the whole transformation can be exercised
/// on fixture HTML without a network.
pub fn build_feed_xml(
    html_text: &str,
    job: &FeedJob,
    max_items: usize,
    build_time: DateTime<Utc>,
) -> Result<(String, usize)> {
    let items = {
        let document = Html::parse_document(html_text);
        job.extractor.extract(&document)?
    };
    let item_count = items.len();
    log::info!("{}: extracted {item_count} items", job.name);

    let xml = render::render_feed(&job.spec, &items, max_items, build_time);
    Ok((xml, item_count.min(max_items)))
}
