// src/services/latest.rs

//! Extractor for the "Latest judgments" page.

use scraper::Html;

use crate::error::Result;
use crate::models::{JudgmentItem, ListingSelectors};

use super::extract::{Extractor, ListingScraper};

/// Extracts decided judgments from the "Latest judgments" listing.
///
/// Decision dates on this page are well-formed day-month-year values; an
/// entry whose date does not parse is skipped, not fatal.
pub struct LatestJudgmentsExtractor {
    scraper: ListingScraper,
}

impl LatestJudgmentsExtractor {
    pub fn new(page_url: &str, selectors: ListingSelectors) -> Result<Self> {
        Ok(Self {
            scraper: ListingScraper::new(page_url, selectors)?,
        })
    }
}

impl Extractor for LatestJudgmentsExtractor {
    fn name(&self) -> &'static str {
        "latest-judgments"
    }

    fn extract(&self, html: &Html) -> Result<Vec<JudgmentItem>> {
        let entries = self.scraper.scrape(html, self.name())?;
        let items = entries
            .into_iter()
            .map(|entry| {
                let summary = entry
                    .category
                    .clone()
                    .or_else(|| Some("Latest judgments".to_string()));
                JudgmentItem {
                    title: entry.title,
                    link: entry.link,
                    published_at: entry.published_at,
                    category: entry.category,
                    summary,
                }
            })
            .collect();
        Ok(items)
    }
}
