// src/services/future.rs

//! Extractor for the news hub page, filtered to "Future judgments".

use scraper::Html;

use crate::error::Result;
use crate::models::{JudgmentItem, ListingSelectors};

use super::extract::{Extractor, ListingScraper};

/// Category tag that marks an upcoming judgment on the news hub.
const FUTURE_CATEGORY: &str = "Future judgments";

/// Extracts upcoming judgments from the general news listing.
///
/// Only entries whose category tag equals "Future judgments"
/// (case-insensitively) are kept; everything else on the news hub is
/// discarded silently. The filter is not an error condition.
pub struct FutureJudgmentsExtractor {
    scraper: ListingScraper,
}

impl FutureJudgmentsExtractor {
    pub fn new(page_url: &str, selectors: ListingSelectors) -> Result<Self> {
        Ok(Self {
            scraper: ListingScraper::new(page_url, selectors)?,
        })
    }
}

impl Extractor for FutureJudgmentsExtractor {
    fn name(&self) -> &'static str {
        "future-judgments"
    }

    fn extract(&self, html: &Html) -> Result<Vec<JudgmentItem>> {
        let entries = self.scraper.scrape(html, self.name())?;
        let total = entries.len();

        let items: Vec<JudgmentItem> = entries
            .into_iter()
            .filter(|entry| {
                entry
                    .category
                    .as_deref()
                    .is_some_and(|c| c.eq_ignore_ascii_case(FUTURE_CATEGORY))
            })
            .map(|entry| JudgmentItem {
                title: entry.title,
                link: entry.link,
                published_at: entry.published_at,
                summary: entry.category.clone(),
                category: entry.category,
            })
            .collect();

        log::debug!(
            "{}: kept {} of {} news entries tagged '{}'",
            self.name(),
            items.len(),
            total,
            FUTURE_CATEGORY
        );
        Ok(items)
    }
}
