// src/services/extract.rs

//! Shared listing-page scraping machinery.
//!
//! Both feed extractors walk the same kind of markup: a listing container
//! holding repeated entry cards, each with a title link, a date and an
//! optional category tag. Entries are located by structural signature
//! (repeated container/entry selectors), never by absolute position, and
//! sub-fields are matched relative to each entry element.

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{JudgmentItem, ListingSelectors};
use crate::utils::normalize_space;

/// Date format used on the listing cards, e.g. "15 January 2026".
const DATE_FORMAT: &str = "%d %B %Y";

/// A listing extractor, polymorphic per feed.
pub trait Extractor {
    /// Human-readable name used in logs and error context.
    fn name(&self) -> &'static str;

    /// Extract an ordered sequence of items from a parsed page.
    ///
    /// Individual malformed entries are dropped; the whole extraction fails
    /// only when no listing container can be located at all.
    fn extract(&self, html: &Html) -> Result<Vec<JudgmentItem>>;
}

/// One well-formed entry scraped from a listing container.
#[derive(Debug, Clone)]
pub(crate) struct RawEntry {
    pub title: String,
    pub link: String,
    pub published_at: DateTime<Utc>,
    pub category: Option<String>,
}

/// Selector-driven scraper for one listing page.
pub(crate) struct ListingScraper {
    page_url: Url,
    selectors: ListingSelectors,
    date_pattern: Regex,
}

impl ListingScraper {
    pub fn new(page_url: &str, selectors: ListingSelectors) -> Result<Self> {
        let page_url = Url::parse(page_url)?;
        // Fallback for cards that carry the date as loose text, e.g.
        // "Decided on 15 January 2026".
        let date_pattern = Regex::new(r"\d{1,2} \w+ \d{4}")
            .map_err(|e| AppError::config(format!("date pattern: {e}")))?;
        Ok(Self {
            page_url,
            selectors,
            date_pattern,
        })
    }

    /// Scrape all well-formed entries from the page, in document order.
    ///
    /// Returns an extraction error only when the container selector matches
    /// nothing; a container with zero entries yields an empty vector.
    pub fn scrape(&self, html: &Html, page_name: &str) -> Result<Vec<RawEntry>> {
        let container_sel = parse_selector(&self.selectors.container)?;
        let entry_sel = parse_selector(&self.selectors.entry)?;
        let title_sel = parse_selector(&self.selectors.title)?;
        let date_sel = parse_selector(&self.selectors.date)?;
        let category_sel = parse_selector(&self.selectors.category)?;

        let Some(container) = html.select(&container_sel).next() else {
            return Err(AppError::extraction(
                page_name,
                format!(
                    "no listing container matched selector '{}'",
                    self.selectors.container
                ),
            ));
        };

        let mut entries = Vec::new();
        let mut seen = 0usize;
        let mut dropped = 0usize;

        for element in container.select(&entry_sel) {
            seen += 1;
            match self.parse_entry(&element, &title_sel, &date_sel, &category_sel) {
                Some(entry) => entries.push(entry),
                None => dropped += 1,
            }
        }

        if entries.is_empty() {
            log::warn!(
                "{page_name}: listing container found but no usable entries \
                 ({seen} candidates, {dropped} dropped) - page layout may have changed"
            );
        } else if dropped > 0 {
            log::debug!("{page_name}: dropped {dropped} of {seen} malformed entries");
        }

        Ok(entries)
    }

    fn parse_entry(
        &self,
        element: &ElementRef,
        title_sel: &Selector,
        date_sel: &Selector,
        category_sel: &Selector,
    ) -> Option<RawEntry> {
        let title_elem = element.select(title_sel).next()?;
        let title = normalize_space(&title_elem.text().collect::<String>());
        if title.is_empty() {
            log::debug!("dropping entry with empty title");
            return None;
        }

        let href = title_elem.value().attr(&self.selectors.attr_name)?;
        let link = crate::utils::resolve_url(&self.page_url, href);
        let parsed = Url::parse(&link).ok()?;
        if !matches!(parsed.scheme(), "http" | "https") {
            log::debug!("dropping entry '{title}': non-http link {link}");
            return None;
        }

        let published_at = self.parse_entry_date(element, date_sel).or_else(|| {
            log::debug!("dropping entry '{title}': missing or unparseable date");
            None
        })?;

        let category = element
            .select(category_sel)
            .next()
            .map(|el| normalize_space(&el.text().collect::<String>()))
            .filter(|s| !s.is_empty());

        Some(RawEntry {
            title,
            link,
            published_at,
            category,
        })
    }

    fn parse_entry_date(&self, element: &ElementRef, date_sel: &Selector) -> Option<DateTime<Utc>> {
        let date_text = match element.select(date_sel).next() {
            Some(el) => normalize_space(&el.text().collect::<String>()),
            None => {
                let text = normalize_space(&element.text().collect::<String>());
                self.date_pattern.find(&text)?.as_str().to_string()
            }
        };
        parse_card_date(&date_text)
    }
}

/// Parse a card date, fixing time-of-day at midnight UTC for determinism.
pub(crate) fn parse_card_date(text: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

pub(crate) fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selector_valid() {
        assert!(parse_selector("div.card").is_ok());
        assert!(parse_selector("article, li.card").is_ok());
    }

    #[test]
    fn test_parse_selector_invalid() {
        assert!(parse_selector("[[invalid").is_err());
    }

    #[test]
    fn test_parse_card_date() {
        let date = parse_card_date("15 January 2026").unwrap();
        assert_eq!(date.to_rfc2822(), "Thu, 15 Jan 2026 00:00:00 +0000");
        assert!(parse_card_date("2026-01-15").is_none());
        assert!(parse_card_date("yesterday").is_none());
    }

    #[test]
    fn test_scrape_missing_container() {
        let scraper = ListingScraper::new(
            "https://www.supremecourt.uk/news",
            ListingSelectors::default(),
        )
        .unwrap();
        let html = Html::parse_document("<html><body><p>maintenance page</p></body></html>");
        let err = scraper.scrape(&html, "news").unwrap_err();
        assert!(matches!(err, AppError::Extraction { .. }));
    }

    #[test]
    fn test_scrape_empty_container() {
        let scraper = ListingScraper::new(
            "https://www.supremecourt.uk/news",
            ListingSelectors::default(),
        )
        .unwrap();
        let html = Html::parse_document("<html><body><main></main></body></html>");
        let entries = scraper.scrape(&html, "news").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_scrape_resolves_relative_links() {
        let scraper = ListingScraper::new(
            "https://www.supremecourt.uk/news",
            ListingSelectors::default(),
        )
        .unwrap();
        let html = Html::parse_document(
            r#"<main><article>
                 <a href="/cases/uksc-2026-0001">R v Example</a>
                 <time>15 January 2026</time>
               </article></main>"#,
        );
        let entries = scraper.scrape(&html, "news").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].link,
            "https://www.supremecourt.uk/cases/uksc-2026-0001"
        );
    }

    #[test]
    fn test_scrape_date_fallback_from_text() {
        let scraper = ListingScraper::new(
            "https://www.supremecourt.uk/news",
            ListingSelectors::default(),
        )
        .unwrap();
        let html = Html::parse_document(
            r#"<main><article>
                 <a href="/cases/1">Case One</a>
                 <p>Judgment handed down 3 February 2026.</p>
               </article></main>"#,
        );
        let entries = scraper.scrape(&html, "news").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].published_at.to_rfc2822(),
            "Tue, 03 Feb 2026 00:00:00 +0000"
        );
    }
}
