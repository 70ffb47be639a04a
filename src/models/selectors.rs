// src/models/selectors.rs

//! CSS selectors for scraping a listing page.

use serde::{Deserialize, Serialize};

/// CSS selectors describing one listing page's structure.
///
/// The container selector is the structural signature of the listing; if it
/// matches nothing the page layout has changed beyond recognition. Entry
/// fields are matched relative to each entry element, never by absolute
/// document position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingSelectors {
    /// Selector for the listing container region
    #[serde(default = "default_container")]
    pub container: String,

    /// Selector for each entry/card within the container
    #[serde(default = "default_entry")]
    pub entry: String,

    /// Selector for the title link within an entry
    #[serde(default = "default_title")]
    pub title: String,

    /// Selector for the date element within an entry
    #[serde(default = "default_date")]
    pub date: String,

    /// Selector for the category/tag element within an entry
    #[serde(default = "default_category")]
    pub category: String,

    /// HTML attribute name for extracting links (usually "href")
    #[serde(default = "default_attr_name")]
    pub attr_name: String,
}

fn default_container() -> String {
    "main".to_string()
}

fn default_entry() -> String {
    "article, li.card, div.card, .grid .card".to_string()
}

fn default_title() -> String {
    "a[href]".to_string()
}

fn default_date() -> String {
    "time, .date, .meta time".to_string()
}

fn default_category() -> String {
    ".category, .meta, .tags".to_string()
}

fn default_attr_name() -> String {
    "href".to_string()
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            container: default_container(),
            entry: default_entry(),
            title: default_title(),
            date: default_date(),
            category: default_category(),
            attr_name: default_attr_name(),
        }
    }
}
