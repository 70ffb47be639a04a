// src/models/mod.rs

//! Domain models for the feed generator.

mod config;
mod judgment;
mod selectors;

// Re-export all public types
pub use config::{Config, FetchConfig, OutputConfig, SelectorsConfig, SiteConfig};
pub use judgment::JudgmentItem;
pub use selectors::ListingSelectors;
