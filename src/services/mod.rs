//! Service layer for the feed generator.
//!
//! This module contains the extraction logic:
//! - Shared listing scraper (`extract`)
//! - Decided judgments (`LatestJudgmentsExtractor`)
//! - Upcoming judgments (`FutureJudgmentsExtractor`)

mod extract;
mod future;
mod latest;

pub use extract::Extractor;
pub use future::FutureJudgmentsExtractor;
pub use latest::LatestJudgmentsExtractor;
