//! Pipeline entry points for feed generation.
//!
//! - `build_jobs`: assemble the two feed pipelines from configuration
//! - `run_all`: run both pipelines, isolating failures per feed

pub mod feed;

pub use feed::{FeedJob, FeedOutcome, build_feed_xml, run_feed};

use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::Config;
use crate::render::FeedSpec;
use crate::services::{FutureJudgmentsExtractor, LatestJudgmentsExtractor};
use crate::storage::LocalStorage;
use crate::utils::http;

/// Assemble the two feed jobs from configuration.
pub fn build_jobs(config: &Config) -> Result<Vec<FeedJob>> {
    let latest_url = config.site.latest_judgments_url();
    let news_url = config.site.news_url();

    let latest = FeedJob {
        name: "latest-judgments",
        source_url: latest_url.clone(),
        output_file: config.output.latest_feed_file.clone(),
        spec: FeedSpec {
            title: "UK Supreme Court - Latest judgments".to_string(),
            link: latest_url.clone(),
            description: "Auto-generated RSS of the Supreme Court's 'Latest judgments' updates."
                .to_string(),
        },
        extractor: Box::new(LatestJudgmentsExtractor::new(
            &latest_url,
            config.selectors.latest.clone(),
        )?),
    };

    let future = FeedJob {
        name: "future-judgments",
        source_url: news_url.clone(),
        output_file: config.output.future_feed_file.clone(),
        spec: FeedSpec {
            title: "UK Supreme Court - Future judgments".to_string(),
            link: news_url.clone(),
            description: "Auto-generated RSS of the Supreme Court's 'Future judgments' updates."
                .to_string(),
        },
        extractor: Box::new(FutureJudgmentsExtractor::new(
            &news_url,
            config.selectors.news.clone(),
        )?),
    };

    Ok(vec![latest, future])
}

/// Run both feed pipelines sequentially.
///
/// Pipelines are isolated: a failure in one does not stop the other, and a
/// feed that succeeds is published even when its sibling fails. Returns an
/// error summarizing the failures if any pipeline failed.
pub async fn run_all(config: &Config, storage: &LocalStorage) -> Result<Vec<FeedOutcome>> {
    let client = http::create_client(&config.fetch)?;
    let jobs = build_jobs(config)?;
    let total = jobs.len();
    let delay = Duration::from_millis(config.fetch.request_delay_ms);

    let mut outcomes = Vec::new();
    let mut failures: Vec<String> = Vec::new();

    for (i, job) in jobs.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            // Courtesy pause between requests to the source site.
            tokio::time::sleep(delay).await;
        }

        match run_feed(&client, &config.fetch, config.output.max_items, job, storage).await {
            Ok(outcome) => outcomes.push(outcome),
            Err(error) => {
                log::error!("{}: pipeline failed: {error}", job.name);
                failures.push(format!("{}: {error}", job.name));
            }
        }
    }

    if failures.is_empty() {
        Ok(outcomes)
    } else {
        Err(AppError::Pipeline {
            failed: failures.len(),
            total,
            detail: failures.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_jobs_covers_both_feeds() {
        let config = Config::default();
        let jobs = build_jobs(&config).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].name, "latest-judgments");
        assert_eq!(jobs[1].name, "future-judgments");
        assert_eq!(
            jobs[0].source_url,
            "https://www.supremecourt.uk/news/latest-judgments"
        );
        assert_eq!(jobs[1].source_url, "https://www.supremecourt.uk/news");
        assert_eq!(jobs[0].output_file, "latest-judgments.xml");
        assert_eq!(jobs[1].output_file, "future-judgments.xml");
    }

    #[test]
    fn build_jobs_defers_selector_validation_to_extraction() {
        let mut config = Config::default();
        config.selectors.latest.entry = "[[broken".to_string();
        // Selectors are parsed inside the scrape call, so assembly succeeds
        // and the first extraction reports the selector error.
        assert!(build_jobs(&config).is_ok());
    }
}
