// src/utils/http.rs

//! HTTP client utilities.
//!
//! One outbound GET per listing page, with bounded retries on transient
//! failures. Client errors other than 429 are never retried.

use std::time::Duration;

use reqwest::StatusCode;

use crate::error::{AppError, Result};
use crate::models::FetchConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_client(config: &FetchConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetch a page and return its body as text.
///
/// Retries up to `config.max_attempts` total attempts with exponential
/// backoff on timeouts, connection errors and retriable statuses.
pub async fn fetch_text(
    client: &reqwest::Client,
    url: &str,
    config: &FetchConfig,
) -> Result<String> {
    let max_attempts = config.max_attempts.max(1);
    let mut last_error = String::new();

    for attempt in 1..=max_attempts {
        match client.get(url).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return Ok(response.text().await?);
                }

                last_error = format!("HTTP status {status}");
                if should_retry_status(status) && attempt < max_attempts {
                    let delay = backoff_delay(attempt, config.retry_base_delay_ms);
                    log::warn!(
                        "Fetch attempt {attempt}/{max_attempts} for {url} got {status}, \
                         retrying in {}ms",
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }
                return Err(AppError::fetch(url, &last_error));
            }
            Err(error) => {
                last_error = error.to_string();
                if should_retry_error(&error) && attempt < max_attempts {
                    let delay = backoff_delay(attempt, config.retry_base_delay_ms);
                    log::warn!(
                        "Fetch attempt {attempt}/{max_attempts} for {url} failed ({error}), \
                         retrying in {}ms",
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }
                return Err(AppError::Http(error));
            }
        }
    }

    Err(AppError::fetch(
        url,
        format!("retries exhausted: {last_error}"),
    ))
}

fn should_retry_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn should_retry_error(error: &reqwest::Error) -> bool {
    if error.is_timeout() || error.is_connect() {
        return true;
    }
    if let Some(status) = error.status() {
        return should_retry_status(status);
    }
    false
}

fn backoff_delay(attempt: usize, base_ms: u64) -> Duration {
    let factor = 1u64.checked_shl((attempt - 1) as u32).unwrap_or(u64::MAX);
    Duration::from_millis(base_ms.saturating_mul(factor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retriable_statuses() {
        assert!(should_retry_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(should_retry_status(StatusCode::BAD_GATEWAY));
        assert!(should_retry_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(!should_retry_status(StatusCode::NOT_FOUND));
        assert!(!should_retry_status(StatusCode::FORBIDDEN));
    }

    #[test]
    fn test_backoff_doubles() {
        assert_eq!(backoff_delay(1, 500), Duration::from_millis(500));
        assert_eq!(backoff_delay(2, 500), Duration::from_millis(1000));
        assert_eq!(backoff_delay(3, 500), Duration::from_millis(2000));
    }
}
