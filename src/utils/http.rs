// src/utils/http.rs

//! HTTP fetching with a bounded retry policy.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::HttpConfig;

/// Abstraction over HTTP fetching so tests can substitute canned responses.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch a URL and return the full response body.
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>>;

    /// Fetch a URL and decode the body as text.
    async fn get_text(&self, url: &str) -> Result<String> {
        let bytes = self.get_bytes(url).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// HTTP fetcher applying the configured User-Agent, timeout and retry policy.
///
/// Both listing pages and gazette PDFs are fetched through this one policy.
/// Non-success HTTP statuses count as failed attempts and are retried.
pub struct Fetcher {
    client: reqwest::Client,
    retry_count: u32,
    retry_delay: Duration,
}

impl Fetcher {
    /// Create a configured fetcher.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            retry_count: config.retry_count.max(1),
            retry_delay: Duration::from_secs(config.retry_delay_secs),
        })
    }

    /// One attempt: send, check the HTTP status, read the whole body.
    async fn try_get(&self, url: &str) -> std::result::Result<Vec<u8>, reqwest::Error> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl Fetch for Fetcher {
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_get(url).await {
                Ok(body) => return Ok(body),
                Err(error) => {
                    log::warn!(
                        "Attempt {}/{} failed for {}: {}",
                        attempt,
                        self.retry_count,
                        url,
                        error
                    );
                    if attempt >= self.retry_count {
                        return Err(AppError::Http(error));
                    }
                    log::info!("Retrying in {}s...", self.retry_delay.as_secs());
                }
            }
            tokio::time::sleep(self.retry_delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedFetch(Vec<u8>);

    #[async_trait]
    impl Fetch for CannedFetch {
        async fn get_bytes(&self, _url: &str) -> Result<Vec<u8>> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_get_text_decodes_lossily() {
        let fetch = CannedFetch(vec![b'o', b'k', 0xFF]);
        let text = fetch.get_text("https://example.com").await.unwrap();
        assert_eq!(text, "ok\u{FFFD}");
    }

    #[test]
    fn test_fetcher_builds_from_config() {
        assert!(Fetcher::new(&HttpConfig::default()).is_ok());
    }

    #[test]
    fn test_retry_count_clamped_to_one() {
        let config = HttpConfig {
            retry_count: 0,
            ..HttpConfig::default()
        };
        let fetcher = Fetcher::new(&config).unwrap();
        assert_eq!(fetcher.retry_count, 1);
    }
}
