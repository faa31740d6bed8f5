use crate::parser;
use crate::traits::FeedSource;
use crate::types::{RawFeedEntry, Result, StylecastError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

const USER_AGENT: &str = "stylecast/0.1";

/// Feed source backed by a shared HTTP client. Each fetch is bounded by the
/// caller-supplied timeout and fails independently of sibling sources.
pub struct HttpFeedSource {
    client: reqwest::Client,
}

impl HttpFeedSource {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

impl Default for HttpFeedSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<RawFeedEntry>> {
        debug!("fetching feed: {}", url);

        let response = self.client.get(url).timeout(timeout).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StylecastError::Fetch {
                url: url.to_string(),
                reason: format!("HTTP {}", status),
            });
        }

        let body = response.text().await?;
        let entries = parser::parse_feed(&body, url)?;

        info!("fetched {} entries from {}", entries.len(), url);
        Ok(entries)
    }
}
