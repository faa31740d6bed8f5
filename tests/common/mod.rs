#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use stylecast::traits::FeedSource;
use stylecast::types::{NewsConfig, RawFeedEntry, Result, StylecastError};

/// Feed source serving canned entries per URL. Unknown URLs yield nothing;
/// listed URLs can be forced to fail.
pub struct StaticFeedSource {
    feeds: HashMap<String, Vec<RawFeedEntry>>,
    failing: Vec<String>,
}

impl StaticFeedSource {
    pub fn new() -> Self {
        Self {
            feeds: HashMap::new(),
            failing: Vec::new(),
        }
    }

    pub fn with_feed(mut self, url: &str, entries: Vec<RawFeedEntry>) -> Self {
        self.feeds.insert(url.to_string(), entries);
        self
    }

    pub fn with_failing(mut self, url: &str) -> Self {
        self.failing.push(url.to_string());
        self
    }
}

#[async_trait]
impl FeedSource for StaticFeedSource {
    async fn fetch(&self, url: &str, _timeout: Duration) -> Result<Vec<RawFeedEntry>> {
        if self.failing.iter().any(|u| u == url) {
            return Err(StylecastError::Fetch {
                url: url.to_string(),
                reason: "unreachable".to_string(),
            });
        }
        Ok(self.feeds.get(url).cloned().unwrap_or_default())
    }
}

pub fn entry(title: &str, summary: &str, published: Option<&str>) -> RawFeedEntry {
    RawFeedEntry {
        title: title.to_string(),
        summary: if summary.is_empty() {
            None
        } else {
            Some(summary.to_string())
        },
        link: Some("https://example.com/post".to_string()),
        published_raw: published.map(|p| p.to_string()),
        source: Some("Example Feed".to_string()),
    }
}

pub fn news_config(urls: &[&str]) -> NewsConfig {
    NewsConfig {
        feed_sources: urls.iter().map(|u| u.to_string()).collect(),
        ..NewsConfig::default()
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .try_init();
}
