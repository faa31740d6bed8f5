use crate::parser::{parse_publish_date, search_feed_url};
use crate::traits::FeedSource;
use crate::types::{NewsConfig, NewsItem, RawFeedEntry};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Fans out to the configured feed list plus one topic-parameterized search
/// endpoint, then merges, deduplicates, and ranks the results. A failing or
/// hung source contributes zero items and never fails the overall call.
pub struct NewsAggregator {
    source: Arc<dyn FeedSource>,
    config: NewsConfig,
}

/// One planned fetch: the feed URL and whether its items still need the
/// topic substring filter (the search endpoint is already topic-scoped).
struct PlannedFetch {
    url: String,
    filter_by_topic: bool,
}

impl NewsAggregator {
    pub fn new(source: Arc<dyn FeedSource>, config: NewsConfig) -> Self {
        Self { source, config }
    }

    /// Search all sources for items about `topic`, newest first.
    pub async fn search_by_topic(&self, topic: &str, max_results: usize) -> Vec<NewsItem> {
        if !self.config.enabled {
            info!("news search is disabled");
            return Vec::new();
        }
        info!("searching news for topic: {}", topic);

        let mut fetches: Vec<PlannedFetch> = self
            .config
            .feed_sources
            .iter()
            .map(|url| PlannedFetch {
                url: url.clone(),
                filter_by_topic: true,
            })
            .collect();

        match search_feed_url(
            topic,
            &self.config.search_language,
            &self.config.search_country,
        ) {
            Ok(url) => fetches.push(PlannedFetch {
                url,
                filter_by_topic: false,
            }),
            Err(e) => warn!("failed to build search feed URL: {}", e),
        }

        let topic_lower = topic.to_lowercase();
        let mut items = Vec::new();
        for (filter_by_topic, entries) in self.fan_out(fetches).await {
            for entry in entries {
                let item = normalize(entry);
                if !filter_by_topic || matches_topic(&item, &topic_lower) {
                    items.push(item);
                }
            }
        }

        let ranked = rank(dedup_by_title(items), max_results);
        info!("found {} news items for topic '{}'", ranked.len(), topic);
        ranked
    }

    /// Latest items across all configured feeds, no topic filter.
    pub async fn latest(&self, max_results: usize) -> Vec<NewsItem> {
        info!("fetching latest news");

        let fetches: Vec<PlannedFetch> = self
            .config
            .feed_sources
            .iter()
            .map(|url| PlannedFetch {
                url: url.clone(),
                filter_by_topic: false,
            })
            .collect();

        let mut items = Vec::new();
        for (_, entries) in self.fan_out(fetches).await {
            items.extend(entries.into_iter().map(normalize));
        }

        rank(dedup_by_title(items), max_results)
    }

    /// Run all fetches concurrently, each bounded by its own timeout, and
    /// merge only after every source has settled.
    async fn fan_out(&self, fetches: Vec<PlannedFetch>) -> Vec<(bool, Vec<RawFeedEntry>)> {
        let timeout = Duration::from_secs(self.config.timeout_seconds);
        let mut set = JoinSet::new();

        for fetch in fetches {
            let source = Arc::clone(&self.source);
            set.spawn(async move {
                match tokio::time::timeout(timeout, source.fetch(&fetch.url, timeout)).await {
                    Ok(Ok(entries)) => (fetch.filter_by_topic, entries),
                    Ok(Err(e)) => {
                        warn!("feed {} failed: {}", fetch.url, e);
                        (fetch.filter_by_topic, Vec::new())
                    }
                    Err(_) => {
                        warn!("feed {} timed out after {}s", fetch.url, timeout.as_secs());
                        (fetch.filter_by_topic, Vec::new())
                    }
                }
            });
        }

        let mut results = Vec::new();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => warn!("feed fetch task failed: {}", e),
            }
        }
        results
    }
}

fn normalize(entry: RawFeedEntry) -> NewsItem {
    NewsItem {
        published: parse_publish_date(entry.published_raw.as_deref()),
        title: entry.title,
        summary: entry.summary,
        source: entry.source.unwrap_or_else(|| "unknown".to_string()),
        link: entry.link,
    }
}

/// Permissive substring match over title and summary; false positives are
/// accepted.
fn matches_topic(item: &NewsItem, topic_lower: &str) -> bool {
    if item.title.to_lowercase().contains(topic_lower) {
        return true;
    }
    item.summary
        .as_deref()
        .map(|s| s.to_lowercase().contains(topic_lower))
        .unwrap_or(false)
}

/// Deduplicate by trimmed, lower-cased title; first occurrence wins and
/// empty titles are dropped. Applying this twice yields the same set.
pub fn dedup_by_title(items: Vec<NewsItem>) -> Vec<NewsItem> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(items.len());
    for item in items {
        let key = item.normalized_title();
        if key.is_empty() {
            continue;
        }
        if seen.insert(key) {
            unique.push(item);
        }
    }
    unique
}

/// Sort by publish time descending (unknown dates sink to the end) and
/// truncate to `max_results`.
fn rank(mut items: Vec<NewsItem>, max_results: usize) -> Vec<NewsItem> {
    items.sort_by(|a, b| b.published.cmp(&a.published));
    items.truncate(max_results);
    items
}
