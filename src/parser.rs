use crate::types::{RawFeedEntry, Result, StylecastError};
use chrono::{DateTime, NaiveDateTime, Utc};
use feed_rs::parser;
use url::Url;

const SEARCH_FEED_BASE: &str = "https://news.google.com/rss/search";

/// Timestamp formats seen in the wild beyond RFC 2822 / RFC 3339.
const EXTRA_DATE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%d.%m.%Y %H:%M"];

/// Parse an RSS/Atom body into raw entries. The feed title becomes the
/// per-entry source name, falling back to the feed URL.
pub fn parse_feed(content: &str, feed_url: &str) -> Result<Vec<RawFeedEntry>> {
    let feed = parser::parse(content.as_bytes())
        .map_err(|e| StylecastError::Parse(format!("failed to parse feed {}: {}", feed_url, e)))?;

    let source = feed
        .title
        .map(|t| t.content)
        .unwrap_or_else(|| feed_url.to_string());

    let entries = feed
        .entries
        .into_iter()
        .map(|entry| RawFeedEntry {
            title: entry
                .title
                .map(|t| t.content)
                .unwrap_or_else(|| "No title".to_string()),
            summary: entry.summary.map(|s| s.content),
            link: entry.links.first().map(|l| l.href.clone()),
            published_raw: entry.published.map(|d| d.to_rfc2822()),
            source: Some(source.clone()),
        })
        .collect();

    Ok(entries)
}

/// Multi-format publish date parse. An absent date yields the minimum-time
/// sentinel; a present-but-unparseable one falls back to "now".
pub fn parse_publish_date(raw: Option<&str>) -> DateTime<Utc> {
    let Some(raw) = raw else {
        return DateTime::<Utc>::MIN_UTC;
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return DateTime::<Utc>::MIN_UTC;
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc);
    }
    for fmt in EXTRA_DATE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return naive.and_utc();
        }
    }

    Utc::now()
}

/// Build the topic-scoped aggregator search feed URL.
pub fn search_feed_url(topic: &str, language: &str, country: &str) -> Result<String> {
    let short_language = language.split('-').next().unwrap_or(language);
    let mut url = Url::parse(SEARCH_FEED_BASE)?;
    url.query_pairs_mut()
        .append_pair("q", topic)
        .append_pair("hl", language)
        .append_pair("gl", country)
        .append_pair("ceid", &format!("{}:{}", country, short_language));
    Ok(url.to_string())
}
