mod common;

use chrono::{DateTime, Duration, Utc};
use common::{entry, init_tracing, news_config, StaticFeedSource};
use std::sync::Arc;
use stylecast::digest::{format_news_context, format_news_digest};
use stylecast::parser::parse_publish_date;
use stylecast::types::NewsItem;
use stylecast::{dedup_by_title, NewsAggregator};

fn item(title: &str, published: DateTime<Utc>) -> NewsItem {
    NewsItem {
        title: title.to_string(),
        summary: None,
        source: "Example Feed".to_string(),
        link: None,
        published,
    }
}

#[test]
fn dedup_keeps_first_occurrence_and_is_idempotent() {
    let now = Utc::now();
    let items = vec![
        item("AI breakthrough", now),
        item("  ai breakthrough ", now - Duration::hours(1)),
        item("Market update", now),
        item("AI Breakthrough", now - Duration::hours(2)),
        item("", now),
    ];

    let once = dedup_by_title(items);
    let titles: Vec<&str> = once.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["AI breakthrough", "Market update"]);

    let twice = dedup_by_title(once.clone());
    let titles_twice: Vec<&str> = twice.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, titles_twice, "dedup must be idempotent");
}

#[tokio::test]
async fn search_sorts_newest_first_with_unknown_dates_last() {
    init_tracing();

    let source = StaticFeedSource::new().with_feed(
        "https://feeds.test/a",
        vec![
            entry("rust release old", "", Some("Mon, 01 Jan 2024 12:00:00 +0000")),
            entry("rust release new", "", Some("Wed, 03 Jan 2024 12:00:00 +0000")),
            entry("rust release undated", "", None),
            entry("rust release mid", "", Some("Tue, 02 Jan 2024 12:00:00 +0000")),
        ],
    );
    let aggregator = NewsAggregator::new(Arc::new(source), news_config(&["https://feeds.test/a"]));

    let items = aggregator.search_by_topic("rust", 10).await;
    let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "rust release new",
            "rust release mid",
            "rust release old",
            "rust release undated",
        ]
    );

    for pair in items.windows(2) {
        assert!(pair[0].published >= pair[1].published, "must be non-increasing");
    }
    assert!(!items[3].has_known_date());
}

#[tokio::test]
async fn failing_source_is_isolated_from_healthy_siblings() {
    init_tracing();

    let source = StaticFeedSource::new()
        .with_feed(
            "https://feeds.test/a",
            vec![entry("space telescope news", "", None)],
        )
        .with_failing("https://feeds.test/b")
        .with_feed(
            "https://feeds.test/c",
            vec![entry("space probe news", "", None)],
        );
    let aggregator = NewsAggregator::new(
        Arc::new(source),
        news_config(&[
            "https://feeds.test/a",
            "https://feeds.test/b",
            "https://feeds.test/c",
        ]),
    );

    let items = aggregator.search_by_topic("space", 10).await;
    let mut titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
    titles.sort();
    assert_eq!(titles, vec!["space probe news", "space telescope news"]);
}

#[tokio::test]
async fn topic_filter_matches_title_or_summary_substring() {
    init_tracing();

    let source = StaticFeedSource::new().with_feed(
        "https://feeds.test/a",
        vec![
            entry("Quantum computing leap", "", None),
            entry("Tech roundup", "a quantum speedup was announced", None),
            entry("Football results", "weekend league scores", None),
        ],
    );
    let aggregator = NewsAggregator::new(Arc::new(source), news_config(&["https://feeds.test/a"]));

    let items = aggregator.search_by_topic("quantum", 10).await;
    let mut titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
    titles.sort();
    assert_eq!(titles, vec!["Quantum computing leap", "Tech roundup"]);
}

#[tokio::test]
async fn disabled_search_returns_no_items() {
    let source = StaticFeedSource::new().with_feed(
        "https://feeds.test/a",
        vec![entry("anything at all", "", None)],
    );
    let mut config = news_config(&["https://feeds.test/a"]);
    config.enabled = false;
    let aggregator = NewsAggregator::new(Arc::new(source), config);

    assert!(aggregator.search_by_topic("anything", 10).await.is_empty());
}

#[tokio::test]
async fn latest_merges_all_feeds_without_topic_filter() {
    init_tracing();

    let source = StaticFeedSource::new()
        .with_feed(
            "https://feeds.test/a",
            vec![entry("first story", "", Some("Tue, 02 Jan 2024 08:00:00 +0000"))],
        )
        .with_feed(
            "https://feeds.test/b",
            vec![entry("second story", "", Some("Wed, 03 Jan 2024 08:00:00 +0000"))],
        );
    let aggregator = NewsAggregator::new(
        Arc::new(source),
        news_config(&["https://feeds.test/a", "https://feeds.test/b"]),
    );

    let items = aggregator.latest(10).await;
    let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["second story", "first story"]);
}

#[tokio::test]
async fn max_results_truncates_ranked_output() {
    let source = StaticFeedSource::new().with_feed(
        "https://feeds.test/a",
        vec![
            entry("ai story one", "", Some("Mon, 01 Jan 2024 10:00:00 +0000")),
            entry("ai story two", "", Some("Tue, 02 Jan 2024 10:00:00 +0000")),
            entry("ai story three", "", Some("Wed, 03 Jan 2024 10:00:00 +0000")),
        ],
    );
    let aggregator = NewsAggregator::new(Arc::new(source), news_config(&["https://feeds.test/a"]));

    let items = aggregator.search_by_topic("ai", 2).await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "ai story three");
}

#[test]
fn publish_date_parsing_covers_known_formats_and_fallbacks() {
    assert_eq!(parse_publish_date(None), DateTime::<Utc>::MIN_UTC);
    assert_eq!(parse_publish_date(Some("   ")), DateTime::<Utc>::MIN_UTC);

    let rfc2822 = parse_publish_date(Some("Mon, 01 Jan 2024 12:00:00 +0000"));
    assert_eq!(rfc2822.to_rfc3339(), "2024-01-01T12:00:00+00:00");

    let rfc3339 = parse_publish_date(Some("2024-01-01T12:00:00+00:00"));
    assert_eq!(rfc3339, rfc2822);

    let simple = parse_publish_date(Some("2024-01-05 10:30:00"));
    assert_eq!(simple.to_rfc3339(), "2024-01-05T10:30:00+00:00");

    let dotted = parse_publish_date(Some("05.01.2024 10:30"));
    assert_eq!(dotted.to_rfc3339(), "2024-01-05T10:30:00+00:00");

    // Recognized-but-unparseable falls back to "now", not the sentinel.
    let garbage = parse_publish_date(Some("next Tuesday-ish"));
    assert!(garbage > Utc::now() - Duration::seconds(60));
}

#[test]
fn digest_rendering_numbers_items_and_handles_empty_input() {
    assert_eq!(format_news_digest(&[], 5), "No news found.");
    assert_eq!(format_news_context(&[]), "");

    let items = vec![
        NewsItem {
            title: "Big launch".to_string(),
            summary: Some("A rocket went up.".to_string()),
            source: "Space Weekly".to_string(),
            link: Some("https://example.com/launch".to_string()),
            published: Utc::now(),
        },
        item("Quiet day", DateTime::<Utc>::MIN_UTC),
    ];

    let digest = format_news_digest(&items, 5);
    assert!(digest.contains("1. Big launch"));
    assert!(digest.contains("Source: Space Weekly"));
    assert!(digest.contains("https://example.com/launch"));
    assert!(digest.contains("2. Quiet day"));
    // Unknown dates render without a date suffix.
    assert!(!digest.contains("0001"));

    let context = format_news_context(&items);
    assert!(context.starts_with("CURRENT NEWS ON THE TOPIC:"));
    assert!(context.contains("A rocket went up."));
}
