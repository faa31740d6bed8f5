use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single normalized news article, used either as generation context or as
/// a standalone digest entry. Transient per request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub summary: Option<String>,
    pub source: String,
    pub link: Option<String>,
    /// Publish time; `DateTime::<Utc>::MIN_UTC` marks an unknown date.
    pub published: DateTime<Utc>,
}

impl NewsItem {
    pub fn has_known_date(&self) -> bool {
        self.published != DateTime::<Utc>::MIN_UTC
    }

    /// Dedup key: trimmed, lower-cased title.
    pub fn normalized_title(&self) -> String {
        self.title.trim().to_lowercase()
    }
}

/// A raw entry as returned by a feed source, before normalization.
#[derive(Debug, Clone, Default)]
pub struct RawFeedEntry {
    pub title: String,
    pub summary: Option<String>,
    pub link: Option<String>,
    pub published_raw: Option<String>,
    pub source: Option<String>,
}

/// Durable textual summary of a channel's writing style. Upsert-only,
/// last-writer-wins; an absent row means the channel was never analyzed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleProfile {
    pub channel_id: i64,
    pub profile_text: String,
    pub post_count: u32,
    pub last_updated: DateTime<Utc>,
}

/// A historical channel post fed into style analysis.
#[derive(Debug, Clone)]
pub struct ChannelPost {
    pub content: String,
}

impl ChannelPost {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// The enumerated purpose of a generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestKind {
    Topic,
    Free,
    Random,
    NewsBased,
    NewsSummary,
}

/// One inbound generation request, as handed over by the transport layer.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub channel_id: i64,
    pub kind: RequestKind,
    pub topic: Option<String>,
    pub variant_count: u32,
}

impl GenerationRequest {
    pub fn new(channel_id: i64, kind: RequestKind) -> Self {
        Self {
            channel_id,
            kind,
            topic: None,
            variant_count: 1,
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_variants(mut self, count: u32) -> Self {
        self.variant_count = count.max(1);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The target channel has no stored style profile.
    NoStyleProfile,
    /// The model call failed or returned nothing; retryable by the caller.
    GenerationError,
}

/// Outcome of a routed generation request. Never partially populated.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationResult {
    Success {
        text: String,
        topic: String,
    },
    Failure {
        reason: FailureReason,
        message: String,
    },
}

impl GenerationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationResult::Success { .. })
    }
}

/// News aggregation settings.
#[derive(Debug, Clone)]
pub struct NewsConfig {
    pub feed_sources: Vec<String>,
    pub max_articles: usize,
    pub timeout_seconds: u64,
    pub enabled: bool,
    pub search_language: String,
    pub search_country: String,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            feed_sources: vec![
                "https://feeds.bbci.co.uk/news/rss.xml".to_string(),
                "https://rss.cnn.com/rss/edition.rss".to_string(),
                "https://www.reuters.com/rssFeed/worldNews".to_string(),
                "https://techcrunch.com/feed/".to_string(),
                "https://habr.com/ru/rss/hub/artificial_intelligence/".to_string(),
                "https://lenta.ru/rss".to_string(),
            ],
            max_articles: 10,
            timeout_seconds: 30,
            enabled: true,
            search_language: "en-US".to_string(),
            search_country: "US".to_string(),
        }
    }
}

/// Style analysis settings.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Minimum number of posts required before a profile may be refreshed.
    pub min_posts: usize,
    /// Cap on how many posts one refresh may consume.
    pub max_posts: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_posts: 5,
            max_posts: 50,
        }
    }
}

/// Settings for the Generative Language API client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "gemini-2.5-flash".to_string(),
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StylecastError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed parse error: {0}")]
    Parse(String),

    #[error("fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("model error: {0}")]
    Model(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StylecastError>;
