use crate::types::{RawFeedEntry, Result, StyleProfile};
use async_trait::async_trait;
use std::time::Duration;

/// Generative text model capability. One prompt in, best-effort natural
/// language out; no structured output is assumed.
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Identifier of the backing model, for logs.
    fn model_name(&self) -> String;

    /// Issue a single completion request.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Key-value store for style profiles, keyed by channel id. Writes are
/// last-writer-wins upserts; reads are side-effect-free.
#[async_trait]
pub trait StyleStore: Send + Sync {
    async fn get(&self, channel_id: i64) -> Result<Option<StyleProfile>>;

    async fn put(&self, channel_id: i64, profile_text: &str, post_count: u32) -> Result<()>;
}

/// Capability for pulling raw entries from one syndicated feed URL. Errors
/// are per-source and must not leak sibling state.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<RawFeedEntry>>;
}
