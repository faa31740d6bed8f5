use crate::traits::StyleStore;
use crate::types::{Result, StyleProfile};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory style profile store. Upserts are last-writer-wins; concurrent
/// re-analysis of the same channel is an accepted race, the final `put`
/// determines the stored profile.
pub struct MemoryStyleStore {
    profiles: RwLock<HashMap<i64, StyleProfile>>,
}

impl MemoryStyleStore {
    pub fn new() -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }
}

impl Default for MemoryStyleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StyleStore for MemoryStyleStore {
    async fn get(&self, channel_id: i64) -> Result<Option<StyleProfile>> {
        Ok(self.profiles.read().await.get(&channel_id).cloned())
    }

    async fn put(&self, channel_id: i64, profile_text: &str, post_count: u32) -> Result<()> {
        let profile = StyleProfile {
            channel_id,
            profile_text: profile_text.to_string(),
            post_count,
            last_updated: Utc::now(),
        };
        self.profiles.write().await.insert(channel_id, profile);
        debug!("stored style profile for channel {}", channel_id);
        Ok(())
    }
}
