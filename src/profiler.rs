use crate::traits::{StyleStore, TextModel};
use crate::types::{AnalysisConfig, ChannelPost};
use std::sync::Arc;
use tracing::{info, warn};

/// At most this many posts are concatenated into one analysis prompt.
const MAX_POSTS_IN_PROMPT: usize = 30;
const POST_DELIMITER: &str = "\n\n---\n\n";

/// Derives a reusable textual style description from a batch of posts with
/// one summarizing model call.
pub struct StyleProfiler {
    model: Arc<dyn TextModel>,
    store: Arc<dyn StyleStore>,
    config: AnalysisConfig,
}

impl StyleProfiler {
    pub fn new(
        model: Arc<dyn TextModel>,
        store: Arc<dyn StyleStore>,
        config: AnalysisConfig,
    ) -> Self {
        Self {
            model,
            store,
            config,
        }
    }

    /// One model call over up to the first 30 posts; the raw response text is
    /// returned verbatim. Model errors become `None`; retry policy belongs to
    /// the caller. No minimum post count is enforced here.
    pub async fn analyze_style(&self, posts: &[ChannelPost]) -> Option<String> {
        if posts.is_empty() {
            return None;
        }

        let sample: Vec<&str> = posts
            .iter()
            .take(MAX_POSTS_IN_PROMPT)
            .map(|p| p.content.as_str())
            .collect();
        let prompt = build_analysis_prompt(&sample.join(POST_DELIMITER));

        match self.model.complete(&prompt).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("style analysis failed: {}", e);
                None
            }
        }
    }

    /// Analyze and upsert the channel's profile, enforcing the configured
    /// post minimum. Concurrent refreshes of the same channel interleave
    /// freely; the last store write wins.
    pub async fn refresh_profile(&self, channel_id: i64, posts: &[ChannelPost]) -> Option<String> {
        if posts.len() < self.config.min_posts {
            warn!(
                "channel {}: {} posts, minimum for analysis is {}",
                channel_id,
                posts.len(),
                self.config.min_posts
            );
            return None;
        }

        let capped = &posts[..posts.len().min(self.config.max_posts)];
        let profile = self.analyze_style(capped).await?;
        let count = u32::try_from(capped.len()).unwrap_or(u32::MAX);

        if let Err(e) = self.store.put(channel_id, &profile, count).await {
            warn!("failed to store profile for channel {}: {}", channel_id, e);
            return None;
        }

        info!(
            "stored style profile for channel {} ({} posts analyzed)",
            channel_id, count
        );
        Some(profile)
    }
}

fn build_analysis_prompt(posts_text: &str) -> String {
    format!(
        "Analyze the writing style of the posts in this channel. Post samples:\n\
         \n\
         {posts_text}\n\
         \n\
         Describe in a structured way:\n\
         1. Tone and manner of communication (formal/informal, friendly/serious)\n\
         2. Post structure (how the text is organized, lists, headings)\n\
         3. Post length (short/medium/long)\n\
         4. Emoji usage and their style\n\
         5. Topical focus of the content\n\
         6. Register and vocabulary (slang, professional terms, plain language)\n\
         7. Calls to action and audience engagement\n\
         8. Text formatting (bold, italic, underline)\n\
         \n\
         The result must be a structured style description that can be reused to generate similar posts."
    )
}
