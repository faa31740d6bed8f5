use crate::aggregator::NewsAggregator;
use crate::digest::{format_articles_for_prompt, format_news_context};
use crate::traits::TextModel;
use crate::types::RequestKind;
use std::sync::Arc;
use tracing::{info, warn};

/// How many articles feed the prompt-injection news context.
const NEWS_CONTEXT_ARTICLES: usize = 5;

/// Central orchestrator: composes prompts from a style profile, an optional
/// topic, and an optional news context, and issues model calls. Exactly one
/// model invocation per generate/improve call, no internal retries.
pub struct ContentGenerator {
    model: Arc<dyn TextModel>,
    aggregator: NewsAggregator,
}

impl ContentGenerator {
    pub fn new(model: Arc<dyn TextModel>, aggregator: NewsAggregator) -> Self {
        Self { model, aggregator }
    }

    /// Style-constrained generation. For `NewsBased` requests the news
    /// context is fully resolved before the prompt is composed; an empty
    /// aggregation just omits the context block and generation proceeds.
    pub async fn generate(
        &self,
        profile_text: &str,
        kind: RequestKind,
        topic: Option<&str>,
    ) -> Option<String> {
        let news_context = match (kind, topic) {
            (RequestKind::NewsBased, Some(topic)) => {
                let items = self
                    .aggregator
                    .search_by_topic(topic, NEWS_CONTEXT_ARTICLES)
                    .await;
                format_news_context(&items)
            }
            _ => String::new(),
        };

        let task = task_clause(kind, topic);
        let prompt = build_generation_prompt(profile_text, &task, &news_context);
        self.complete(&prompt).await
    }

    /// Thematic digest independent of any style profile. Zero aggregated
    /// items short-circuits to a fixed message without a model call.
    pub async fn summarize_news(&self, topic: &str, max_articles: usize) -> Option<String> {
        let items = self.aggregator.search_by_topic(topic, max_articles).await;
        if items.is_empty() {
            info!("no news found for topic '{}'", topic);
            return Some(format!("No news found for topic '{}'.", topic));
        }

        let prompt = build_summary_prompt(topic, &format_articles_for_prompt(&items));
        self.complete(&prompt).await
    }

    /// Feedback-driven rewrite that preserves the profiled style.
    pub async fn improve(
        &self,
        original: &str,
        profile_text: &str,
        feedback: &str,
    ) -> Option<String> {
        let prompt = build_improve_prompt(original, profile_text, feedback);
        self.complete(&prompt).await
    }

    /// `count` independent sequential model calls. A failed variant never
    /// aborts its siblings, so the result may be shorter than requested;
    /// an empty list is a valid outcome. Diversity between variants is
    /// best-effort prompt text only.
    pub async fn generate_variants(
        &self,
        profile_text: &str,
        topic: &str,
        count: u32,
        include_news: bool,
    ) -> Vec<String> {
        let news_context = if include_news {
            let items = self
                .aggregator
                .search_by_topic(topic, NEWS_CONTEXT_ARTICLES)
                .await;
            format_news_context(&items)
        } else {
            String::new()
        };

        let mut variants = Vec::new();
        for i in 0..count {
            let prompt = build_variant_prompt(profile_text, topic, &news_context, i + 1);
            match self.model.complete(&prompt).await {
                Ok(text) => variants.push(text),
                Err(e) => warn!("variant {} failed: {}", i + 1, e),
            }
        }

        info!(
            "generated {}/{} variants for topic '{}'",
            variants.len(),
            count,
            topic
        );
        variants
    }

    async fn complete(&self, prompt: &str) -> Option<String> {
        match self.model.complete(prompt).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("generation failed: {}", e);
                None
            }
        }
    }
}

fn task_clause(kind: RequestKind, topic: Option<&str>) -> String {
    match (kind, topic) {
        (RequestKind::Random, _) => "Invent an interesting, topical subject yourself.".to_string(),
        (RequestKind::Topic, Some(topic)) => format!("Post topic: {}", topic),
        (RequestKind::Free, Some(topic)) => {
            format!("Write a post on the following request: {}", topic)
        }
        (RequestKind::NewsBased, Some(topic)) => {
            format!("Write a post based on current news about: {}", topic)
        }
        _ => "Write an interesting post on a current subject.".to_string(),
    }
}

fn build_generation_prompt(profile: &str, task: &str, news_context: &str) -> String {
    format!(
        "Using the channel style analysis below, write a new post.\n\
         \n\
         CHANNEL STYLE ANALYSIS:\n\
         {profile}\n\
         \n\
         TASK:\n\
         {task}\n\
         \n\
         {news_context}\
         REQUIREMENTS:\n\
         1. Follow the profiled writing style exactly\n\
         2. Use the same tone and manner of communication\n\
         3. Match the structure and length of the sample posts\n\
         4. Use emoji in the same style and density\n\
         5. Apply the same text formatting\n\
         6. Keep the register and vocabulary of the profile\n\
         7. Include calls to action if the style has them\n\
         8. If news is provided, use it as the basis for the content, adapted to the channel style\n\
         \n\
         Write ONE post, ready for publication."
    )
}

fn build_summary_prompt(topic: &str, articles: &str) -> String {
    format!(
        "Write a concise, informative news summary on the topic \"{topic}\":\n\
         \n\
         {articles}\
         Requirements:\n\
         1. Highlight the main trends and events\n\
         2. Structure the information logically\n\
         3. Use emoji to aid readability\n\
         4. Keep the text engaging and easy to read\n\
         5. Mention the key facts and figures\n\
         6. Length: 200-300 words\n\
         \n\
         Produce the summary formatted for a channel post."
    )
}

fn build_variant_prompt(profile: &str, topic: &str, news_context: &str, number: u32) -> String {
    format!(
        "Using the channel style analysis below, write variant #{number} of a post.\n\
         \n\
         STYLE ANALYSIS:\n\
         {profile}\n\
         \n\
         TOPIC: {topic}\n\
         \n\
         {news_context}\
         Write a distinct post that differs from the previous variants while keeping the same style.\n\
         If news is provided, cover a different aspect or angle of the topic."
    )
}

fn build_improve_prompt(original: &str, profile: &str, feedback: &str) -> String {
    format!(
        "Improve this post based on the feedback below.\n\
         \n\
         ORIGINAL POST:\n\
         {original}\n\
         \n\
         CHANNEL STYLE:\n\
         {profile}\n\
         \n\
         FEEDBACK:\n\
         {feedback}\n\
         \n\
         Rewrite the post to address the feedback while preserving the channel style."
    )
}
