use crate::generator::ContentGenerator;
use crate::traits::StyleStore;
use crate::types::{FailureReason, GenerationRequest, GenerationResult, RequestKind};
use std::sync::Arc;
use tracing::{info, warn};

const RANDOM_TOPIC_LABEL: &str = "random topic";
const VARIANT_SEPARATOR: &str = "\n\n---\n\n";
const SUMMARY_ARTICLES: usize = 5;

/// Maps an inbound request to a generator invocation. Holds the single hard
/// precondition gate: a style profile must already exist for the target
/// channel (skipped for news summaries, which target no channel).
pub struct GenerationRouter {
    store: Arc<dyn StyleStore>,
    generator: ContentGenerator,
}

impl GenerationRouter {
    pub fn new(store: Arc<dyn StyleStore>, generator: ContentGenerator) -> Self {
        Self { store, generator }
    }

    /// Per-request flow: Received -> ProfileChecked -> [NewsFetched] ->
    /// Generated -> Completed, with early Failed exits on a missing profile
    /// or an absent model result. Never panics or raises past this boundary.
    pub async fn handle(&self, request: GenerationRequest) -> GenerationResult {
        info!(
            "handling {:?} request for channel {}",
            request.kind, request.channel_id
        );

        if request.kind == RequestKind::NewsSummary {
            return self.handle_news_summary(&request).await;
        }

        let profile = match self.store.get(request.channel_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                return GenerationResult::Failure {
                    reason: FailureReason::NoStyleProfile,
                    message: "channel has not been analyzed".to_string(),
                };
            }
            Err(e) => {
                warn!(
                    "style store lookup failed for channel {}: {}",
                    request.channel_id, e
                );
                return GenerationResult::Failure {
                    reason: FailureReason::GenerationError,
                    message: format!("style lookup failed: {}", e),
                };
            }
        };

        let topic = request
            .topic
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());
        if needs_topic(request.kind) && topic.is_none() {
            return GenerationResult::Failure {
                reason: FailureReason::GenerationError,
                message: "no topic provided".to_string(),
            };
        }

        let echoed_topic = topic.unwrap_or(RANDOM_TOPIC_LABEL).to_string();

        if request.variant_count > 1 {
            let include_news = request.kind == RequestKind::NewsBased;
            let variants = self
                .generator
                .generate_variants(
                    &profile.profile_text,
                    topic.unwrap_or_default(),
                    request.variant_count,
                    include_news,
                )
                .await;
            if variants.is_empty() {
                return GenerationResult::Failure {
                    reason: FailureReason::GenerationError,
                    message: "post generation failed".to_string(),
                };
            }
            return GenerationResult::Success {
                text: variants.join(VARIANT_SEPARATOR),
                topic: echoed_topic,
            };
        }

        match self
            .generator
            .generate(&profile.profile_text, request.kind, topic)
            .await
        {
            Some(text) => GenerationResult::Success {
                text,
                topic: echoed_topic,
            },
            None => GenerationResult::Failure {
                reason: FailureReason::GenerationError,
                message: "post generation failed".to_string(),
            },
        }
    }

    async fn handle_news_summary(&self, request: &GenerationRequest) -> GenerationResult {
        let Some(topic) = request
            .topic
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
        else {
            return GenerationResult::Failure {
                reason: FailureReason::GenerationError,
                message: "no topic provided".to_string(),
            };
        };

        match self.generator.summarize_news(topic, SUMMARY_ARTICLES).await {
            Some(text) => GenerationResult::Success {
                text,
                topic: topic.to_string(),
            },
            None => GenerationResult::Failure {
                reason: FailureReason::GenerationError,
                message: "news summary failed".to_string(),
            },
        }
    }
}

fn needs_topic(kind: RequestKind) -> bool {
    matches!(
        kind,
        RequestKind::Topic | RequestKind::Free | RequestKind::NewsBased | RequestKind::NewsSummary
    )
}
