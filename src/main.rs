use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use stylecast::traits::TextModel;
use stylecast::{
    digest, AnalysisConfig, ChannelPost, ContentGenerator, GeminiConfig, GeminiModel,
    GenerationRequest, GenerationResult, GenerationRouter, HttpFeedSource, MemoryStyleStore,
    NewsAggregator, NewsConfig, RequestKind, StyleProfiler,
};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "stylecast",
    about = "Channel style profiling and news-enriched post generation"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze sample posts and print the derived style profile
    Analyze {
        /// File with sample posts separated by blank lines
        posts_file: String,
        /// Channel identifier to store the profile under
        #[arg(long, default_value_t = 1)]
        channel_id: i64,
    },
    /// Analyze sample posts, then generate a post in the derived style
    Generate {
        /// File with sample posts separated by blank lines
        posts_file: String,
        #[arg(long, default_value_t = 1)]
        channel_id: i64,
        /// Topic to write about; omit for a random subject
        #[arg(long)]
        topic: Option<String>,
        /// Enrich the post with current news on the topic
        #[arg(long)]
        with_news: bool,
        /// Number of variants to produce
        #[arg(long, default_value_t = 1)]
        variants: u32,
    },
    /// Print a news digest for a topic
    News {
        topic: String,
        #[arg(long, default_value_t = 5)]
        max: usize,
        /// Ask the model for a thematic summary instead of a raw digest
        #[arg(long)]
        summarize: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze {
            posts_file,
            channel_id,
        } => {
            let posts = load_posts(&posts_file)?;
            info!("analyzing {} posts from {}", posts.len(), posts_file);

            let store = Arc::new(MemoryStyleStore::new());
            let profiler =
                StyleProfiler::new(gemini_model()?, store, AnalysisConfig::default());
            match profiler.refresh_profile(channel_id, &posts).await {
                Some(profile) => println!("{}", profile),
                None => anyhow::bail!("style analysis failed"),
            }
        }
        Command::Generate {
            posts_file,
            channel_id,
            topic,
            with_news,
            variants,
        } => {
            let posts = load_posts(&posts_file)?;
            let model = gemini_model()?;
            let store = Arc::new(MemoryStyleStore::new());

            let profiler = StyleProfiler::new(
                model.clone(),
                store.clone(),
                AnalysisConfig::default(),
            );
            if profiler.refresh_profile(channel_id, &posts).await.is_none() {
                anyhow::bail!("style analysis failed");
            }

            let aggregator =
                NewsAggregator::new(Arc::new(HttpFeedSource::new()), NewsConfig::default());
            let generator = ContentGenerator::new(model, aggregator);
            let router = GenerationRouter::new(store, generator);

            let kind = if with_news {
                RequestKind::NewsBased
            } else if topic.is_some() {
                RequestKind::Topic
            } else {
                RequestKind::Random
            };
            let mut request = GenerationRequest::new(channel_id, kind).with_variants(variants);
            if let Some(topic) = topic {
                request = request.with_topic(topic);
            }

            match router.handle(request).await {
                GenerationResult::Success { text, topic } => {
                    info!("generated post on topic: {}", topic);
                    println!("{}", text);
                }
                GenerationResult::Failure { message, .. } => anyhow::bail!(message),
            }
        }
        Command::News {
            topic,
            max,
            summarize,
        } => {
            let aggregator =
                NewsAggregator::new(Arc::new(HttpFeedSource::new()), NewsConfig::default());
            if summarize {
                let generator = ContentGenerator::new(gemini_model()?, aggregator);
                match generator.summarize_news(&topic, max).await {
                    Some(summary) => println!("{}", summary),
                    None => anyhow::bail!("news summary failed"),
                }
            } else {
                let items = aggregator.search_by_topic(&topic, max).await;
                println!("{}", digest::format_news_digest(&items, max));
            }
        }
    }

    Ok(())
}

fn gemini_model() -> anyhow::Result<Arc<dyn TextModel>> {
    let api_key = std::env::var("GEMINI_API_KEY").context("GEMINI_API_KEY not set")?;
    Ok(Arc::new(GeminiModel::new(GeminiConfig::new(api_key))))
}

fn load_posts(path: &str) -> anyhow::Result<Vec<ChannelPost>> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path))?;
    let posts: Vec<ChannelPost> = raw
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(ChannelPost::new)
        .collect();
    anyhow::ensure!(!posts.is_empty(), "no posts found in {}", path);
    Ok(posts)
}
