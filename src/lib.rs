//! Channel style profiling and news-enriched post generation.
//!
//! The pipeline: a [`StyleProfiler`] turns historical channel posts into a
//! durable style profile, a [`NewsAggregator`] fans out to syndicated feeds,
//! and a [`ContentGenerator`] composes prompts from profile + topic + news
//! context. The [`GenerationRouter`] fronts it all behind one
//! request/response call. Chat transport, persistence engines, and the model
//! backend stay behind the traits in [`traits`].

pub mod aggregator;
pub mod digest;
pub mod fetcher;
pub mod generator;
pub mod model;
pub mod parser;
pub mod profiler;
pub mod router;
pub mod store;
pub mod traits;
pub mod types;

pub use aggregator::{dedup_by_title, NewsAggregator};
pub use fetcher::HttpFeedSource;
pub use generator::ContentGenerator;
pub use model::{GeminiModel, MockTextModel};
pub use profiler::StyleProfiler;
pub use router::GenerationRouter;
pub use store::MemoryStyleStore;
pub use types::*;
