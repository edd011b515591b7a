//! Jaundice rate: how emotionally charged is a news article?
//!
//! The library exposes the analysis pipeline directly:
//!
//! ```ignore
//! use std::path::Path;
//! use std::sync::Arc;
//! use jaundice_rate::{Analyzer, ChargedWords, ExtractorRegistry, SnowballNormalizer};
//!
//! let normalizer = Arc::new(SnowballNormalizer::russian());
//! let charged = ChargedWords::load(Path::new("data/negative_words.txt")).await?.normalized(normalizer.as_ref());
//! let analyzer = Analyzer::new(charged, ExtractorRegistry::with_defaults()?, normalizer);
//! let result = analyzer.analyze("https://inosmi.ru/20230113/energetika-259651741.html").await;
//! println!("{} {:?}", result.status(), result.score());
//! ```
//!
//! and the batch dispatcher behind the HTTP endpoint ([`batch::process_batch`], [`server::router`]).

pub mod batch;
pub mod cli;
pub mod config;
pub mod extractors;
pub mod fetcher;
pub mod models;
pub mod pipeline;
pub mod server;
pub mod text_tools;
pub mod utils;

pub use config::Timeouts;
pub use extractors::ExtractorRegistry;
pub use models::{ArticleResult, ProcessingStatus};
pub use pipeline::Analyzer;
pub use text_tools::{ChargedWords, SnowballNormalizer};
