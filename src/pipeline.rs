//! The per-article analysis pipeline.
//!
//! ```text
//! FETCHING ──▶ EXTRACTING ──▶ NORMALIZING ──▶ SCORING ──▶ DONE
//!    │             │               │
//!    ▼             ▼               ▼
//!  FETCHING_ERROR  PARSING_ERROR   TIMEOUT_ERROR (+ analysis time)
//!  TIMEOUT_ERROR
//! ```
//!
//! [`Analyzer::analyze`] never fails: every exit produces an
//! [`ArticleResult`]. That is what lets [`crate::batch`] fan out without any
//! recovery logic of its own.
//!
//! # Workers
//!
//! Extraction and normalization are CPU-bound and run on tokio's blocking
//! pool. Normalization is awaited under its own deadline; when it expires the
//! pipeline stops waiting and cancels the worker's [`CancellationToken`]. The
//! worker is not killed, it notices the cancellation at the next word boundary
//! and exits, so the thread is reclaimed shortly after without anyone awaiting it.

use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::task::{self, JoinError};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::config::Timeouts;
use crate::extractors::{ExtractError, ExtractorRegistry};
use crate::fetcher::fetch;
use crate::models::{ArticleResult, ProcessingStatus};
use crate::text_tools::{ChargedWords, Normalizer, calculate_jaundice_rate, split_by_words};
use crate::utils::secs_rounded;

#[derive(Debug, Error)]
enum NormalizeError {
    #[error("analysis deadline exceeded")]
    Timeout,
    #[error("normalizer worker failed: {0}")]
    WorkerFailed(#[from] JoinError),
}

/// Everything one pipeline run needs, shared read-only across runs.
#[derive(Clone)]
pub struct Analyzer {
    charged_words: Arc<ChargedWords>,
    extractors: Arc<ExtractorRegistry>,
    normalizer: Arc<dyn Normalizer>,
    timeouts: Timeouts,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("charged_words", &self.charged_words.len())
            .field("extractors", &self.extractors)
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

impl Analyzer {
    pub fn new(
        charged_words: ChargedWords,
        extractors: ExtractorRegistry,
        normalizer: Arc<dyn Normalizer>,
    ) -> Self {
        Self {
            charged_words: Arc::new(charged_words),
            extractors: Arc::new(extractors),
            normalizer,
            timeouts: Timeouts::default(),
        }
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Run the whole pipeline for one URL.
    #[instrument(level = "info", skip_all, fields(%url))]
    pub async fn analyze(&self, url: &str) -> ArticleResult {
        let html = match fetch(url, self.timeouts.fetch).await {
            Ok(html) => html,
            Err(e) => {
                warn!(error = %e, "Fetch failed");
                return ArticleResult::failed(url, e.status());
            }
        };

        let plaintext = match self.extract(url, html).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Extraction failed");
                return ArticleResult::failed(url, ProcessingStatus::ParsingError);
            }
        };

        let started = Instant::now();
        let words = match self.split_words(plaintext).await {
            Ok(words) => words,
            Err(NormalizeError::Timeout) => {
                let analysis_time = secs_rounded(started.elapsed());
                warn!(analysis_time, "Analysis timed out");
                return ArticleResult::analysis_timeout(url, analysis_time);
            }
            Err(e) => {
                warn!(error = %e, "Analysis failed");
                return ArticleResult::failed(url, ProcessingStatus::ParsingError);
            }
        };
        let analysis_time = secs_rounded(started.elapsed());

        let score = calculate_jaundice_rate(&words, &self.charged_words);
        info!(words_count = words.len(), score, analysis_time, "Article scored");
        ArticleResult::ok(url, words.len(), score, analysis_time)
    }

    async fn extract(&self, url: &str, html: String) -> Result<String, ExtractError> {
        let extractors = Arc::clone(&self.extractors);
        let url = url.to_string();
        match task::spawn_blocking(move || extractors.extract(&url, &html)).await {
            Ok(result) => result,
            Err(join_err) => {
                warn!(error = %join_err, "Extractor worker failed");
                Err(ExtractError::ArticleNotFound)
            }
        }
    }

    async fn split_words(&self, plaintext: String) -> Result<Vec<String>, NormalizeError> {
        let cancel = CancellationToken::new();
        // cancels the worker on every early exit, including this future being dropped
        let _guard = cancel.clone().drop_guard();
        let normalizer = Arc::clone(&self.normalizer);
        let worker = task::spawn_blocking(move || {
            split_by_words(normalizer.as_ref(), &plaintext, &cancel)
        });

        match tokio::time::timeout(self.timeouts.analysis, worker).await {
            Ok(joined) => joined?.ok_or(NormalizeError::Timeout),
            Err(_) => Err(NormalizeError::Timeout),
        }
    }
}
