//! Batch fan-out: one pipeline per URL, all running concurrently.

use futures::stream::{self, StreamExt};
use thiserror::Error;
use tracing::{info, instrument};

use crate::models::{ArticleResult, ProcessingStatus};
use crate::pipeline::Analyzer;

/// Upper bound on URLs per batch, and therefore on concurrent pipelines.
pub const MAX_BATCH_URLS: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("no urls given")]
    Empty,
    #[error("too many urls in request ({0}), should be 10 or less")]
    TooMany(usize),
}

/// Split a comma-separated `urls` value, trimming entries and dropping empty ones.
pub fn parse_urls(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn validate(urls: &[String]) -> Result<(), BatchError> {
    match urls.len() {
        0 => Err(BatchError::Empty),
        n if n > MAX_BATCH_URLS => Err(BatchError::TooMany(n)),
        _ => Ok(()),
    }
}

/// Analyze every URL concurrently and return the results in input order.
///
/// Validation happens before any pipeline starts. Since
/// [`Analyzer::analyze`] never fails, a slow or broken URL only affects its
/// own entry.
#[instrument(level = "info", skip_all, fields(count = urls.len()))]
pub async fn process_batch(
    analyzer: &Analyzer,
    urls: Vec<String>,
) -> Result<Vec<ArticleResult>, BatchError> {
    validate(&urls)?;

    let results: Vec<ArticleResult> = stream::iter(urls)
        .map(|url| async move { analyzer.analyze(&url).await })
        .buffered(MAX_BATCH_URLS)
        .collect()
        .await;

    let ok = results
        .iter()
        .filter(|r| r.status() == ProcessingStatus::Ok)
        .count();
    info!(total = results.len(), ok, failed = results.len() - ok, "Batch complete");
    Ok(results)
}
