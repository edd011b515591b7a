//! Data models for article analysis results.
//!
//! - [`ProcessingStatus`]: terminal classification of one article's pipeline run
//! - [`ArticleResult`]: everything the pipeline learned about one URL
//! - [`ArticleReport`]: the trimmed shape served by the HTTP endpoint

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of processing a single article.
///
/// Serialized as the upper-case variant name (`"FETCHING_ERROR"` etc.), which is
/// also what the HTTP endpoint reports in its `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessingStatus {
    Ok,
    FetchingError,
    TimeoutError,
    ParsingError,
}

impl ProcessingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingStatus::Ok => "OK",
            ProcessingStatus::FetchingError => "FETCHING_ERROR",
            ProcessingStatus::TimeoutError => "TIMEOUT_ERROR",
            ProcessingStatus::ParsingError => "PARSING_ERROR",
        }
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of running the analysis pipeline on one URL.
///
/// Fields are private so the only way to build one is through the
/// constructors below, which keep the optional fields consistent with
/// `status`:
///
/// | status | `words_count` / `score` | `analysis_time` |
/// |--------|-------------------------|-----------------|
/// | `OK` | present | present |
/// | `TIMEOUT_ERROR` during analysis | absent | present |
/// | anything else | absent | absent |
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArticleResult {
    url: String,
    status: ProcessingStatus,
    words_count: Option<usize>,
    score: Option<f64>,
    analysis_time: Option<f64>,
}

impl ArticleResult {
    /// A successfully scored article.
    pub fn ok(url: impl Into<String>, words_count: usize, score: f64, analysis_time: f64) -> Self {
        Self {
            url: url.into(),
            status: ProcessingStatus::Ok,
            words_count: Some(words_count),
            score: Some(score),
            analysis_time: Some(analysis_time),
        }
    }

    /// The article could not be fetched, extracted, or fetched in time.
    ///
    /// Use [`ArticleResult::analysis_timeout`] for timeouts hit while
    /// normalizing, so that the elapsed time is kept.
    pub fn failed(url: impl Into<String>, status: ProcessingStatus) -> Self {
        Self {
            url: url.into(),
            status,
            words_count: None,
            score: None,
            analysis_time: None,
        }
    }

    /// Normalization did not finish before its deadline.
    pub fn analysis_timeout(url: impl Into<String>, analysis_time: f64) -> Self {
        Self {
            url: url.into(),
            status: ProcessingStatus::TimeoutError,
            words_count: None,
            score: None,
            analysis_time: Some(analysis_time),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> ProcessingStatus {
        self.status
    }

    pub fn words_count(&self) -> Option<usize> {
        self.words_count
    }

    pub fn score(&self) -> Option<f64> {
        self.score
    }

    /// Seconds spent in the normalization stage.
    pub fn analysis_time(&self) -> Option<f64> {
        self.analysis_time
    }
}

/// One entry of the batch endpoint's JSON array.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArticleReport {
    pub url: String,
    pub status: ProcessingStatus,
    pub score: Option<f64>,
    pub words_count: Option<usize>,
}

impl From<ArticleResult> for ArticleReport {
    fn from(result: ArticleResult) -> Self {
        Self {
            url: result.url,
            status: result.status,
            score: result.score,
            words_count: result.words_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_as_name() {
        let json = serde_json::to_string(&ProcessingStatus::FetchingError).unwrap();
        assert_eq!(json, "\"FETCHING_ERROR\"");
        assert_eq!(ProcessingStatus::Ok.to_string(), "OK");
        assert_eq!(ProcessingStatus::TimeoutError.to_string(), "TIMEOUT_ERROR");
    }

    #[test]
    fn test_failed_result_has_no_metrics() {
        let result = ArticleResult::failed("https://inosmi.ru/x", ProcessingStatus::ParsingError);
        assert_eq!(result.status(), ProcessingStatus::ParsingError);
        assert_eq!(result.words_count(), None);
        assert_eq!(result.score(), None);
        assert_eq!(result.analysis_time(), None);
    }

    #[test]
    fn test_analysis_timeout_keeps_elapsed_time() {
        let result = ArticleResult::analysis_timeout("https://inosmi.ru/x", 0.301);
        assert_eq!(result.status(), ProcessingStatus::TimeoutError);
        assert_eq!(result.score(), None);
        assert_eq!(result.analysis_time(), Some(0.301));
    }

    #[test]
    fn test_report_shape() {
        let report = ArticleReport::from(ArticleResult::ok("https://inosmi.ru/a", 40, 5.0, 0.12));
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "url": "https://inosmi.ru/a",
                "status": "OK",
                "score": 5.0,
                "words_count": 40,
            })
        );

        let failed = ArticleReport::from(ArticleResult::failed("u", ProcessingStatus::FetchingError));
        let value = serde_json::to_value(&failed).unwrap();
        assert!(value["score"].is_null());
        assert!(value["words_count"].is_null());
    }
}
