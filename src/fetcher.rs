//! Page download with a hard deadline.
//!
//! Every call builds its own [`reqwest::Client`], so connections never outlive
//! the call: when the deadline fires the in-flight request future is dropped
//! together with the client and its pool.

use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::ProcessingStatus;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("server answered {0}")]
    Status(reqwest::StatusCode),
    #[error("no complete response within {0:?}")]
    Timeout(Duration),
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
}

impl FetchError {
    /// How this failure is reported for the article.
    pub fn status(&self) -> ProcessingStatus {
        match self {
            FetchError::Timeout(_) => ProcessingStatus::TimeoutError,
            FetchError::Status(_) | FetchError::Transport(_) => ProcessingStatus::FetchingError,
        }
    }
}

fn map_reqwest_error(err: reqwest::Error, deadline: Duration) -> FetchError {
    if err.is_timeout() {
        return FetchError::Timeout(deadline);
    }
    FetchError::Transport(err)
}

/// Download `url` and return its body as text.
///
/// A single attempt, no retries. The deadline covers connecting, the
/// response headers and reading the whole body.
///
/// # Errors
///
/// - [`FetchError::Status`] for any non-2xx response
/// - [`FetchError::Timeout`] when `deadline` elapses first
/// - [`FetchError::Transport`] for everything else (DNS, refused connection, bad URL, ...)
#[instrument(level = "debug", skip_all, fields(%url))]
pub async fn fetch(url: &str, deadline: Duration) -> Result<String, FetchError> {
    let client = reqwest::Client::builder()
        .timeout(deadline)
        .build()
        .map_err(FetchError::Transport)?;

    let download = async {
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, deadline))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        response
            .text()
            .await
            .map_err(|e| map_reqwest_error(e, deadline))
    };

    let body = tokio::time::timeout(deadline, download)
        .await
        .map_err(|_| FetchError::Timeout(deadline))??;
    debug!(bytes = body.len(), "Fetched page");
    Ok(body)
}
