//! HTTP batch endpoint.
//!
//! `GET /?urls=<url>,<url>,...` answers with one JSON object per URL:
//!
//! ```json
//! [{"url": "https://inosmi.ru/...", "status": "OK", "score": 5.0, "words_count": 40}]
//! ```
//!
//! A request without any URL gets `{"error": "no params passed"}` with status
//! 200; more than ten URLs get an error body with status 400.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use crate::batch::{BatchError, MAX_BATCH_URLS, parse_urls, process_batch};
use crate::models::ArticleReport;
use crate::pipeline::Analyzer;

#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    urls: Option<String>,
}

pub fn router(analyzer: Arc<Analyzer>) -> Router {
    Router::new()
        .route("/", get(analyze_page))
        .layer(TraceLayer::new_for_http())
        .with_state(analyzer)
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

#[instrument(level = "info", skip_all)]
async fn analyze_page(
    State(analyzer): State<Arc<Analyzer>>,
    Query(params): Query<AnalyzeParams>,
) -> Response {
    let urls = params.urls.as_deref().map(parse_urls).unwrap_or_default();

    match process_batch(&analyzer, urls).await {
        Ok(results) => {
            let reports: Vec<ArticleReport> = results.into_iter().map(ArticleReport::from).collect();
            Json(reports).into_response()
        }
        Err(BatchError::Empty) => {
            warn!("Request without urls");
            error_body(StatusCode::OK, "no params passed")
        }
        Err(BatchError::TooMany(count)) => {
            warn!(count, "Too many urls in request");
            error_body(
                StatusCode::BAD_REQUEST,
                &format!("too many urls in request, should be {MAX_BATCH_URLS} or less"),
            )
        }
    }
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(analyzer: Arc<Analyzer>, addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Listening");
    axum::serve(listener, router(analyzer))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
}
