//! # Jaundice Rate
//!
//! Estimates how "charged" a news article is: the share of its words that
//! appear on a fixed lexicon of emotionally loaded words.
//!
//! ## Usage
//!
//! ```sh
//! jaundice_rate serve --port 8080
//! curl 'http://localhost:8080/?urls=https://inosmi.ru/20230113/energetika-259651741.html'
//!
//! jaundice_rate check https://inosmi.ru/20230113/energetika-259651741.html
//! ```
//!
//! ## Architecture
//!
//! Each URL goes through its own pipeline (see `jaundice_rate::pipeline`):
//! 1. **Fetching**: download the page under the fetch deadline
//! 2. **Extracting**: pull the article text out with the host's extractor
//! 3. **Normalizing**: split into normalized words on a blocking worker, under the analysis deadline
//! 4. **Scoring**: percentage of words found in the charged-word lexicon
//!
//! A batch (see `jaundice_rate::batch`) runs up to ten pipelines concurrently; one URL
//! failing or stalling never affects the others.

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use jaundice_rate::cli::{Cli, Command};
use jaundice_rate::config::Settings;
use jaundice_rate::extractors::ExtractorRegistry;
use jaundice_rate::pipeline::Analyzer;
use jaundice_rate::text_tools::{ChargedWords, Normalizer};
use jaundice_rate::{batch, server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let cli = Cli::parse();
    debug!(?cli, "Parsed CLI arguments");

    let settings = Settings::resolve(&cli).await?;
    let analyzer = Arc::new(build_analyzer(&settings).await?);
    info!(?analyzer, "Analyzer ready");

    match cli.command {
        Command::Serve { .. } => server::serve(analyzer, &settings.bind_addr()).await?,
        Command::Check { urls } => {
            let results = batch::process_batch(&analyzer, urls).await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }

    Ok(())
}

/// Build the read-only resources shared by every pipeline run.
#[instrument(level = "info", skip_all)]
async fn build_analyzer(settings: &Settings) -> Result<Analyzer, Box<dyn Error>> {
    let timeouts = settings.timeouts()?;
    let normalizer: Arc<dyn Normalizer> = Arc::from(settings.normalizer.build());
    let charged_words = ChargedWords::load(&settings.charged_words_path)
        .await
        .map_err(|e| format!("cannot read {}: {e}", settings.charged_words_path.display()))?
        .normalized(normalizer.as_ref());
    if charged_words.is_empty() {
        warn!(path = %settings.charged_words_path.display(), "Charged word list is empty; every article will score 0");
    }
    let extractors = ExtractorRegistry::with_defaults()?;

    info!(
        charged_words = charged_words.len(),
        normalizer = ?settings.normalizer,
        fetch_timeout = ?timeouts.fetch,
        analysis_timeout = ?timeouts.analysis,
        "Loaded analysis resources"
    );
    Ok(Analyzer::new(charged_words, extractors, normalizer).with_timeouts(timeouts))
}
