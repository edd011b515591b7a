//! Runtime settings.
//!
//! Values come from, in increasing priority: built-in defaults, an optional
//! YAML file, then command-line flags and environment variables (see
//! [`crate::cli`]).
//!
//! ```yaml
//! host: 0.0.0.0
//! port: 8080
//! charged_words_path: data/negative_words.txt
//! fetch_timeout_secs: 3
//! analysis_timeout_secs: 3
//! normalizer: snowball
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, instrument};

use crate::cli::Cli;
use crate::text_tools::NormalizerKind;

pub const DEFAULT_TIMEOUT_SECS: f64 = 3.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("{name} must be a positive number of seconds, got {value}")]
    InvalidTimeout { name: &'static str, value: f64 },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub charged_words_path: PathBuf,
    pub fetch_timeout_secs: f64,
    pub analysis_timeout_secs: f64,
    pub normalizer: NormalizerKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            charged_words_path: PathBuf::from("data/negative_words.txt"),
            fetch_timeout_secs: DEFAULT_TIMEOUT_SECS,
            analysis_timeout_secs: DEFAULT_TIMEOUT_SECS,
            normalizer: NormalizerKind::default(),
        }
    }
}

/// The two independent per-article deadlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Downloading the page.
    pub fetch: Duration,
    /// Splitting the article into normalized words.
    pub analysis: Duration,
}

impl Timeouts {
    /// Same deadline for both stages.
    pub fn uniform(timeout: Duration) -> Self {
        Self {
            fetch: timeout,
            analysis: timeout,
        }
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self::uniform(Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS))
    }
}

fn positive_secs(name: &'static str, value: f64) -> Result<Duration, ConfigError> {
    if !(value > 0.0) {
        return Err(ConfigError::InvalidTimeout { name, value });
    }
    Duration::try_from_secs_f64(value).map_err(|_| ConfigError::InvalidTimeout { name, value })
}

impl Settings {
    /// Parse a YAML settings file; missing keys keep their defaults.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let settings = Self::from_yaml(&raw).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded settings file");
        Ok(settings)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(raw)
    }

    /// Resolve settings for this invocation: defaults, then `--config`, then flags.
    pub async fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let base = match &cli.config {
            Some(path) => Self::from_file(path).await?,
            None => Self::default(),
        };
        Ok(base.merge_cli(cli))
    }

    /// Apply the values given on the command line over `self`.
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if let Some(path) = &cli.charged_words {
            self.charged_words_path = path.clone();
        }
        if let Some(secs) = cli.fetch_timeout {
            self.fetch_timeout_secs = secs;
        }
        if let Some(secs) = cli.analysis_timeout {
            self.analysis_timeout_secs = secs;
        }
        if let Some(kind) = cli.normalizer {
            self.normalizer = kind;
        }
        if let Some(host) = cli.host() {
            self.host = host.to_string();
        }
        if let Some(port) = cli.port() {
            self.port = port;
        }
        self
    }

    pub fn timeouts(&self) -> Result<Timeouts, ConfigError> {
        Ok(Timeouts {
            fetch: positive_secs("fetch_timeout_secs", self.fetch_timeout_secs)?,
            analysis: positive_secs("analysis_timeout_secs", self.analysis_timeout_secs)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
