//! Command-line interface definitions.
//!
//! Global options tune the analysis and apply to every subcommand; they can
//! also be given through environment variables or a YAML file passed with
//! `--config` (see [`crate::config`]).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::text_tools::NormalizerKind;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Serve the batch endpoint on the default port
/// jaundice_rate serve
///
/// # Score two articles right away, with a tighter analysis deadline
/// jaundice_rate --analysis-timeout 1 check https://inosmi.ru/a.html https://inosmi.ru/b.html
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML settings file
    #[arg(short, long, env = "JAUNDICE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Line-delimited file of charged words
    #[arg(long, env = "JAUNDICE_CHARGED_WORDS")]
    pub charged_words: Option<PathBuf>,

    /// Seconds allowed for downloading one article
    #[arg(long, env = "JAUNDICE_FETCH_TIMEOUT")]
    pub fetch_timeout: Option<f64>,

    /// Seconds allowed for splitting one article into words
    #[arg(long, env = "JAUNDICE_ANALYSIS_TIMEOUT")]
    pub analysis_timeout: Option<f64>,

    /// Word normalizer
    #[arg(long, value_enum, env = "JAUNDICE_NORMALIZER")]
    pub normalizer: Option<NormalizerKind>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the batch endpoint: GET /?urls=<url>,<url>,...
    Serve {
        #[arg(long, env = "JAUNDICE_HOST")]
        host: Option<String>,
        #[arg(short, long, env = "JAUNDICE_PORT")]
        port: Option<u16>,
    },
    /// Score the given article URLs and print the results as JSON
    Check {
        #[arg(required = true)]
        urls: Vec<String>,
    },
}

impl Cli {
    pub fn host(&self) -> Option<&str> {
        match &self.command {
            Command::Serve { host, .. } => host.as_deref(),
            Command::Check { .. } => None,
        }
    }

    pub fn port(&self) -> Option<u16> {
        match &self.command {
            Command::Serve { port, .. } => *port,
            Command::Check { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_serve() {
        let cli = Cli::parse_from(["jaundice_rate", "serve", "--host", "127.0.0.1", "-p", "9090"]);
        assert_eq!(cli.host(), Some("127.0.0.1"));
        assert_eq!(cli.port(), Some(9090));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_check_with_global_flags() {
        let cli = Cli::parse_from([
            "jaundice_rate",
            "--normalizer",
            "lowercase",
            "--analysis-timeout",
            "0.3",
            "check",
            "https://inosmi.ru/a.html",
            "https://inosmi.ru/b.html",
        ]);
        assert_eq!(cli.normalizer, Some(NormalizerKind::Lowercase));
        assert_eq!(cli.analysis_timeout, Some(0.3));
        match cli.command {
            Command::Check { urls } => assert_eq!(urls.len(), 2),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_check_requires_urls() {
        assert!(Cli::try_parse_from(["jaundice_rate", "check"]).is_err());
    }
}
