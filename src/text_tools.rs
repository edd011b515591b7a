//! Word normalization and jaundice scoring.
//!
//! The [`Normalizer`] is the expensive part of the pipeline: it runs on a
//! blocking worker (see [`crate::pipeline`]) and is handed a
//! [`CancellationToken`] so that an abandoned run stops at the next word.

use clap::ValueEnum;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use crate::utils::round_to;

static DECORATIONS: Lazy<Regex> = Lazy::new(|| Regex::new("[«»…]").expect("static regex"));

/// Reduces a word to the canonical form used for lexicon matching.
pub trait Normalizer: Send + Sync {
    fn normal_form(&self, word: &str) -> String;
}

/// Lowercases, then applies the Russian Snowball stemmer.
pub struct SnowballNormalizer {
    stemmer: Stemmer,
}

impl SnowballNormalizer {
    pub fn russian() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::Russian),
        }
    }
}

impl fmt::Debug for SnowballNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowballNormalizer")
            .field("algorithm", &"russian")
            .finish()
    }
}

impl Normalizer for SnowballNormalizer {
    fn normal_form(&self, word: &str) -> String {
        self.stemmer.stem(&word.to_lowercase()).into_owned()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LowercaseNormalizer;

impl Normalizer for LowercaseNormalizer {
    fn normal_form(&self, word: &str) -> String {
        word.to_lowercase()
    }
}

/// Which [`Normalizer`] the process is started with.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NormalizerKind {
    #[default]
    Snowball,
    Lowercase,
}

impl NormalizerKind {
    pub fn build(self) -> Box<dyn Normalizer> {
        match self {
            NormalizerKind::Snowball => Box::new(SnowballNormalizer::russian()),
            NormalizerKind::Lowercase => Box::new(LowercaseNormalizer),
        }
    }
}

fn clean_word(word: &str) -> String {
    DECORATIONS
        .replace_all(word, "")
        .trim_matches(|c: char| c.is_ascii_punctuation())
        .to_string()
}

/// Split plaintext into normalized words.
///
/// Short normal forms (two characters or fewer) are dropped, except for the
/// negation `не`. Returns `None` as soon as `cancel` fires.
pub fn split_by_words(
    normalizer: &dyn Normalizer,
    text: &str,
    cancel: &CancellationToken,
) -> Option<Vec<String>> {
    let mut words = Vec::new();
    for word in text.split_whitespace() {
        if cancel.is_cancelled() {
            return None;
        }
        let normalized = normalizer.normal_form(&clean_word(word));
        if normalized.chars().count() > 2 || normalized == "не" {
            words.push(normalized);
        }
    }
    Some(words)
}

/// The charged-word lexicon.
///
/// Built once at startup and shared read-only between every pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChargedWords {
    words: BTreeSet<String>,
}

impl ChargedWords {
    /// Build from lines of text; surrounding whitespace is trimmed and blank lines skipped.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = lines
            .into_iter()
            .map(|line| line.as_ref().trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();
        Self { words }
    }

    /// Load a line-delimited lexicon file.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> std::io::Result<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        let charged = Self::from_lines(raw.lines());
        info!(count = charged.len(), "Loaded charged words");
        Ok(charged)
    }

    /// Map every entry through `normalizer`, so lexicon and article tokens
    /// are compared in the same form.
    pub fn normalized(self, normalizer: &dyn Normalizer) -> Self {
        Self {
            words: self
                .words
                .iter()
                .map(|word| normalizer.normal_form(word))
                .collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Percentage of `article_words` found in `charged_words`, rounded to two places.
///
/// An empty article scores `0.0`.
pub fn calculate_jaundice_rate(article_words: &[String], charged_words: &ChargedWords) -> f64 {
    if article_words.is_empty() {
        return 0.0;
    }
    let found = article_words
        .iter()
        .filter(|word| charged_words.contains(word))
        .count();
    round_to(found as f64 / article_words.len() as f64 * 100.0, 2)
}
