//! Host-specific article text extraction.
//!
//! Each supported news site gets a [`TextExtractor`] registered in the
//! [`ExtractorRegistry`] under its host key (see [`host_key`]). The registry is
//! built once at startup and shared read-only by every pipeline run.
//!
//! # Supported Sources
//!
//! | Source | Host key | Module |
//! |--------|----------|--------|
//! | InoSMI | `inosmi_ru` | [`inosmi`] |
//!
//! Most sites only need a pair of CSS selectors, see [`SelectorExtractor`].

pub mod inosmi;
mod selector;

pub use selector::SelectorExtractor;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no extractor registered for host {0:?}")]
    UnknownHost(String),
    #[error("url has no host to look an extractor up by")]
    NoHost,
    #[error("article structure not found in document")]
    ArticleNotFound,
    #[error("invalid selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// Turns a raw HTML document into plain article text.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, html: &str) -> Result<String, ExtractError>;
}

/// Derive the registry key for a URL: lowercase host with dots replaced by
/// underscores. The port is not part of the key.
///
/// ```ignore
/// assert_eq!(host_key("https://inosmi.ru/20230113/x.html"), Some("inosmi_ru".to_string()));
/// ```
pub fn host_key(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(host.to_lowercase().replace('.', "_"))
}

/// Read-only map from host key to extractor.
#[derive(Clone, Default)]
pub struct ExtractorRegistry {
    extractors: HashMap<String, Arc<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in source.
    pub fn with_defaults() -> Result<Self, ExtractError> {
        Ok(Self::new().register(inosmi::HOST_KEY, inosmi::extractor()?))
    }

    /// Add (or replace) the extractor for `host_key`.
    pub fn register(
        mut self,
        host_key: impl Into<String>,
        extractor: impl TextExtractor + 'static,
    ) -> Self {
        self.extractors.insert(host_key.into(), Arc::new(extractor));
        self
    }

    pub fn contains(&self, host_key: &str) -> bool {
        self.extractors.contains_key(host_key)
    }

    /// Extract article text from `html` with the extractor registered for `url`'s host.
    pub fn extract(&self, url: &str, html: &str) -> Result<String, ExtractError> {
        let key = host_key(url).ok_or(ExtractError::NoHost)?;
        let extractor = self
            .extractors
            .get(&key)
            .ok_or_else(|| ExtractError::UnknownHost(key.clone()))?;
        extractor.extract(html)
    }
}

impl fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut hosts: Vec<_> = self.extractors.keys().collect();
        hosts.sort();
        f.debug_struct("ExtractorRegistry")
            .field("hosts", &hosts)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    impl TextExtractor for Fixed {
        fn extract(&self, _html: &str) -> Result<String, ExtractError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_host_key() {
        assert_eq!(
            host_key("https://inosmi.ru/20230113/energetika-259651741.html"),
            Some("inosmi_ru".to_string())
        );
        assert_eq!(host_key("http://InoSMI.RU:8080/a"), Some("inosmi_ru".to_string()));
        assert_eq!(host_key("http://127.0.0.1:4000/a"), Some("127_0_0_1".to_string()));
        assert_eq!(host_key("not a url"), None);
    }

    #[test]
    fn test_unknown_host_is_rejected() {
        let registry = ExtractorRegistry::new().register("inosmi_ru", Fixed("text"));
        let err = registry
            .extract("https://dvmn.org/modules/async-python/", "<html></html>")
            .unwrap_err();
        assert!(matches!(err, ExtractError::UnknownHost(ref host) if host == "dvmn_org"));
    }

    #[test]
    fn test_unparsable_url_has_no_host() {
        let registry = ExtractorRegistry::new().register("inosmi_ru", Fixed("text"));
        let err = registry.extract("inosmi.ru/no-scheme", "").unwrap_err();
        assert!(matches!(err, ExtractError::NoHost));
    }

    #[test]
    fn test_lookup_by_host_key() {
        let registry = ExtractorRegistry::new()
            .register("inosmi_ru", Fixed("inosmi"))
            .register("example_com", Fixed("example"));
        assert_eq!(registry.extract("https://example.com/a", "").unwrap(), "example");
        assert_eq!(registry.extract("https://inosmi.ru/b", "").unwrap(), "inosmi");
    }

    #[test]
    fn test_defaults_include_inosmi() {
        let registry = ExtractorRegistry::with_defaults().unwrap();
        assert!(registry.contains("inosmi_ru"));
        assert_eq!(format!("{registry:?}"), r#"ExtractorRegistry { hosts: ["inosmi_ru"] }"#);
    }
}
