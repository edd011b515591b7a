use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::{ExtractError, TextExtractor};
use crate::utils::truncate_for_log;

/// Extracts article text with CSS selectors.
///
/// The optional title selector is collected first, followed by every match of
/// the body selector, one block per line. A document where the body selector
/// finds no text is reported as [`ExtractError::ArticleNotFound`].
#[derive(Debug)]
pub struct SelectorExtractor {
    title: Option<Selector>,
    body: Selector,
}

impl SelectorExtractor {
    pub fn new(body: &str) -> Result<Self, ExtractError> {
        Ok(Self {
            title: None,
            body: parse_selector(body)?,
        })
    }

    pub fn with_title(mut self, title: &str) -> Result<Self, ExtractError> {
        self.title = Some(parse_selector(title)?);
        Ok(self)
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
        selector: selector.to_string(),
        reason: format!("{e:?}"),
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .join(" ")
}

impl TextExtractor for SelectorExtractor {
    fn extract(&self, html: &str) -> Result<String, ExtractError> {
        let document = Html::parse_document(html);

        let body: Vec<String> = document
            .select(&self.body)
            .map(element_text)
            .filter(|text| !text.is_empty())
            .collect();
        if body.is_empty() {
            return Err(ExtractError::ArticleNotFound);
        }

        let title = self
            .title
            .as_ref()
            .map(|selector| document.select(selector).map(element_text).collect::<Vec<_>>())
            .unwrap_or_default();

        let text = title
            .into_iter()
            .filter(|text| !text.is_empty())
            .chain(body)
            .join("\n");
        debug!(bytes = text.len(), preview = %truncate_for_log(&text, 120), "Extracted article text");
        Ok(text)
    }
}
