//! InoSMI article extractor.
//!
//! InoSMI (`inosmi.ru`) renders the headline in `.article__title` and splits
//! the body into consecutive `.article__text` blocks, one per paragraph.
//! Pages without any `.article__text` block (section indexes, tag pages,
//! error pages) are not articles.

use super::{ExtractError, SelectorExtractor};

pub const HOST_KEY: &str = "inosmi_ru";

pub fn extractor() -> Result<SelectorExtractor, ExtractError> {
    SelectorExtractor::new(".article__text")?.with_title(".article__title")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::TextExtractor;

    const ARTICLE: &str = r#"
        <html>
          <head><title>Энергетика | ИноСМИ</title></head>
          <body>
            <div class="header">Все новости</div>
            <div class="article">
              <div class="article__title">Европа готовится к зиме</div>
              <div class="article__announce">Анонс</div>
              <div class="article__text">Цены на газ снова выросли.</div>
              <div class="article__text">Эксперты <a href="/x">предупреждают</a> о последствиях.</div>
            </div>
            <div class="footer">© ИноСМИ</div>
          </body>
        </html>
    "#;

    #[test]
    fn test_extracts_headline_and_paragraphs() {
        let text = extractor().unwrap().extract(ARTICLE).unwrap();
        assert_eq!(
            text,
            "Европа готовится к зиме\nЦены на газ снова выросли.\nЭксперты предупреждают о последствиях."
        );
    }

    #[test]
    fn test_index_page_is_not_an_article() {
        let html = r#"<html><body><div class="list-item">Новости дня</div></body></html>"#;
        let err = extractor().unwrap().extract(html).unwrap_err();
        assert!(matches!(err, ExtractError::ArticleNotFound));
    }
}
