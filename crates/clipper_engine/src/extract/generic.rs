use scraper::Html;

use super::meta::{document_title, og_title};
use crate::TitleSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedTitle {
    pub text: String,
    pub source: TitleSource,
}

/// Fallback strategy consulted when no domain extractor produced a title.
pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str) -> Option<ExtractedTitle>;
}

/// Reads the first `<title>` element, then the `og:title` meta tag.
///
/// Never invents a title; a page with neither yields `None`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericTitleExtractor;

impl Extractor for GenericTitleExtractor {
    fn extract(&self, html: &str) -> Option<ExtractedTitle> {
        let doc = Html::parse_document(html);
        if let Some(text) = document_title(&doc) {
            return Some(ExtractedTitle {
                text,
                source: TitleSource::DocumentTitle,
            });
        }
        og_title(&doc).map(|text| ExtractedTitle {
            text,
            source: TitleSource::OpenGraphTitle,
        })
    }
}

pub fn extract_generic_title(html: &str) -> Option<String> {
    GenericTitleExtractor.extract(html).map(|found| found.text)
}
