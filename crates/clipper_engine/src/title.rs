use std::fmt;

use clipper_core::{placeholder_title, ResolvedUrl, TitleRecord};
use clipper_logging::clip_debug;

use crate::extract::{DomainRegistry, Extractor, GenericTitleExtractor};

/// Which resolution step produced a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleSource {
    Domain(&'static str),
    DocumentTitle,
    OpenGraphTitle,
    Placeholder,
}

impl fmt::Display for TitleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TitleSource::Domain(name) => write!(f, "domain extractor {name}"),
            TitleSource::DocumentTitle => write!(f, "<title>"),
            TitleSource::OpenGraphTitle => write!(f, "og:title"),
            TitleSource::Placeholder => write!(f, "placeholder"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTitle {
    pub record: TitleRecord,
    pub source: TitleSource,
}

/// Picks a title for a fetched page.
///
/// Precedence is strict: a registered domain extractor, then the generic
/// fallback, then the placeholder. Later steps run only when every earlier
/// one came back empty, and results are never combined.
pub struct TitleResolver {
    registry: DomainRegistry,
    fallback: Box<dyn Extractor>,
}

impl TitleResolver {
    pub fn new(registry: DomainRegistry, fallback: Box<dyn Extractor>) -> Self {
        Self { registry, fallback }
    }

    pub fn resolve(&self, url: &ResolvedUrl, page: &str) -> ResolvedTitle {
        let domain = url.domain();

        let (title, source) = if let Some(found) = self.registry.extract(&domain, page) {
            (found.title, TitleSource::Domain(found.extractor))
        } else if let Some(found) = self
            .fallback
            .extract(page)
            .filter(|found| !found.text.trim().is_empty())
        {
            (found.text, found.source)
        } else {
            clip_debug!("no title found for {}; using placeholder", url);
            (placeholder_title(&domain), TitleSource::Placeholder)
        };

        ResolvedTitle {
            record: TitleRecord::new(title, url.clone()),
            source,
        }
    }
}

impl Default for TitleResolver {
    fn default() -> Self {
        Self::new(DomainRegistry::default(), Box::new(GenericTitleExtractor))
    }
}
