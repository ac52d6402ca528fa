//! Clipper engine: fetching, title extraction and delivery to the sink.
mod decode;
mod extract;
mod fetch;
mod pipeline;
mod sink;
mod title;
mod types;

pub use decode::{decode_html, DecodedHtml};
pub use extract::{
    extract_generic_title, host_contains, host_matches, short_video, social_bookmark, social_post,
    truncate_description, DomainMatch, DomainRegistry, ExtractedTitle, Extractor,
    GenericTitleExtractor,
};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use pipeline::{Outcome, Pipeline, PipelineError, SinkStatus};
pub use sink::{
    build_page_payload, NotionSink, SinkConfig, SinkError, TitleSink, DEFAULT_NOTION_ENDPOINT,
    DEFAULT_NOTION_VERSION,
};
pub use title::{ResolvedTitle, TitleResolver, TitleSource};
pub use types::{FailureKind, FetchError, Page, PageMetadata, Resolution};
