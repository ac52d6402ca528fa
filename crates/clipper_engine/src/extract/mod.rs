//! Title extraction strategies.
//!
//! Domain extractors know a platform's markup and are consulted first; the
//! generic extractor only reads universal `<title>` / Open Graph metadata.
mod domains;
mod generic;
mod meta;
mod registry;

pub use domains::{short_video, social_bookmark, social_post, truncate_description};
pub use generic::{extract_generic_title, ExtractedTitle, Extractor, GenericTitleExtractor};
pub use registry::{host_contains, host_matches, DomainMatch, DomainRegistry};
