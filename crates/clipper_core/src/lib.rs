//! Clipper core: pure values and rules of the title pipeline, no IO.
mod locate;
mod record;

pub use locate::locate_first_url;
pub use record::{placeholder_title, CandidateUrl, ResolvedUrl, TitleRecord, UnsupportedScheme};
