use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

use super::meta::{og_description, og_title};

const MAX_DESCRIPTION_CHARS: usize = 100;
const TRUNCATED_CHARS: usize = 97;
const ELLIPSIS: &str = "...";

/// A dash segment at the end naming the platform, e.g. ` - posted on X`
/// or ` — 在 Twitter 上发布`.
static PLATFORM_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+[-—–]\s+[^-—–]*\b(?:Twitter|X)\b[^-—–]*$").expect("suffix pattern compiles")
});

static DESC_FIELD: LazyLock<Regex> = LazyLock::new(|| json_field("desc"));
static NICKNAME_FIELD: LazyLock<Regex> = LazyLock::new(|| json_field("nickname"));
static TITLE_FIELD: LazyLock<Regex> = LazyLock::new(|| json_field("title"));

fn json_field(name: &str) -> Regex {
    Regex::new(&format!(r#""{name}"\s*:\s*"((?:[^"\\]|\\.)*)""#)).expect("field pattern compiles")
}

/// First string value of an inline JSON field, escapes decoded.
fn inline_field(pattern: &Regex, page: &str) -> Option<String> {
    let raw = pattern.captures(page)?.get(1)?.as_str();
    let value = serde_json::from_str::<String>(&format!("\"{raw}\"")).unwrap_or_else(|_| raw.to_string());
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Social-post pages (twitter.com, x.com): the post text lives in
/// `og:description`, minus the trailing "posted on <platform>" segment.
pub fn social_post(page: &str) -> Option<String> {
    let doc = Html::parse_document(page);
    let description = og_description(&doc)?;
    let stripped = PLATFORM_SUFFIX.replace(&description, "");
    let stripped = stripped.trim();
    (!stripped.is_empty()).then(|| stripped.to_string())
}

/// Short-video pages (douyin.com): the inline `"desc"` field, otherwise
/// `"{nickname} - {title}"` when both inline fields are present.
pub fn short_video(page: &str) -> Option<String> {
    if let Some(desc) = inline_field(&DESC_FIELD, page) {
        return Some(desc);
    }
    let author = inline_field(&NICKNAME_FIELD, page)?;
    let title = inline_field(&TITLE_FIELD, page)?;
    Some(format!("{author} - {title}"))
}

/// Social-bookmarking notes (xiaohongshu.com): `og:title`, otherwise a
/// length-capped `og:description`.
pub fn social_bookmark(page: &str) -> Option<String> {
    let doc = Html::parse_document(page);
    og_title(&doc).or_else(|| og_description(&doc).map(|desc| truncate_description(&desc)))
}

/// Cuts descriptions longer than 100 characters to 97 plus `...`.
pub fn truncate_description(description: &str) -> String {
    if description.chars().count() <= MAX_DESCRIPTION_CHARS {
        return description.to_string();
    }
    let mut truncated: String = description.chars().take(TRUNCATED_CHARS).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
