use std::sync::LazyLock;

use scraper::{Html, Selector};

static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("title selector parses"));
static OG_TITLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[property="og:title"], meta[name="og:title"]"#)
        .expect("og:title selector parses")
});
static OG_DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[property="og:description"], meta[name="og:description"]"#)
        .expect("og:description selector parses")
});

/// Text of the first `<title>` element, whitespace collapsed.
pub(crate) fn document_title(doc: &Html) -> Option<String> {
    doc.select(&TITLE)
        .next()
        .map(|node| collapse_whitespace(&node.text().collect::<String>()))
        .filter(|title| !title.is_empty())
}

pub(crate) fn og_title(doc: &Html) -> Option<String> {
    meta_content(doc, &OG_TITLE)
}

pub(crate) fn og_description(doc: &Html) -> Option<String> {
    meta_content(doc, &OG_DESCRIPTION)
}

/// `content` of the first matching meta tag, trimmed.
fn meta_content(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .next()
        .and_then(|node| node.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
