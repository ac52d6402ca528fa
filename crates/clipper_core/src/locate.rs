use std::sync::LazyLock;

use regex::Regex;

use crate::CandidateUrl;

/// `http(s)://` followed by anything up to whitespace, a quote, an angle
/// bracket, an opening square bracket or closing punctuation (ASCII and
/// full-width).
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)https?://[^\[\s"'<>，。、）)\]}】》」』]+"#).expect("url pattern compiles")
});

fn is_trailing_noise(c: char) -> bool {
    matches!(
        c,
        ')' | ']'
            | '}'
            | '>'
            | ','
            | '.'
            | '!'
            | '?'
            | '"'
            | '\''
            | ':'
            | ';'
            | '，'
            | '。'
            | '、'
            | '：'
            | '；'
            | '！'
            | '？'
            | '）'
            | '】'
            | '》'
            | '」'
            | '』'
            | '…'
    )
}

/// Returns the first http(s) URL embedded in `text`.
///
/// Matches are tried in order of appearance. Trailing punctuation is cut off
/// each match before it is parsed; matches that still fail to parse are
/// skipped rather than ending the search.
pub fn locate_first_url(text: &str) -> Option<CandidateUrl> {
    if text.trim().is_empty() {
        return None;
    }
    URL_PATTERN.find_iter(text).find_map(|found| {
        let cleaned = found.as_str().trim_end_matches(is_trailing_noise);
        CandidateUrl::parse(cleaned)
    })
}
