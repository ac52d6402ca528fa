use std::sync::Once;

use clipper_core::locate_first_url;
use clipper_logging::clip_debug;
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(clipper_logging::initialize_for_tests);
}

fn located(text: &str) -> Option<String> {
    let found = locate_first_url(text).map(|candidate| candidate.as_str().to_string());
    clip_debug!("located {found:?} in {text:?}");
    found
}

#[test]
fn finds_url_in_prose_with_fullwidth_exclamation() {
    init_logging();
    assert_eq!(
        located("check this out http://bit.ly/abc123 thanks！"),
        Some("http://bit.ly/abc123".to_string())
    );
}

#[test]
fn strips_fullwidth_period_glued_to_url() {
    init_logging();
    assert_eq!(
        located("看看这个https://example.com/post/42。很有意思"),
        Some("https://example.com/post/42".to_string())
    );
}

#[test]
fn stops_before_closing_brackets() {
    init_logging();
    assert_eq!(
        located("(see https://example.com/docs)"),
        Some("https://example.com/docs".to_string())
    );
    assert_eq!(
        located("【链接：https://v.douyin.com/iRNBho6u/】"),
        Some("https://v.douyin.com/iRNBho6u/".to_string())
    );
    assert_eq!(
        located("链接（https://example.com/a）"),
        Some("https://example.com/a".to_string())
    );
}

#[test]
fn stops_before_opening_square_bracket() {
    init_logging();
    assert_eq!(
        located("ref https://example.com/page[1] ok"),
        Some("https://example.com/page".to_string())
    );
    assert_eq!(
        located("see https://a.com[note]"),
        Some("https://a.com/".to_string())
    );
}

#[test]
fn strips_trailing_sentence_punctuation() {
    init_logging();
    assert_eq!(
        located("Read https://example.com/article?id=7. Then reply!"),
        Some("https://example.com/article?id=7".to_string())
    );
    assert_eq!(
        located("Is it https://example.com/q?!"),
        Some("https://example.com/q".to_string())
    );
    assert_eq!(
        located("quoted \"https://example.com/quoted\" here"),
        Some("https://example.com/quoted".to_string())
    );
}

#[test]
fn returns_first_url_by_position() {
    init_logging();
    assert_eq!(
        located("first http://a.example/x then https://b.example/longer/path?with=query"),
        Some("http://a.example/x".to_string())
    );
}

#[test]
fn skips_invalid_candidate_and_keeps_scanning() {
    init_logging();
    assert_eq!(
        located("broken http://[oops and then https://example.com/ok"),
        Some("https://example.com/ok".to_string())
    );
    assert_eq!(
        located("just http://. then https://example.com/next"),
        Some("https://example.com/next".to_string())
    );
}

#[test]
fn scheme_match_is_case_insensitive() {
    init_logging();
    assert_eq!(
        located("HTTPS://Example.com/Path"),
        Some("https://example.com/Path".to_string())
    );
}

#[test]
fn none_without_urls() {
    init_logging();
    assert_eq!(located(""), None);
    assert_eq!(located("   \n\t"), None);
    assert_eq!(located("no links here, only words."), None);
    assert_eq!(located("ftp://example.com/file and www.example.com"), None);
    assert_eq!(located("http:// https://"), None);
}
