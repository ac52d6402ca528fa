use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use clipper_core::{CandidateUrl, ResolvedUrl};
use clipper_engine::{
    social_bookmark, DomainRegistry, ExtractedTitle, Extractor, GenericTitleExtractor,
    TitleResolver, TitleSource,
};
use pretty_assertions::assert_eq;

fn resolved_url(url: &str) -> ResolvedUrl {
    ResolvedUrl::unchanged(&CandidateUrl::parse(url).expect("test url parses"))
}

/// Generic fallback double that records how often it is consulted.
struct CountingExtractor {
    calls: Arc<AtomicUsize>,
    answer: Option<&'static str>,
}

impl Extractor for CountingExtractor {
    fn extract(&self, _html: &str) -> Option<ExtractedTitle> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.map(|text| ExtractedTitle {
            text: text.to_string(),
            source: TitleSource::DocumentTitle,
        })
    }
}

fn counting_resolver(answer: Option<&'static str>) -> (TitleResolver, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let resolver = TitleResolver::new(
        DomainRegistry::default(),
        Box::new(CountingExtractor {
            calls: calls.clone(),
            answer,
        }),
    );
    (resolver, calls)
}

#[test]
fn domain_title_never_consults_generic_fallback() {
    let (resolver, calls) = counting_resolver(Some("generic"));
    let page = r#"<title>Generic page title</title>
        <meta property="og:title" content="露营装备清单 - 小红书">"#;

    let resolved = resolver.resolve(&resolved_url("https://www.xiaohongshu.com/explore/64f"), page);

    assert_eq!(resolved.record.title(), "露营装备清单 - 小红书");
    assert_eq!(resolved.source, TitleSource::Domain("social-bookmark"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn empty_domain_result_falls_back_to_generic() {
    let (resolver, calls) = counting_resolver(Some("generic"));
    // A post page without og:description.
    let page = "<title>X</title>";

    let resolved = resolver.resolve(&resolved_url("https://x.com/someone/status/1"), page);

    assert_eq!(resolved.record.title(), "generic");
    assert_eq!(resolved.source, TitleSource::DocumentTitle);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn placeholder_when_every_strategy_is_empty() {
    let (resolver, calls) = counting_resolver(None);

    let resolved = resolver.resolve(&resolved_url("https://blog.example.org/p/1"), "<p>hi</p>");

    assert_eq!(resolved.record.title(), "来自 blog.example.org 的内容");
    assert!(!resolved.record.title().is_empty());
    assert_eq!(resolved.source, TitleSource::Placeholder);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn bookmark_description_is_capped_at_one_hundred_chars() {
    let resolver = TitleResolver::default();
    let description = "a".repeat(130);
    let page = format!(r#"<meta property="og:description" content="{description}">"#);

    let resolved = resolver.resolve(&resolved_url("https://www.xiaohongshu.com/discovery/item/1"), &page);

    assert_eq!(resolved.record.title().chars().count(), 100);
    assert_eq!(resolved.record.title(), format!("{}...", "a".repeat(97)));
}

#[test]
fn social_post_and_short_video_defaults() {
    let resolver = TitleResolver::default();

    let post = r#"<meta property="og:description" content="Release notes are out — posted on X">"#;
    let resolved_post = resolver.resolve(&resolved_url("https://twitter.com/rustlang/status/1"), post);
    assert_eq!(resolved_post.record.title(), "Release notes are out");
    assert_eq!(resolved_post.source, TitleSource::Domain("social-post"));

    let video = r#"<title>抖音</title><script>{"nickname":"阿猫","title":"周末vlog"}</script>"#;
    let resolved_video = resolver.resolve(&resolved_url("https://www.douyin.com/video/7"), video);
    assert_eq!(resolved_video.record.title(), "阿猫 - 周末vlog");
    assert_eq!(resolved_video.source, TitleSource::Domain("short-video"));
}

#[test]
fn registered_predicate_extends_dispatch() {
    let mut registry = DomainRegistry::empty();
    registry.register(
        "local-notes",
        |host: &str| host.ends_with(".internal"),
        social_bookmark,
    );
    let resolver = TitleResolver::new(registry, Box::new(GenericTitleExtractor));
    let page = r#"<title>generic</title><meta property="og:title" content="Team note">"#;

    let resolved = resolver.resolve(&resolved_url("http://wiki.internal/n/1"), page);

    assert_eq!(resolved.record.title(), "Team note");
    assert_eq!(resolved.source, TitleSource::Domain("local-notes"));
}

#[test]
fn share_subdomain_reaches_short_video_extractor() {
    let resolver = TitleResolver::default();
    let page = r#"<title>抖音</title><script>{"desc":"猫咪跳舞"}</script>"#;

    let resolved = resolver.resolve(&resolved_url("https://www.iesdouyin.com/share/video/7/"), page);

    assert_eq!(resolved.record.title(), "猫咪跳舞");
    assert_eq!(resolved.source, TitleSource::Domain("short-video"));
}
