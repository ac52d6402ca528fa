use super::domains::{short_video, social_bookmark, social_post};

type Matcher = Box<dyn Fn(&str) -> bool + Send + Sync>;
type DomainExtractor = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

struct Entry {
    name: &'static str,
    matcher: Matcher,
    extract: DomainExtractor,
}

/// A title produced by a registered domain extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainMatch {
    pub extractor: &'static str,
    pub title: String,
}

/// Ordered set of per-domain extractors.
///
/// Entries are tried in registration order; every entry whose matcher
/// accepts the host gets a turn until one returns a title.
pub struct DomainRegistry {
    entries: Vec<Entry>,
}

/// True when `host` contains `domain` anywhere (case-insensitive).
pub fn host_contains(host: &str, domain: &str) -> bool {
    host.to_ascii_lowercase()
        .contains(&domain.to_ascii_lowercase())
}

/// True when `host` is `domain` or one of its subdomains (case-insensitive).
///
/// Stricter than [`host_contains`]; pass it to [`DomainRegistry::register`]
/// when a label boundary matters.
pub fn host_matches(host: &str, domain: &str) -> bool {
    let host = host.trim_end_matches('.');
    if host.eq_ignore_ascii_case(domain) {
        return true;
    }
    host.len() > domain.len()
        && host.as_bytes()[host.len() - domain.len() - 1] == b'.'
        && host[host.len() - domain.len()..].eq_ignore_ascii_case(domain)
}

impl DomainRegistry {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registers `extract` for hosts containing any of `domains`.
    pub fn register_domains<F>(
        &mut self,
        name: &'static str,
        domains: &'static [&'static str],
        extract: F,
    ) -> &mut Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.register(
            name,
            move |host: &str| domains.iter().any(|domain| host_contains(host, domain)),
            extract,
        )
    }

    /// Registers `extract` behind an arbitrary host predicate.
    pub fn register<M, F>(&mut self, name: &'static str, matcher: M, extract: F) -> &mut Self
    where
        M: Fn(&str) -> bool + Send + Sync + 'static,
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.entries.push(Entry {
            name,
            matcher: Box::new(matcher),
            extract: Box::new(extract),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First non-empty title from an extractor registered for `domain`.
    pub fn extract(&self, domain: &str, page: &str) -> Option<DomainMatch> {
        self.entries
            .iter()
            .filter(|entry| (entry.matcher)(domain))
            .find_map(|entry| {
                (entry.extract)(page)
                    .map(|title| title.trim().to_string())
                    .filter(|title| !title.is_empty())
                    .map(|title| DomainMatch {
                        extractor: entry.name,
                        title,
                    })
            })
    }
}

impl Default for DomainRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register_domains("social-post", &["twitter.com", "x.com"], social_post)
            .register_domains("short-video", &["douyin.com"], short_video)
            .register_domains("social-bookmark", &["xiaohongshu.com"], social_bookmark);
        registry
    }
}
