use std::fmt;

use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported url scheme {scheme:?}, only http and https are accepted")]
pub struct UnsupportedScheme {
    pub scheme: String,
}

fn is_web_scheme(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// An absolute http(s) URL located inside free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateUrl(Url);

impl CandidateUrl {
    /// Strictly parses `raw`; `None` unless it is an absolute http(s) URL.
    pub fn parse(raw: &str) -> Option<Self> {
        Url::parse(raw)
            .ok()
            .filter(is_web_scheme)
            .map(CandidateUrl)
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CandidateUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// The URL a candidate ends up at after its redirect chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrl(Url);

impl ResolvedUrl {
    /// A candidate that did not redirect anywhere.
    pub fn unchanged(candidate: &CandidateUrl) -> Self {
        ResolvedUrl(candidate.0.clone())
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Lower-cased host name, empty for host-less URLs.
    pub fn domain(&self) -> String {
        self.0
            .host_str()
            .map(str::to_ascii_lowercase)
            .unwrap_or_default()
    }
}

impl TryFrom<Url> for ResolvedUrl {
    type Error = UnsupportedScheme;

    fn try_from(url: Url) -> Result<Self, Self::Error> {
        if is_web_scheme(&url) {
            Ok(ResolvedUrl(url))
        } else {
            Err(UnsupportedScheme {
                scheme: url.scheme().to_string(),
            })
        }
    }
}

impl fmt::Display for ResolvedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Title used when no extraction strategy produced anything.
pub fn placeholder_title(domain: &str) -> String {
    format!("来自 {domain} 的内容")
}

/// Final `{title, url}` pair handed to the sink. The title is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleRecord {
    title: String,
    url: ResolvedUrl,
}

impl TitleRecord {
    /// Builds a record, substituting the placeholder for a blank title.
    pub fn new(title: impl Into<String>, url: ResolvedUrl) -> Self {
        let title = title.into();
        let title = if title.trim().is_empty() {
            placeholder_title(&url.domain())
        } else {
            title
        };
        Self { title, url }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &ResolvedUrl {
        &self.url
    }
}
