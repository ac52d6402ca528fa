use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use clipper_core::{CandidateUrl, ResolvedUrl};
use clipper_logging::{clip_debug, clip_trace};
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Url};

use crate::decode::decode_html;
use crate::{FailureKind, FetchError, Page, PageMetadata, Resolution};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 10,
            max_bytes: 5 * 1024 * 1024,
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

/// The transport the pipeline talks to.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// Follows redirects from `url` and reports where they end.
    async fn resolve_redirect(&self, url: &CandidateUrl) -> Result<Resolution, FetchError>;

    /// Downloads and decodes the page at `url`.
    async fn fetch_page(&self, url: &ResolvedUrl) -> Result<Page, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self, redirect_counter: Arc<AtomicUsize>) -> Result<reqwest::Client, FetchError> {
        let redirect_limit = self.settings.redirect_limit;
        let policy = reqwest::redirect::Policy::custom(move |attempt| {
            let count = attempt.previous().len();
            redirect_counter.store(count, Ordering::Relaxed);
            if count > redirect_limit {
                attempt.error("redirect limit exceeded")
            } else {
                attempt.follow()
            }
        });

        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .user_agent(self.settings.user_agent.as_str())
            .redirect(policy)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    /// One redirect-following request whose body is never read.
    ///
    /// A HEAD answered with a non-success status counts as rejected; a GET
    /// only fails on transport errors, its status is judged by the page fetch.
    async fn probe(&self, method: Method, url: &Url) -> Result<Resolution, FetchError> {
        let redirect_counter = Arc::new(AtomicUsize::new(0));
        let client = self.build_client(redirect_counter.clone())?;

        let response = client
            .request(method.clone(), url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if method == Method::HEAD && !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("{method} probe answered {status}"),
            ));
        }

        let resolved = ResolvedUrl::try_from(response.url().clone())
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

        Ok(Resolution {
            url: resolved,
            redirect_count: redirect_counter.load(Ordering::Relaxed),
            used_fallback: method != Method::HEAD,
        })
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn resolve_redirect(&self, url: &CandidateUrl) -> Result<Resolution, FetchError> {
        // Attempt A: HEAD, no body transfer.
        match self.probe(Method::HEAD, url.as_url()).await {
            Ok(resolution) => Ok(resolution),
            Err(err) => {
                clip_debug!("HEAD probe for {} rejected ({}); retrying with GET", url, err);
                // Attempt B: full GET. Its error is the one that propagates.
                self.probe(Method::GET, url.as_url()).await
            }
        }
    }

    async fn fetch_page(&self, url: &ResolvedUrl) -> Result<Page, FetchError> {
        let redirect_counter = Arc::new(AtomicUsize::new(0));
        let client = self.build_client(redirect_counter)?;

        let response = client
            .get(url.as_url().clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        let decoded = decode_html(&bytes, content_type.as_deref());
        if decoded.had_errors {
            clip_debug!(
                "page {} had malformed {} sequences; decoded lossily",
                final_url,
                decoded.encoding_label
            );
        }
        clip_trace!("fetched {} bytes from {}", bytes.len(), final_url);

        Ok(Page {
            html: decoded.html,
            metadata: PageMetadata {
                requested_url: url.to_string(),
                final_url,
                content_type,
                encoding_label: decoded.encoding_label,
                byte_len: bytes.len() as u64,
            },
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
