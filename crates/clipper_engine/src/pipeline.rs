use std::sync::Arc;

use clipper_core::{locate_first_url, TitleRecord};
use clipper_logging::{clip_debug, clip_error, clip_info, clip_warn, log_snippet};

use crate::{FetchError, Fetcher, SinkError, TitleResolver, TitleSink, TitleSource};

const RAW_INPUT_LOG_CHARS: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("no input text supplied")]
    InputMissing,
    #[error("no http(s) url found in input")]
    NoUrlFound,
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
}

impl PipelineError {
    /// HTTP-style status reported to the caller.
    pub fn status_code(&self) -> u16 {
        match self {
            PipelineError::InputMissing | PipelineError::NoUrlFound => 400,
            PipelineError::Fetch(_) => 500,
        }
    }

    /// Message reported to the caller. Fetch causes stay in the log.
    pub fn caller_message(&self) -> &'static str {
        match self {
            PipelineError::InputMissing => "URL parameter is missing.",
            PipelineError::NoUrlFound => "No valid URL found in input.",
            PipelineError::Fetch(_) => "Error fetching URL.",
        }
    }
}

#[derive(Debug)]
pub enum SinkStatus {
    Delivered,
    Skipped,
    Failed(SinkError),
}

#[derive(Debug)]
pub struct Outcome {
    pub record: TitleRecord,
    pub source: TitleSource,
    pub redirect_count: usize,
    pub sink: SinkStatus,
}

/// Raw text in, title out: locate, resolve redirects, fetch, extract, deliver.
///
/// Each call is independent; the three network steps run one after another.
pub struct Pipeline {
    fetcher: Arc<dyn Fetcher>,
    titles: TitleResolver,
    sink: Option<Arc<dyn TitleSink>>,
}

impl Pipeline {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        titles: TitleResolver,
        sink: Option<Arc<dyn TitleSink>>,
    ) -> Self {
        Self {
            fetcher,
            titles,
            sink,
        }
    }

    pub async fn process(&self, raw_input: Option<&str>) -> Result<Outcome, PipelineError> {
        let text = raw_input
            .filter(|text| !text.trim().is_empty())
            .ok_or(PipelineError::InputMissing)?;
        clip_debug!("raw input: {}", log_snippet(text, RAW_INPUT_LOG_CHARS));

        let candidate = locate_first_url(text).ok_or(PipelineError::NoUrlFound)?;
        clip_info!("located url {}", candidate);

        let resolution = self
            .fetcher
            .resolve_redirect(&candidate)
            .await
            .inspect_err(|err| clip_warn!("resolving {} failed: {}", candidate, err))?;
        clip_info!(
            "resolved {} -> {} ({} redirects{})",
            candidate,
            resolution.url,
            resolution.redirect_count,
            if resolution.used_fallback { ", GET fallback" } else { "" }
        );

        let page = self
            .fetcher
            .fetch_page(&resolution.url)
            .await
            .inspect_err(|err| clip_warn!("fetching {} failed: {}", resolution.url, err))?;

        let resolved = self.titles.resolve(&resolution.url, &page.html);
        clip_info!("page title {:?} via {}", resolved.record.title(), resolved.source);

        let sink = self.deliver(&resolved.record).await;

        Ok(Outcome {
            record: resolved.record,
            source: resolved.source,
            redirect_count: resolution.redirect_count,
            sink,
        })
    }

    async fn deliver(&self, record: &TitleRecord) -> SinkStatus {
        let Some(sink) = self.sink.as_ref() else {
            clip_debug!("no sink configured; skipping delivery of {}", record.url());
            return SinkStatus::Skipped;
        };
        match sink.submit(record).await {
            Ok(()) => SinkStatus::Delivered,
            Err(err) => {
                clip_error!("delivering {} to sink failed: {}", record.url(), err);
                SinkStatus::Failed(err)
            }
        }
    }
}
