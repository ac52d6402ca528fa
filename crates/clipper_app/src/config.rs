use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{ArgAction, Parser};
use clipper_engine::{FetchSettings, SinkConfig, DEFAULT_NOTION_ENDPOINT, DEFAULT_NOTION_VERSION};
use log::LevelFilter;

use crate::input::{raw_input_from_body, BodyFormat};
use crate::logging::LogDestination;

/// Find the first link in a piece of text, follow it to its final page and
/// print (and save) that page's title.
#[derive(Debug, Parser)]
#[command(name = "clipper", version)]
pub struct Cli {
    /// Text containing a link; read from stdin when omitted.
    pub text: Option<String>,

    /// Treat the input as a JSON body and use its `url` field.
    #[arg(long)]
    pub json: bool,

    /// Print the title without saving it.
    #[arg(long)]
    pub no_sink: bool,

    #[arg(long, env = "NOTION_API_KEY", hide_env_values = true)]
    pub notion_api_key: Option<String>,

    #[arg(long, env = "NOTION_DATABASE_ID")]
    pub notion_database_id: Option<String>,

    #[arg(long, env = "NOTION_VERSION", default_value = DEFAULT_NOTION_VERSION)]
    pub notion_version: String,

    #[arg(long, env = "NOTION_ENDPOINT", default_value = DEFAULT_NOTION_ENDPOINT)]
    pub notion_endpoint: String,

    /// Per-request timeout for every network call, in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Also append logs to this file.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// -v for debug, -vv for trace.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Raw text for the pipeline; `None` when a JSON body has no `url`.
    pub fn read_raw_input(&self) -> anyhow::Result<Option<String>> {
        let body = match &self.text {
            Some(text) => text.clone(),
            None => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .context("reading input from stdin")?;
                buffer
            }
        };
        let format = if self.json {
            BodyFormat::Json
        } else {
            BodyFormat::Text
        };
        Ok(raw_input_from_body(&body, format))
    }

    pub fn sink_config(&self) -> Option<SinkConfig> {
        if self.no_sink {
            return None;
        }
        Some(SinkConfig {
            api_version: self.notion_version.clone(),
            endpoint: self.notion_endpoint.clone(),
            ..SinkConfig::new(
                self.notion_api_key.clone(),
                self.notion_database_id.clone(),
            )
        })
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            request_timeout: Duration::from_secs(self.timeout_secs),
            ..FetchSettings::default()
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub fn log_destination(&self) -> LogDestination {
        match &self.log_file {
            Some(path) => LogDestination::Both(path.clone()),
            None => LogDestination::Terminal,
        }
    }
}
