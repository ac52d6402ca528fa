mod config;
mod input;
mod logging;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use clipper_engine::{NotionSink, Pipeline, ReqwestFetcher, SinkStatus, TitleResolver, TitleSink};
use clipper_logging::{clip_debug, clip_error};

use crate::config::Cli;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("clipper: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    // A missing .env file is fine; the environment may already be set.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    logging::initialize(cli.log_destination(), cli.log_level());

    let raw = cli.read_raw_input()?;

    let sink = match cli.sink_config() {
        Some(config) => {
            clip_debug!("sink config: {:?}", config);
            let sink: Arc<dyn TitleSink> =
                Arc::new(NotionSink::new(config).context("building sink client")?);
            Some(sink)
        }
        None => None,
    };
    let pipeline = Pipeline::new(
        Arc::new(ReqwestFetcher::new(cli.fetch_settings())),
        TitleResolver::default(),
        sink,
    );

    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    match runtime.block_on(pipeline.process(raw.as_deref())) {
        Ok(outcome) => {
            println!("{}", outcome.record.title());
            if let SinkStatus::Failed(err) = &outcome.sink {
                eprintln!("clipper: title not saved: {err}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            clip_error!("request failed: {}", err);
            eprintln!("{}", err.caller_message());
            Ok(exit_code_for(err.status_code()))
        }
    }
}

/// 2 for caller mistakes (4xx), 1 for everything else.
fn exit_code_for(status: u16) -> ExitCode {
    if (400..500).contains(&status) {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}
