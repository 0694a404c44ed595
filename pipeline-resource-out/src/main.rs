//! Pipeline Resource: out step
//!
//! Reads one request document on stdin, brings the declared pipelines to
//! their desired state on the CI server, and writes one response document
//! to stdout. Logs go to stderr.
//!
//! Architecture:
//! - Configuration: CLI arguments plus the request's `source`
//! - Services: setter, unpauser and deleter adapters over the HTTP client
//! - Command: the reconciliation loop and version reporting

mod command;
mod config;
mod error;
mod service;
mod template;
#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::command::OutCommand;
use crate::config::Config;
use crate::service::{ConfigPipelineSetter, StandardPipelineDeleter, StandardPipelineUnpauser};
use pipeline_resource_client::{ConcourseClient, PipelineApi};
use pipeline_resource_core::dto::out::{OutRequest, OutResponse};

#[derive(Parser)]
#[command(name = "out")]
#[command(about = "Reconcile CI pipelines and report their versions", long_about = None)]
struct Cli {
    /// Directory holding the step's inputs; config and vars paths are relative to it
    sources_dir: PathBuf,

    /// Timeout in seconds for each request to the CI server
    #[arg(long, env = "PIPELINE_RESOURCE_TIMEOUT", default_value = "60")]
    timeout: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // stdout carries the response document, so logs must go elsewhere
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "pipeline_resource_out=info,pipeline_resource_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let request = read_request()?;

    let config = Config::from_source(cli.sources_dir, &request.source)?
        .with_request_timeout(Duration::from_secs(cli.timeout));
    config.validate()?;
    info!(
        "Loaded configuration: target={}, sources_dir={}",
        config.target,
        config.sources_dir.display()
    );

    let http_client = config
        .http_client()
        .context("Failed to build HTTP client")?;
    let api: Arc<dyn PipelineApi> = Arc::new(
        ConcourseClient::with_client(config.target.clone(), http_client)
            .with_credentials(&request.source.teams),
    );

    let command = OutCommand::new(
        api.clone(),
        Arc::new(ConfigPipelineSetter::new(api.clone())),
        Arc::new(StandardPipelineUnpauser::new(api.clone())),
        Arc::new(StandardPipelineDeleter::new(api)),
        config.sources_dir,
    );

    let response = match command.run(&request).await {
        Ok(response) => response,
        Err(e) => {
            error!("Out step failed ({:?}): {}", e.kind(), e);
            return Err(e.into());
        }
    };

    info!("Reporting {} pipeline version(s)", response.version.len());
    write_response(&response)
}

/// Reads and parses the request document from stdin
fn read_request() -> Result<OutRequest> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read request from stdin")?;

    serde_json::from_str(&input).context("Failed to parse request")
}

/// Writes the response document to stdout
fn write_response(response: &OutResponse) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer(&mut stdout, response).context("Failed to write response")?;
    writeln!(stdout)?;
    Ok(())
}
