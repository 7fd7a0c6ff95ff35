//! Ingest CLI - Uploads a dataset file to the ranking service.
//!
//! The service answers with an ingestion report, which is printed as returned.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use search_core::{Config, GatewayClient, SearchGateway, Upload};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ingest", version, about = "Upload a dataset to the retrieval service")]
struct Args {
    /// File to upload (the service expects CSV)
    file: PathBuf,

    /// Base URL of the ranking service (defaults to SEARCH_API_URL)
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(api_url) = &args.api_url {
        config = config.with_base_url(api_url)?;
    }
    let client = GatewayClient::new(config)?;

    let upload = Upload::from_path(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let report = match client.ingest(upload).await {
        Ok(report) => report,
        Err(e) => {
            error!("Ingestion failed: {}", e);
            return Err(e).context("Ingestion failed");
        }
    };

    if let (Some(documents), Some(chunks)) = (report.num_documents(), report.num_chunks()) {
        info!(documents, chunks, cost = ?report.cost(), "Ingestion completed");
        println!("Ingested {} documents into {} chunks", documents, chunks);
    }
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
