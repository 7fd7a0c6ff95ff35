//! Status CLI - Checks that the ranking service is reachable.

use anyhow::Context;
use clap::Parser;
use search_core::{Config, GatewayClient};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "status", version, about = "Probe the retrieval service")]
struct Args {
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
    let base_url = config.base_url.clone();
    let client = GatewayClient::new(config)?;

    let info = client
        .info()
        .await
        .with_context(|| format!("Service at {} is not available", base_url))?;

    println!("{} ({})", info.message, base_url);
    if let Some(version) = &info.version {
        println!("version: {}", version);
    }
    if let Some(docs) = &info.docs {
        println!("docs: {}", docs);
    }

    Ok(())
}
