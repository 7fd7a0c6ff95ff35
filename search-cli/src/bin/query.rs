//! Query CLI - Searches the ranking service from the terminal.
//!
//! With query words on the command line it runs one search and exits. Without them
//! it reads one query per line from stdin until EOF or `quit`.

use std::io::Write;

use anyhow::Context;
use clap::Parser;
use search_core::{present, Config, GatewayClient, QueryInput, QueryOutcome, SearchSession};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "query", version, about = "Search the retrieval service")]
struct Args {
    /// Query text; omit to start an interactive prompt
    query: Vec<String>,

    /// Base URL of the ranking service (defaults to SEARCH_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Disable colored output
    #[arg(long, default_value_t = false)]
    no_color: bool,
}

fn print_outcome(outcome: &QueryOutcome, color: bool) {
    print!("{}", present(outcome).render(color));
}

fn prompt(input: &QueryInput, outcome: &QueryOutcome) -> anyhow::Result<()> {
    print!("\n{}> ", input.button_label(outcome).to_lowercase());
    std::io::stdout().flush()?;
    Ok(())
}

async fn interactive(session: &SearchSession<GatewayClient>, color: bool) -> anyhow::Result<()> {
    let mut input = QueryInput::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    prompt(&input, &session.outcome().await)?;
    while let Some(line) = lines.next_line().await? {
        if matches!(line.trim(), "quit" | "exit") {
            break;
        }
        input.set_text(line);

        let Some(raw) = input.submit(&session.outcome().await) else {
            continue;
        };

        if let Some(ticket) = session.begin(&raw).await {
            print_outcome(&session.outcome().await, color);
            std::io::stdout().flush()?;
            session.complete(ticket).await;
        }
        print_outcome(&session.outcome().await, color);
        prompt(&input, &session.outcome().await)?;
    }

    Ok(())
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
    info!(base_url = %config.base_url, "Using ranking service");

    let color = !args.no_color && std::env::var_os("NO_COLOR").map_or(true, |v| v.is_empty());
    let session = SearchSession::new(GatewayClient::new(config)?);

    if args.query.is_empty() {
        return interactive(&session, color).await;
    }

    let outcome = session.submit(&args.query.join(" ")).await;
    print_outcome(&outcome, color);

    if outcome.error().is_some() {
        std::process::exit(1);
    }
    Ok(())
}
