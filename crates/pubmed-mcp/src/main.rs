//! PubMed MCP Server - Entry Point
//!
//! Speaks MCP over stdin/stdout; logs go to stderr.

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pubmed_mcp::{config::Config, server::McpServer};

#[derive(Parser, Debug)]
#[command(name = "pubmed-mcp")]
#[command(about = "MCP server for PubMed via NCBI E-utilities")]
#[command(version)]
struct Cli {
    /// NCBI API key (optional, enables higher rate limits)
    #[arg(long, env = "NCBI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // stdout is reserved for JSON-RPC responses.
    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let config = Config::new(cli.api_key);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        has_api_key = config.has_api_key(),
        "Starting PubMed MCP server"
    );

    let server = McpServer::from_config(&config)?;
    server.run_stdio().await?;

    Ok(())
}
