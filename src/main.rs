//! Product search gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │                   GATEWAY                    │
//!   GET /productos    │  ┌──────────┐   ┌──────────┐   ┌──────────┐  │
//!   ──────────────────┼─▶│  layers  │──▶│  search  │──▶│ upstream │──┼──▶ Backend
//!                     │  │ id/trace │   │ handler  │   │ timeout  │  │    /productos
//!   200 body verbatim │  │ cors/tmo │   │          │   │          │  │
//!   ◀─────────────────┼──│          │◀──│ 500 JSON │◀──│          │◀─┼───
//!                     │  └──────────┘   └──────────┘   └──────────┘  │
//!                     │                                              │
//!                     │   config (toml, hot reload) · logging ·      │
//!                     │   metrics · graceful shutdown                │
//!                     └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;

use product_gateway::config::{resolve_config, ConfigOverrides};
use product_gateway::lifecycle::run_gateway;
use product_gateway::observability::logging;

#[derive(Parser)]
#[command(name = "product-gateway")]
#[command(about = "Forwards product searches to the backend data source", long_about = None)]
struct Cli {
    /// TOML configuration file; watched for changes while running.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override upstream.base_url.
    #[arg(short, long)]
    upstream: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = ConfigOverrides {
        bind_address: cli.bind,
        base_url: cli.upstream,
    };
    let config = resolve_config(cli.config.as_deref(), &overrides)?;

    logging::init(&config.observability.log_level);
    tracing::info!("product-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    run_gateway(config, cli.config, overrides).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
