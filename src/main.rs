//! BizAnalystics Page Host
//!
//! Run with: cargo run --bin bizanalytics
//!
//! Serves the built UI for `/`, `/login/` and `/dashboard/`. Settings come
//! from the config file (see `bizanalytics-cli config`), then `BIZ_*`
//! environment variables, then the flags below.

use std::path::PathBuf;

use anyhow::Context;
use bizanalytics::config::Config;
use bizanalytics::{logging, server};
use clap::Parser;

#[derive(Parser)]
#[command(name = "bizanalytics")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Serve the BizAnalystics pages")]
struct Args {
    /// Config file (default: search the standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory holding the built UI
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(dir) = args.static_dir {
        config.server.static_dir = dir;
    }

    logging::init(&config.logging).context("installing log subscriber")?;

    tracing::info!("BizAnalystics page host v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Static directory: {:?}", config.server.static_dir);
    tracing::info!("Backend API: {}", config.api.base_url);

    server::serve(config.server).await?;
    Ok(())
}
