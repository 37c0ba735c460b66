mod error;
mod pages;
mod routes;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use unlocked_core::{DEFAULT_SHARE_BASE, Unlocker, load_config};

use routes::{AppState, create_app};

/// Web front end for exporting Medium articles through a freedium mirror
#[derive(Parser, Debug)]
#[command(name = "unlocked-server")]
#[command(version)]
#[command(about = "Serve the article export form, downloads and JSON API", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "UNLOCKED_BIND", default_value = "127.0.0.1:8080")]
    bind: String,

    /// Front end that share links point at
    #[arg(long, env = "UNLOCKED_SHARE_BASE", default_value = DEFAULT_SHARE_BASE)]
    share_base: String,

    /// Configuration file (default: the user config directory)
    #[arg(long, env = "UNLOCKED_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    info!(mirror = %config.mirror.base_url, timeout = config.fetch.timeout, "configuration loaded");

    let app = create_app(AppState { unlocker: Unlocker::with_config(config), share_base: args.share_base });

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    info!(address = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}
