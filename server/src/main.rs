//! trafficwatch-server: HTTP back-end for the traffic violation dashboard.

mod commands;
mod events;
mod logging;
mod simulate;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{error, info};
use tokio::net::TcpListener;
use trafficwatch::{load_config_or_default, Config};

use crate::logging::LogFormat;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "trafficwatch-server")]
#[command(version, about = "Traffic violation dashboard back-end with a mock analysis pipeline")]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard API
    Serve {
        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,
    },

    /// Run files through the mock analysis pipeline and print the result
    Simulate {
        /// Video or image files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_format)?;
    info!("Starting trafficwatch-server v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { port, host } => serve(config, host, port).await,
        Commands::Simulate { files } => simulate::run(config, &files).await,
    }
}

async fn serve(config: Config, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    let state = Arc::new(AppState::new(config)?);
    state.start().await;

    let app = commands::router(Arc::clone(&state));
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("API server listening on {}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    state.shutdown().await;
    served?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
