//! Telegram API monitor - metrics server
//!
//! Serves the recorder's exports, health and dashboard over HTTP

#![allow(missing_docs)]

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use telegram_api_monitor::server;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "metrics-server", version, about = "Telegram API metrics server")]
struct Args {
    /// Configuration file
    #[arg(short, long, env = "MONITOR_CONFIG")]
    config: Option<PathBuf>,

    /// Bind address, overrides the configuration
    #[arg(long)]
    host: Option<String>,

    /// Port, overrides the configuration
    #[arg(short, long)]
    port: Option<u16>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,telegram_monitoring=info"));
    if args.json_logs {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_thread_ids(false)
            .init();
    }

    let build = telegram_api_monitor::build_info();
    info!(version = build.version, git_hash = build.git_hash, "metrics-server");

    let mut config = match server::load_config(args.config.as_ref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match server::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display keeps the bind hints readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
