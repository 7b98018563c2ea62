//! Wearlog Companion Binary
//!
//! Starts the companion receiver that accepts log transfers from devices.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use wearlog::companion::CompanionServer;

/// Wearlog Companion
#[derive(Parser, Debug)]
#[command(name = "wearlog-companion")]
#[command(about = "Receiver for wearable log transfers")]
#[command(version)]
struct Args {
    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:9760")]
    listen: String,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wearlog=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("Wearlog Companion v{}", wearlog::VERSION);

    let server = match CompanionServer::bind(&args.listen) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", args.listen, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("Receiver error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Companion stopped");
}
