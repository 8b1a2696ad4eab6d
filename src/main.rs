//! Tour booking service: headless REST API server.
//!
//! ```sh
//! # Run with default config (~/.config/tour-booking/config.toml)
//! tour-booking
//!
//! # Custom config path and port
//! tour-booking --config /etc/tour-booking/config.toml --port 8080
//!
//! # Validate config without starting
//! tour-booking --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use tour_booking::server::{init_tracing, ServerHandle, ServerOptions};
use tour_booking::AppConfig;

/// Reservation and ledger backend for tour packages.
#[derive(Parser, Debug)]
#[command(name = "tour-booking", version, about)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "TOUR_BOOKING_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .unwrap_or_else(tour_booking::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            // Nothing is served with a broken config
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.address());
        println!("   Database    : {}", config.database.url);
        println!("   Payments    : {:?} ({})", config.payment.provider, config.payment.currency);
        println!("   Settlement  : {:?}", config.payment.settlement_mode);
        println!("   Uploads     : {}", config.storage.uploads_dir.display());
        return Ok(());
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    let handle = match ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await
    {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start: {}", e);
            return Err(e);
        }
    };

    handle.install_signal_handler();
    info!("Press Ctrl+C to shut down gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;
    Ok(())
}
