// Skycast server entrypoint
//!
//! The heavy lifting (initialization, middleware wiring, graceful shutdown)
//! lives in dedicated modules so this file remains a thin orchestrator.

mod lifecycle;
mod logging;
mod middleware;

use anyhow::Result;
use lifecycle::{bootstrap, run};
use log::info;
use skycast_configs::ServerConfig;
use std::path::Path;

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration (fallback to defaults when config file missing)
    let config_path = "config.toml";
    let mut config = if Path::new(config_path).exists() {
        match ServerConfig::from_file(config_path) {
            Ok(cfg) => {
                eprintln!("Loaded config from: {}", config_path);
                cfg
            }
            Err(e) => {
                eprintln!("FATAL: Failed to load {}: {}", config_path, e);
                std::process::exit(1);
            }
        }
    } else {
        eprintln!("No {} found, using defaults", config_path);
        ServerConfig::default()
    };

    if let Err(e) = config.apply_env_overrides() {
        eprintln!("FATAL: Invalid environment override: {}", e);
        std::process::exit(1);
    }
    if let Err(e) = config.finalize() {
        eprintln!("FATAL: Invalid configuration: {}", e);
        std::process::exit(1);
    }

    // Logging before any other side effects
    let server_log_path = format!("{}/server.log", config.logging.logs_path);
    logging::init_logging(
        &config.logging.level,
        &server_log_path,
        config.logging.log_to_console,
        Some(&config.logging.targets),
        &config.logging.format,
    )?;

    info!("Skycast v{}", env!("CARGO_PKG_VERSION"));
    info!("Host: {}  Port: {}", config.server.host, config.server.port);

    // Build application state
    let components = bootstrap(&config).await?;

    // Run HTTP server until termination signal is received
    run(&config, components).await
}
