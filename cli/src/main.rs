//! Crustaceans API - CLI server
//!
//! ```sh
//! # Run with default config (~/.config/crustacea/config.toml)
//! crustacea
//!
//! # Custom config path
//! crustacea --config /etc/crustacea/config.toml
//!
//! # Override the port, skip sample data
//! crustacea --port 8080 --no-seed
//!
//! # Validate config without starting
//! crustacea --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use crustacea::config::AppConfig;
use crustacea::server::{init_tracing, ServerHandle, ServerOptions};

/// Crustaceans API - catalogue of lobsters, prawns and shrimps.
#[derive(Parser, Debug)]
#[command(
    name = "crustacea",
    version,
    about = "REST API for cataloguing crustacean species",
    long_about = "Crustaceans API: CRUD over a SQLite-backed crustacean catalogue \
                  with pagination and filtering.\n\n\
                  Default config: ~/.config/crustacea/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "CRUSTACEA_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Do not insert sample species into an empty database.
    #[arg(long)]
    no_seed: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(crustacea::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // CLI overrides land before tracing so --log-level takes effect
    cli.apply_overrides(&mut config);

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        if let Some(e) = load_error {
            eprintln!("Configuration is invalid: {}", e);
            std::process::exit(1);
        }
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.listen_address());
        println!("   Database    : {}", config.database.connection_url());
        println!("   Log level   : {}", config.logging.level);
        println!("   Seed data   : {}", config.seed.enabled && !cli.no_seed);
        return Ok(());
    }

    init_tracing(&config);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        seed: !cli.no_seed,
    })
    .await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    // Wait for shutdown signal, then clean up
    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from(["crustacea", "--port", "8080", "-l", "debug", "--no-seed"]);
        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "debug");
        assert!(cli.no_seed);
        assert!(!cli.no_migrate);
    }
}
