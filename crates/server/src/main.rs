//! Vignette server binary.

use anyhow::{Context, Result};
use clap::Parser;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vignette_core::AppConfig;
use vignette_server::{AppState, create_router};

/// Vignette - a document preview rendering server
#[derive(Parser, Debug)]
#[command(name = "vignetted")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "VIGNETTE_CONFIG",
        default_value = "config/server.toml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Vignette v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration (file is optional, env vars can provide/override
    // everything).
    let config_path = std::path::Path::new(&args.config);
    let mut figment = Figment::new();
    let has_config_file = config_path.exists();

    if has_config_file {
        tracing::info!(config_path = %args.config, "Loading configuration from file");
        figment = figment.merge(Toml::file(&args.config));
    } else {
        tracing::debug!("No config file found at {}", args.config);
    }

    let has_env_config =
        std::env::vars().any(|(key, _)| key.starts_with("VIGNETTE_") && key != "VIGNETTE_CONFIG");

    if !has_config_file && !has_env_config {
        anyhow::bail!(
            "No configuration provided.\n\n\
             Provide configuration via one of:\n  \
             1. Config file: vignetted --config /path/to/config.toml\n  \
             2. Environment variables: VIGNETTE_STORAGE__ROOT=/var/lib/vignette/documents \
             vignetted\n\n\
             Set VIGNETTE_CONFIG to specify a default config file path."
        );
    }

    let config: AppConfig = figment
        .merge(Env::prefixed("VIGNETTE_").split("__"))
        .extract()
        .context("failed to load configuration")?;

    config
        .validate()
        .context("configuration validation failed")?;

    vignette_server::metrics::register_metrics();
    tracing::info!("Prometheus metrics registered");

    let state = AppState::new(config.clone());

    // Verify the storage root before accepting requests; this catches
    // misconfiguration early instead of reporting healthy with an
    // unreadable root.
    state
        .store
        .health_check()
        .await
        .context("storage root check failed")?;
    tracing::info!(root = %state.store.root().display(), "Storage root verified");

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.server.bind))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "Listening");

    let router = create_router(state);
    axum::serve(listener, router)
        .await
        .context("server error")?;

    Ok(())
}
