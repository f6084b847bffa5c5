pub mod api;
pub mod cli;
pub mod clients;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod services;
pub mod state;

use std::sync::Arc;
use tokio::signal;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
pub use config::Config;
use state::SharedState;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;

    {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            config.validate()?;
            run_server(config).await
        }

        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("config.toml already exists.");
            }
            Ok(())
        }

        Commands::ClearCache => cli::cmd_clear_cache(&config).await,

        Commands::Saved { email } => cli::cmd_saved(&config, &email).await,

        Commands::Register {
            email,
            name,
            password,
        } => cli::cmd_register(&config, &email, &name, &password).await,
    }
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    info!("Cookbook v{} starting...", env!("CARGO_PKG_VERSION"));

    if config.spoonacular.api_key.is_empty() {
        tracing::warn!("No Spoonacular API key configured; recipe lookups will fail");
    }

    let prometheus_handle = if config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        info!("Prometheus metrics recorder initialized");
        Some(handle)
    } else {
        None
    };

    let shared = Arc::new(SharedState::new(config.clone()).await?);
    let api_state = api::create_app_state(shared.clone(), prometheus_handle);

    if config.server.enabled {
        let port = config.server.port;
        let app = api::router(api_state).await;
        let addr = format!("0.0.0.0:{port}");
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("🌐 Web Server running at http://0.0.0.0:{}", port);
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
        {
            error!("Web server error: {}", e);
        }
    } else {
        info!("Web API disabled. Press Ctrl+C to stop.");
        shutdown_signal().await;
    }

    if config.cache.clear_on_shutdown {
        match shared.clear_response_cache().await {
            Ok(removed) => info!(removed, "Response cache cleared"),
            Err(e) => error!("Failed to clear response cache: {}", e),
        }
    }

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}
