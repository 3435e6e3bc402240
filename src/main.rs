//! Splay Cache - command-line entry point
//!
//! Runs one of the drivers around the cache engine: the interactive menu,
//! the two-writer concurrency demo, or the HTTP server.

use std::io;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use splay_cache::api::{create_router, AppState};
use splay_cache::cli::{run_menu, Cli, Command};
use splay_cache::tasks::run_demo;
use splay_cache::{Config, SplayTreeCache};

fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with menu output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "splay_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().with_capacity(cli.capacity);
    config.validate()?;
    info!(
        "Configuration loaded: capacity={}, port={}, worker_delay={}ms",
        config.capacity, config.server_port, config.worker_delay_ms
    );

    match cli.command() {
        Command::Interactive => interactive(&config),
        Command::Demo => demo(&config),
        Command::Serve => serve(&config),
    }
}

fn interactive(config: &Config) -> Result<()> {
    let mut cache = SplayTreeCache::new(config.capacity)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_menu(&mut cache, stdin.lock(), &mut stdout).context("interactive session failed")
}

fn demo(config: &Config) -> Result<()> {
    let snapshot = run_demo(config.capacity, config.worker_delay())?;
    println!("{}", snapshot);
    println!("Exiting program.");
    Ok(())
}

fn serve(config: &Config) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    runtime.block_on(serve_http(config))
}

async fn serve_http(config: &Config) -> Result<()> {
    let state = AppState::from_config(config)?;
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
