//! ppov-api - Period poverty analytics service
//!
//! Serves basket CRUD, read-only dataset endpoints and derived affordability
//! metrics over HTTP. `ppov-api seed` loads the processed CSV datasets.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ppov_common::config::{resolve_config_path, resolve_database_path, Config, ConfigSource};
use ppov_common::db::init_database;
use ppov_api::{build_router, seed, AppState};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for ppov-api
#[derive(Parser, Debug)]
#[command(name = "ppov-api")]
#[command(about = "Period poverty analytics API")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "PPOV_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(short, long, env = "PPOV_DATABASE")]
    database: Option<PathBuf>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long, env = "PPOV_PORT")]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Load the CPI, PIP and hygiene CSV files into the database
    Seed {
        /// Directory containing the processed CSV files
        #[arg(long, default_value = "data/processed")]
        data_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config sets the log level, so its source is logged after tracing init
    let config_path = resolve_config_path(args.config.as_deref());
    let (mut config, config_source) = match &config_path {
        Some(path) => Config::load_with_source(path).context("Failed to load configuration")?,
        None => (Config::default(), ConfigSource::Defaults),
    };
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "ppov_api={level},ppov_common={level},tower_http={level}",
                    level = config.logging.level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting ppov-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    config_source.log();

    let db_path = resolve_database_path(args.database.as_deref(), &config);
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path)
        .await
        .context("Failed to initialize database")?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Seed { data_dir } => {
            let summary = seed::seed_from_dir(&pool, &data_dir)
                .await
                .with_context(|| format!("Failed to seed from {}", data_dir.display()))?;
            info!("Seed summary: {:?}", summary);
            Ok(())
        }
        Command::Serve => serve(pool, config).await,
    }
}

async fn serve(pool: sqlx::SqlitePool, config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server host/port")?;

    let state = AppState::new(pool, config).context("Invalid analytics configuration")?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("ppov-api listening on http://{}", addr);
    info!("Health check: http://{}/v1/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        },
    }
}
