//! Stage Tracker - Main Entry Point
//! JSON-RPC server over a SQLite application store

mod config;

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use config::{DaemonConfig, LogFormat};
use stage_tracker_api_rpc::{RpcServer, RpcServerConfig, StaticTokenIdentityProvider};
use stage_tracker_core::application::ApplicationService;
use stage_tracker_core::port::id_provider::UuidProvider;
use stage_tracker_core::port::time_provider::SystemTimeProvider;
use stage_tracker_infra_sqlite::{create_pool, run_migrations, SqliteApplicationRepository};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const LOG_FILE_PREFIX: &str = "stage-tracker.log";

/// JSON lines to the rolling file, when a log directory is configured
fn file_layer<S>(writer: Option<NonBlocking>) -> Option<impl Layer<S>>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    writer.map(|w| fmt::layer().json().with_ansi(false).with_writer(w))
}

/// Returns the appender guard; dropping it flushes and stops the file writer.
fn init_logging(config: &DaemonConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("stage_tracker=info"))
        .map_err(|e| anyhow::anyhow!("Failed to create env filter: {}", e))?;

    let (file_writer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    match config.log_format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .with(file_layer(file_writer))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .with(file_layer(file_writer))
                .init();
        }
    }

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration
    let config = DaemonConfig::from_env()?;

    // 2. Initialize logging
    let _log_guard = init_logging(&config)?;

    info!("Stage Tracker v{} starting...", VERSION);
    if let Some(dir) = &config.log_dir {
        info!(log_dir = %dir.display(), "Writing daily log files");
    }

    // 3. Initialize database
    if let Some(parent) = config.db_parent_dir() {
        tokio::fs::create_dir_all(&parent)
            .await
            .map_err(|e| anyhow::anyhow!("Cannot create {}: {}", parent.display(), e))?;
    }

    info!(db_path = %config.db_path, "Initializing database...");
    let pool = create_pool(&config.db_path)
        .await
        .map_err(|e| anyhow::anyhow!("DB pool creation failed: {}", e))?;
    run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    // 4. Setup dependencies (DI wiring)
    let repo = Arc::new(SqliteApplicationRepository::new(pool, Arc::new(UuidProvider)));
    let service = Arc::new(ApplicationService::new(repo, Arc::new(SystemTimeProvider)));

    let identities = StaticTokenIdentityProvider::from_pairs(&config.tokens)
        .map_err(|e| anyhow::anyhow!("Invalid {}: {}", config::ENV_TOKENS, e))?;
    if identities.is_empty() {
        warn!(
            "No auth tokens configured ({}); every caller is unauthenticated",
            config::ENV_TOKENS
        );
    } else {
        info!(tokens = identities.len(), "Static identity provider loaded");
    }

    // 5. Start JSON-RPC server
    info!("Starting JSON-RPC server...");
    let rpc_config = RpcServerConfig {
        host: config.rpc_host.clone(),
        port: config.rpc_port,
    };
    let (addr, rpc_handle) = RpcServer::new(rpc_config, service, Arc::new(identities))
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("RPC server start failed: {}", e))?;

    info!(addr = %addr, "System ready");
    info!("Press Ctrl+C to shutdown");

    // 6. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    // 7. Graceful shutdown
    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    rpc_handle.stopped().await;

    info!("Shutdown complete.");

    Ok(())
}
