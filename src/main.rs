//! AuthHub server: user authentication and account management.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use authhub_api::{StateBuilder, build_app};
use authhub_auth::SessionSweeper;
use authhub_cache::CacheManager;
use authhub_core::config::{AppConfig, LogFormat};
use authhub_core::error::AppError;
use authhub_core::traits::cache::CacheProvider;
use authhub_database::migration::run_migrations;
use authhub_database::repositories::{TokenRepository, UserRepository};
use authhub_database::{DatabasePool, SessionRegistry, SessionWindows, UserStore};
use authhub_worker::{CronScheduler, SweepJob};

#[tokio::main]
async fn main() {
    let env = std::env::var("AUTHHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging. `RUST_LOG` overrides the configured level.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting AuthHub v{}", env!("CARGO_PKG_VERSION"));

    // Database
    let database = DatabasePool::connect(&config.database).await?;
    database.ping().await?;
    if config.database.run_migrations {
        run_migrations(database.pool()).await?;
    }

    // Verification-code cache
    let cache = CacheManager::new(&config.cache).await?;
    if !cache.health_check().await? {
        return Err(AppError::cache("Cache backend is not responding"));
    }

    // Stores
    let windows = SessionWindows::from_config(&config.session);
    let users: Arc<dyn UserStore> = Arc::new(UserRepository::new(database.pool().clone()));
    let registry: Arc<dyn SessionRegistry> =
        Arc::new(TokenRepository::new(database.pool().clone(), windows));

    // Background sweep
    let mut scheduler = if config.session.sweep_enabled {
        let scheduler = CronScheduler::new().await?;
        let job = SweepJob::new(SessionSweeper::new(registry.clone()));
        scheduler
            .register_session_sweep(&config.session.sweep_schedule, job)
            .await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Session sweep disabled");
        None
    };

    // HTTP
    let state = StateBuilder::new(config.clone(), users, registry, cache).build()?;
    let app = build_app(state);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("AuthHub server listening on {addr}");

    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());
    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("HTTP server stopped, shutting down background tasks");

    if let Some(scheduler) = scheduler.as_mut() {
        match tokio::time::timeout(grace, scheduler.shutdown()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!(error = %e, "Scheduler shutdown failed"),
            Err(_) => tracing::warn!("Scheduler did not stop within the grace period"),
        }
    }
    database.close().await;

    tracing::info!("AuthHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
