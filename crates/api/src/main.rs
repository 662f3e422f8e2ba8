use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tourguide_api::config::ServerConfig;
use tourguide_api::router::build_app_router;
use tourguide_api::state::AppState;
use tourguide_core::service::SceneService;
use tourguide_core::store::memory::MemorySceneStore;
use tourguide_core::store::SceneStore;
use tourguide_db::{DbConfig, PgSceneStore};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "tourguide_api=debug,tourguide_core=debug,tourguide_db=debug,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "Invalid server configuration");
            std::process::exit(1);
        }
    };
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let db_config = match DbConfig::from_env() {
        Ok(db_config) => db_config,
        Err(err) => {
            tracing::error!(error = %err, "Invalid store configuration");
            std::process::exit(1);
        }
    };

    // --- Scene store ---
    let store = match open_store(&db_config).await {
        Ok(store) => store,
        Err(err) => {
            tracing::error!(error = %err, "Failed to open scene store");
            std::process::exit(1);
        }
    };

    // --- App state ---
    let state = AppState {
        scenes: SceneService::new(Arc::clone(&store)),
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, closing scene store");
    let shutdown_timeout = Duration::from_secs(config.shutdown_timeout_secs);
    if tokio::time::timeout(shutdown_timeout, store.close())
        .await
        .is_err()
    {
        tracing::warn!(
            timeout_secs = config.shutdown_timeout_secs,
            "Timed out closing scene store"
        );
    }

    tracing::info!("Graceful shutdown complete");
}

/// Open the store selected by the connection string.
///
/// `memory://` gives a process-local store; anything else is treated as a
/// PostgreSQL URL and goes through connect-with-retry and migrations.
async fn open_store(
    db_config: &DbConfig,
) -> Result<Arc<dyn SceneStore>, tourguide_core::error::CoreError> {
    if db_config.is_memory() {
        tracing::warn!("Using in-memory scene store; data is lost on exit");
        return Ok(Arc::new(MemorySceneStore::new()));
    }
    let store = PgSceneStore::open(db_config).await?;
    Ok(Arc::new(store))
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
