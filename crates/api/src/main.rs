use std::net::SocketAddr;
use std::sync::Arc;

use folio_db::JsonFileStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_api::config::ServerConfig;
use folio_api::router::build_app_router;
use folio_api::service::ProjectService;
use folio_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_api=debug,folio_db=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        data_file = %config.data_file.display(),
        upload_dir = %config.upload_dir.display(),
        read_policy = ?config.read_policy,
        "Loaded server configuration"
    );

    // --- Storage bootstrap ---
    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .expect("Failed to create upload directory");

    let store = JsonFileStore::open(&config.data_file, config.read_policy)
        .await
        .expect("Failed to open record document");
    tracing::info!(path = %store.path().display(), "Record store ready");

    // --- App state ---
    let projects = Arc::new(ProjectService::new(
        Arc::new(store),
        config.upload_dir.clone(),
    ));
    let state = AppState {
        config: Arc::new(config.clone()),
        projects,
    };

    // --- Router ---
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

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
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
