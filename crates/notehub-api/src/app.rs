//! Application builder: wires router, middleware, and state into an Axum
//! app and serves it.

use std::net::SocketAddr;

use axum::Router;

use notehub_core::config::AppConfig;
use notehub_core::error::{AppError, ErrorKind};
use notehub_database::StoreManager;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application over an opened store.
pub fn build_app(config: AppConfig, store: StoreManager) -> Router {
    build_router(AppState::new(config, store))
}

/// Runs the NoteHub server until Ctrl+C.
///
/// The store is owned by the caller, which closes it after this returns.
pub async fn run_server(config: AppConfig, store: StoreManager) -> Result<(), AppError> {
    let addr = config.server.bind_address();
    let app = build_app(config, store);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e))?;

    tracing::info!(address = %addr, "NoteHub server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;

    tracing::info!("NoteHub server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
