//! HTTP server startup logic.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum_server::Handle;

use crate::config::{ServiceSettings, SHUTDOWN_GRACE_SECS};

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("Failed to bind or serve: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse the configured host and port into a socket address.
pub fn parse_bind_addr(settings: &ServiceSettings) -> Result<SocketAddr, ServerError> {
    let raw = settings.bind_addr();
    raw.parse::<SocketAddr>()
        .map_err(|e| ServerError::InvalidAddress(format!("{raw}: {e}")))
}

/// Start the HTTP server with signal handling installed.
///
/// This function blocks until the server shuts down.
pub async fn start_server(app: Router, settings: &ServiceSettings) -> Result<(), ServerError> {
    let addr = parse_bind_addr(settings)?;
    let handle = Handle::new();

    shutdown::setup_shutdown_handler(handle.clone(), Duration::from_secs(SHUTDOWN_GRACE_SECS));

    serve(app, addr, handle).await
}

/// Serve `app` on `addr` until `handle` is shut down.
///
/// Each accepted connection runs on its own task. The handle also reports the
/// bound address, which matters when binding port 0.
pub async fn serve(app: Router, addr: SocketAddr, handle: Handle) -> Result<(), ServerError> {
    tracing::info!(%addr, "Starting HTTP server");

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service_with_connect_info::<SocketAddr>())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}
