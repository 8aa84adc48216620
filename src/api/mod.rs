//! JSON API for a UI collaborator.
//!
//! Provides two endpoints:
//! - `POST /estimate` — evaluate a system input into a full estimate
//! - `GET /catalog` — panel and weather catalogs for populating selectors

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::estimator::Estimator;

/// Immutable application state shared across all request handlers.
///
/// The estimator is stateless and the catalogs are constants, so the state
/// is wrapped in `Arc` with no locks.
pub struct AppState {
    /// The configured estimator serving all requests.
    pub estimator: Estimator,
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/estimate", post(handlers::post_estimate))
        .route("/catalog", get(handlers::get_catalog))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `addr` - Socket address to bind to
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
