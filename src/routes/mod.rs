//! HTTP routing.
//!
//! Every GET path serves the status body. Responses are never cached, the
//! number of requests handled at once is capped, and each request runs inside
//! a span carrying its request id.

pub mod status;

use axum::{middleware, routing::get, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_STATUS;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router.
///
/// `/{*path}` does not match the root, so `/` is routed separately. Methods
/// other than GET and HEAD get the framework's 405.
pub fn create_router(state: AppState) -> Router {
    let max_in_flight = state.settings.max_concurrent_requests.max(1);

    Router::new()
        .route("/", get(status::status))
        .route("/{*path}", get(status::status))
        .with_state(state)
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_STATUS),
        ))
        // One semaphore shared by all routes
        .layer(GlobalConcurrencyLimitLayer::new(max_in_flight))
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
