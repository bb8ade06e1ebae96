//! Status endpoint.
//!
//! Answers every GET with the current status body. Dependency failures are
//! reported inside the body; the HTTP status is always 200.

use axum::{
    extract::State,
    http::{
        header::{CONTENT_LENGTH, CONTENT_TYPE},
        HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
};

use crate::config::CONTENT_TYPE_TEXT;
use crate::state::AppState;

/// Status handler.
///
/// Uses the startup snapshot, probes the cache and writes the fully
/// buffered body with an explicit `Content-Length`.
pub async fn status(State(state): State<AppState>) -> Response {
    let snapshot = &state.snapshot;
    let body = state.responder.render(snapshot).await;

    tracing::debug!(
        db_host = %snapshot.db_host,
        redis_host = %snapshot.redis_host,
        redis_port = snapshot.redis_port,
        bytes = body.len(),
        "Built status body"
    );

    text_response(body)
}

/// Wrap a body in a 200 plain-text response with exact length framing.
pub fn text_response(body: String) -> Response {
    let length = HeaderValue::from(body.len());
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_TEXT)),
            (CONTENT_LENGTH, length),
        ],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_response_headers() {
        let body = "infra-inception\nDB_HOST=데이터\n".to_string();
        let expected_len = body.len();
        let response = text_response(body);

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
        assert_eq!(
            response.headers().get(CONTENT_LENGTH).unwrap(),
            expected_len.to_string().as_str()
        );
    }
}
