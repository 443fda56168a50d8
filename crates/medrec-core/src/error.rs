use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};

/// Contract every service error enum implements so that all services render
/// failures the same way: `{"kind": "...", "message": "..."}`.
pub trait ServiceError: std::error::Error {
    /// Stable SCREAMING_SNAKE identifier clients can match on.
    fn kind(&self) -> &'static str;

    fn status(&self) -> StatusCode;

    /// Additional top-level fields merged into the body.
    fn extra_fields(&self) -> Map<String, Value> {
        Map::new()
    }
}

/// Render a service error as a JSON response.
///
/// 5xx errors are logged with their source chain; tower-http's TraceLayer
/// already records method/uri/status for every request, so 4xx are not.
pub fn json_error_response<E: ServiceError>(err: &E) -> Response {
    let status = err.status();
    if status.is_server_error() {
        let source = std::error::Error::source(err)
            .map(|s| format!("{s:#}"))
            .unwrap_or_default();
        tracing::error!(kind = err.kind(), error = %err, %source, "request failed");
    }
    let mut body = Map::new();
    body.insert("kind".to_owned(), Value::from(err.kind()));
    body.insert("message".to_owned(), Value::from(err.to_string()));
    body.extend(err.extra_fields());
    (status, axum::Json(Value::Object(body))).into_response()
}
