use axum::http::{Method, StatusCode, Uri};

/// Every unsupported path or method gets the same plain text answer.
pub(crate) async fn error(method: Method, uri: Uri) -> (StatusCode, &'static str) {
    tracing::warn!("Unsupported request: {} {}", method, uri.path());
    (StatusCode::BAD_REQUEST, "ERROR")
}
