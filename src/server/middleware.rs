//! Request logging for the JSON API

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::header::CONTENT_TYPE,
    middleware::Next,
    response::{IntoResponse, Response},
};
use log::{error, info};
use std::time::Instant;

use super::error::ApiError;
use crate::core::{truncate_with_ellipsis, LOG_LINE_LIMIT};

/// Log `/api` requests as `METHOD PATH STATUS in Nms :: <json>`.
///
/// JSON response bodies are buffered so they can be included in the line;
/// other routes pass through untouched.
pub async fn log_api_requests(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    if !path.starts_with("/api") {
        return next.run(request).await;
    }

    let method = request.method().clone();
    let started = Instant::now();
    let response = next.run(request).await;
    let elapsed = started.elapsed().as_millis();
    let status = response.status().as_u16();

    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));

    if !is_json {
        info!("{}", format_log_line(method.as_str(), &path, status, elapsed, None));
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Failed to buffer response body for {method} {path}: {e}");
            return ApiError::Internal(e.to_string()).into_response();
        }
    };

    let json = String::from_utf8_lossy(&bytes);
    info!(
        "{}",
        format_log_line(method.as_str(), &path, status, elapsed, Some(&json))
    );

    Response::from_parts(parts, Body::from(bytes))
}

/// One access-log line, cut to [`LOG_LINE_LIMIT`] characters
pub fn format_log_line(
    method: &str,
    path: &str,
    status: u16,
    elapsed_ms: u128,
    body: Option<&str>,
) -> String {
    let mut line = format!("{method} {path} {status} in {elapsed_ms}ms");
    if let Some(body) = body {
        line.push_str(" :: ");
        line.push_str(body);
    }
    truncate_with_ellipsis(&line, LOG_LINE_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_line_untouched() {
        let line = format_log_line("GET", "/api/personas/1", 200, 3, Some("[]"));
        assert_eq!(line, "GET /api/personas/1 200 in 3ms :: []");
    }

    #[test]
    fn test_line_without_body() {
        assert_eq!(
            format_log_line("POST", "/api/chat", 415, 0, None),
            "POST /api/chat 415 in 0ms"
        );
    }

    #[test]
    fn test_long_line_truncated() {
        let body = format!("{{\"reply\":\"{}\"}}", "x".repeat(200));
        let line = format_log_line("POST", "/api/chat", 200, 12, Some(&body));
        assert_eq!(line.chars().count(), LOG_LINE_LIMIT);
        assert!(line.ends_with('…'));
        assert!(line.starts_with("POST /api/chat 200 in 12ms :: {\"reply\""));
    }
}
