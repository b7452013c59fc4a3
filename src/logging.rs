//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{
        HeaderMap,
        header::{CONTENT_LENGTH, CONTENT_TYPE},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::Error;

/// The number of bytes of a body that are logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// The largest request body, other than an upload, that is read into memory for logging.
pub(crate) const MAX_BUFFERED_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
///
/// Uploaded files and downloaded CSV files are only logged by size, so
/// transaction data never ends up in the log file. Uploads are passed on
/// as a stream, leaving the upload size limit to the routes that read them.
/// Any other request body over [MAX_BUFFERED_BODY_BYTES] is rejected with
/// `413 Payload Too Large`.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();

    let body = if carries_transaction_data(&parts.headers) {
        log_request(&parts, &declared_size(&parts.headers));
        body
    } else {
        let bytes = match axum::body::to_bytes(body, MAX_BUFFERED_BODY_BYTES).await {
            Ok(bytes) => bytes,
            Err(error) => {
                tracing::warn!("Could not read request body: {error}");
                return Error::RequestTooLarge(MAX_BUFFERED_BODY_BYTES).into_response();
            }
        };
        log_request(&parts, &log_body("request", &parts.headers, &bytes));
        Body::from(bytes)
    };

    let request = Request::from_parts(parts, body);
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(body) => body,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return Response::from_parts(parts, Body::empty());
        }
    };

    log_response(&parts, &log_body("response", &parts.headers, &body));

    Response::from_parts(parts, Body::from(body))
}

/// The size of a streamed body as announced by its `Content-Length` header.
fn declared_size(headers: &HeaderMap) -> String {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .map_or_else(
            || "<streamed, unknown size>".to_owned(),
            |length| format!("<{length} bytes>"),
        )
}

fn carries_transaction_data(headers: &HeaderMap) -> bool {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    content_type.starts_with("multipart/form-data") || content_type.starts_with("text/csv")
}

/// Cut `text` to at most `limit` bytes without splitting a character.
fn truncate(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }

    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    &text[..end]
}

fn log_body(direction: &str, headers: &HeaderMap, body: &Bytes) -> String {
    if carries_transaction_data(headers) {
        return format!("<{} bytes>", body.len());
    }

    let text = String::from_utf8_lossy(body);

    if text.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::debug!("Full {direction} body: {text:?}");
        format!("{}...", truncate(&text, LOG_BODY_LENGTH_LIMIT))
    } else {
        format!("{text:?}")
    }
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    tracing::info!("Received request: {parts:#?}\nbody: {body}");
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    tracing::info!("Sending response: {parts:#?}\nbody: {body}");
}

#[cfg(test)]
mod logging_tests {
    use axum::{
        body::Bytes,
        http::{
            HeaderMap, HeaderValue,
            header::{CONTENT_LENGTH, CONTENT_TYPE},
        },
    };

    use super::{declared_size, log_body, truncate};

    #[test]
    fn truncate_keeps_whole_characters() {
        assert_eq!(truncate("Müller", 2), "M");
        assert_eq!(truncate("Müller", 3), "Mü");
        assert_eq!(truncate("abc", 10), "abc");
    }

    #[test]
    fn uploads_are_logged_by_size_only() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("multipart/form-data; boundary=X"),
        );

        let logged = log_body("request", &headers, &Bytes::from_static(b"Anna,10.00"));

        assert_eq!(logged, "<10 bytes>");
    }

    #[test]
    fn long_bodies_are_truncated() {
        let headers = HeaderMap::new();
        let body = Bytes::from("a".repeat(100));

        let logged = log_body("response", &headers, &body);

        assert_eq!(logged, format!("{}...", "a".repeat(64)));
    }

    #[test]
    fn streamed_uploads_are_logged_by_declared_size() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("1048576"));

        assert_eq!(declared_size(&headers), "<1048576 bytes>");
        assert_eq!(
            declared_size(&HeaderMap::new()),
            "<streamed, unknown size>"
        );
    }
}
