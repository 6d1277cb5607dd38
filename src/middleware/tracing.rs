// ABOUTME: Request tracing middleware for correlation and structured logging
// ABOUTME: Request ID header and per-request spans for the HTTP layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::body::Body;
use http::{HeaderName, Request};
use tracing::Span;

/// Header carrying the request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Header name for the request correlation id
#[must_use]
pub const fn request_id_header() -> HeaderName {
    HeaderName::from_static(REQUEST_ID_HEADER)
}

/// Create a tracing span for an HTTP request
///
/// Used as the `TraceLayer` span maker. The request id is set by the
/// request-id layer before the trace layer runs. The query string is
/// deliberately left out: it carries the authorization code.
pub fn create_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}
