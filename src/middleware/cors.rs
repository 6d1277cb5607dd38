// ABOUTME: Permissive CORS headers for the provider callback endpoint
// ABOUTME: Any origin, with the header set browser clients of the hosted datastore send
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::response::Response;
use http::header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN};
use http::HeaderValue;

/// Allowed origin for callback responses
pub const ALLOW_ORIGIN: &str = "*";

/// Request headers a browser may send on a preflighted callback request
pub const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Attach the permissive CORS headers to a response
///
/// Applied to every callback response, preflight and redirect alike, instead
/// of a `CorsLayer`: the values are fixed and the preflight must answer 200
/// with an empty body.
#[must_use]
pub fn with_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    response
}
