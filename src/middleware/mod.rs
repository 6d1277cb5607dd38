// ABOUTME: HTTP middleware for request tracing and CORS headers
// ABOUTME: Provides request ID spans for structured logging and the callback CORS policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// CORS headers for the callback endpoint
pub mod cors;
/// Request span and request id helpers
pub mod tracing;

// CORS headers
pub use cors::with_cors_headers;

// Request tracing
pub use self::tracing::{create_request_span, request_id_header, REQUEST_ID_HEADER};
