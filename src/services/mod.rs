// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Callback state machine and authorization initiation, independent of HTTP transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Route handlers stay thin: they parse the request, call into a service,
//! and turn the service result into a response. The decision logic here is
//! unit-testable without an HTTP server.

/// Callback exchanger: validation, code exchange, persistence, outcome mapping
pub mod callback;

/// OAuth flow initiation: state issuing and authorization URL construction
pub mod oauth_flow;

pub use callback::{CallbackExchanger, CallbackParams, Outcome};
