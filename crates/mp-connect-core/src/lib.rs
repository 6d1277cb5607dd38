// ABOUTME: Core types and constants for the MercadoPago tenant connection service
// ABOUTME: Foundation crate with error handling, tenant models, and OAuth constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # MP Connect Core
//!
//! Foundation crate providing shared types and constants for the MercadoPago
//! tenant connection service. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Provider endpoints, callback parameters, and outcome codes
//! - **models**: Tenant records and the credential update they receive

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Tenant, `TenantId`, credential updates)
pub mod models;
