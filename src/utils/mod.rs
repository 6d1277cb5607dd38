// ABOUTME: Utility module with shared helpers used across the service
// ABOUTME: Currently hosts the pooled HTTP client factory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Shared HTTP client construction for outbound provider and datastore calls
pub mod http_client;
