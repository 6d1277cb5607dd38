// ABOUTME: Core data models shared by the exchanger, stores and observer
// ABOUTME: Re-exports tenant identity, tenant record and credential types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Tenant identity, record and MercadoPago credential attributes
pub mod tenant;

pub use tenant::{MercadoPagoCredentials, Tenant, TenantCredentialsUpdate, TenantId};
