// ABOUTME: Localized (Spanish) notification text for the connect flow
// ABOUTME: Success, configuration error, and the outcome code to message table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use mp_connect_core::constants::error_codes;
use std::borrow::Cow;

/// Success toast title
pub const SUCCESS_TITLE: &str = "MercadoPago conectado";
/// Success toast body
pub const SUCCESS_DESCRIPTION: &str = "Cuenta vinculada correctamente.";
/// Title of every outcome error toast
pub const ERROR_TITLE: &str = "Error al conectar MercadoPago";
/// Title shown when the initiator is missing a setting
pub const CONFIG_ERROR_TITLE: &str = "Error de configuración";

/// Human-readable message for an `mp_error` code
///
/// Provider codes passed through verbatim fall back to `Error: <code>`.
#[must_use]
pub fn error_message(code: &str) -> Cow<'static, str> {
    match code {
        error_codes::MISSING_PARAMS => Cow::Borrowed("Parámetros faltantes"),
        error_codes::TOKEN_EXCHANGE_FAILED => Cow::Borrowed("Error al obtener tokens"),
        error_codes::DB_UPDATE_FAILED => Cow::Borrowed("Error al guardar credenciales"),
        error_codes::INVALID_STATE => Cow::Borrowed("Estado de autorización inválido"),
        other => Cow::Owned(format!("Error: {other}")),
    }
}
