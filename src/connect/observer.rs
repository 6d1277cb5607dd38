// ABOUTME: Result observer consuming the outcome signal left on the dashboard URL
// ABOUTME: Notifies, invokes host callbacks, and strips the signal so reloads stay quiet
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::messages::{error_message, ERROR_TITLE, SUCCESS_DESCRIPTION, SUCCESS_TITLE};
use super::{LocationHistory, Notifier, Toast};
use chrono::{DateTime, Utc};
use mp_connect_core::constants::params;
use mp_connect_core::models::Tenant;
use serde::Serialize;
use tracing::debug;
use url::Url;

/// Host hooks run after the matching notification
#[derive(Default)]
pub struct ObserverCallbacks<'a> {
    /// Typically refreshes the cached tenant so the connected flag updates
    pub on_success: Option<Box<dyn FnMut() + 'a>>,
    /// Receives the raw `mp_error` code
    pub on_error: Option<Box<dyn FnMut(&str) + 'a>>,
}

/// What a single observation handled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservedSignals {
    /// `mp_success=true` was present
    pub success: bool,
    /// Raw `mp_error` code, if present
    pub error: Option<String>,
}

impl ObservedSignals {
    /// Neither signal was on the URL
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.success && self.error.is_none()
    }
}

/// Reads and consumes the callback outcome on the current location
pub struct CallbackObserver<'a> {
    notifier: &'a dyn Notifier,
    history: &'a dyn LocationHistory,
}

impl<'a> CallbackObserver<'a> {
    /// Create an observer over the host's notifier and location
    #[must_use]
    pub fn new(notifier: &'a dyn Notifier, history: &'a dyn LocationHistory) -> Self {
        Self { notifier, history }
    }

    /// Inspect the current URL once
    ///
    /// `mp_success` counts only with the value `true`. When both signals are
    /// present, success is handled first. Handled parameters are removed with
    /// a single history replacement; other parameters are kept in order.
    pub fn observe(&self, callbacks: &mut ObserverCallbacks<'_>) -> ObservedSignals {
        let location = self.history.location();
        let mut signals = ObservedSignals::default();

        for (key, value) in location.query_pairs() {
            if key == params::MP_SUCCESS && value == params::MP_SUCCESS_VALUE {
                signals.success = true;
            } else if key == params::MP_ERROR && signals.error.is_none() && !value.is_empty() {
                signals.error = Some(value.into_owned());
            }
        }

        if signals.success {
            self.notifier
                .notify(Toast::success(SUCCESS_TITLE, SUCCESS_DESCRIPTION));
            if let Some(on_success) = callbacks.on_success.as_mut() {
                on_success();
            }
        }

        if let Some(code) = signals.error.as_deref() {
            self.notifier.notify(Toast::destructive(
                ERROR_TITLE,
                Some(error_message(code).into_owned()),
            ));
            if let Some(on_error) = callbacks.on_error.as_mut() {
                on_error(code);
            }
        }

        if !signals.is_empty() {
            debug!(success = signals.success, error = ?signals.error, "Consumed connect outcome");
            self.history.replace(strip_signals(&location, &signals));
        }

        signals
    }
}

fn strip_signals(location: &Url, signals: &ObservedSignals) -> Url {
    let kept: Vec<(String, String)> = location
        .query_pairs()
        .filter(|(key, _)| {
            !((signals.success && key == params::MP_SUCCESS)
                || (signals.error.is_some() && key == params::MP_ERROR))
        })
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut stripped = location.clone();
    if kept.is_empty() {
        stripped.set_query(None);
    } else {
        stripped.query_pairs_mut().clear().extend_pairs(kept);
    }
    stripped
}

/// Provider connection status derived from the tenant value
///
/// Recomputed on every call; nothing is cached beyond the tenant itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConnectionStatus {
    /// A non-empty access token is stored
    pub is_connected: bool,
    /// When the credentials were stored
    pub connected_at: Option<DateTime<Utc>>,
}

impl ConnectionStatus {
    /// Derive the status from the current tenant value
    #[must_use]
    pub fn from_tenant(tenant: Option<&Tenant>) -> Self {
        tenant.map_or_else(Self::default, |t| Self {
            is_connected: t.is_mercadopago_connected(),
            connected_at: t.mercadopago_connected_at,
        })
    }
}
