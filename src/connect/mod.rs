// ABOUTME: Browser-session side of the connect flow behind host-supplied traits
// ABOUTME: Authorization initiator, result observer, and their notification/navigation seams
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Browser-side connect flow
//!
//! The initiator sends the browser to the provider's consent page; the
//! observer reads the outcome signal the callback left on the dashboard URL.
//! Toasts, navigation and history manipulation are host concerns and are
//! reached through [`Notifier`], [`Navigator`] and [`LocationHistory`].

/// Provider consent redirect
pub mod initiator;
/// Notification text
pub mod messages;
/// Outcome signal handling on the return leg
pub mod observer;

pub use initiator::AuthorizationInitiator;
pub use observer::{CallbackObserver, ConnectionStatus, ObservedSignals, ObserverCallbacks};

use url::Url;

/// Visual weight of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastVariant {
    /// Neutral styling, used for success
    #[default]
    Default,
    /// Error styling
    Destructive,
}

/// A user-visible notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Headline
    pub title: String,
    /// Optional body text
    pub description: Option<String>,
    /// Visual weight
    pub variant: ToastVariant,
}

impl Toast {
    /// Neutral notification
    #[must_use]
    pub fn success(title: &str, description: &str) -> Self {
        Self {
            title: title.to_owned(),
            description: Some(description.to_owned()),
            variant: ToastVariant::Default,
        }
    }

    /// Destructive notification
    #[must_use]
    pub fn destructive(title: &str, description: Option<String>) -> Self {
        Self {
            title: title.to_owned(),
            description,
            variant: ToastVariant::Destructive,
        }
    }
}

/// Shows notifications to the user
pub trait Notifier {
    /// Display `toast`
    fn notify(&self, toast: Toast);
}

/// Full-page navigation
pub trait Navigator {
    /// Replace the current page with `url`, adding a history entry
    fn assign(&self, url: &Url);
}

/// Access to the current location and its history entry
pub trait LocationHistory {
    /// Current URL
    fn location(&self) -> Url;

    /// Swap the current URL without pushing a new history entry
    fn replace(&self, url: Url);
}
