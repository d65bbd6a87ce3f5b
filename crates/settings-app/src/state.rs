// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state — reactive signals for the Dioxus UI.

use chrono::{DateTime, Local};

use settings_core::{CHANNEL_NAME, UnhandledPolicy};
use settings_core::human_errors::HumanError;

use crate::services::app_services::AppServices;

/// Outcome of one tap on "Open app settings".
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchAttempt {
    /// Whether the OS accepted the request.
    pub opened: bool,
    /// When the attempt was made (local time).
    pub at: DateTime<Local>,
    /// What to tell the user when it didn't work.
    pub problem: Option<HumanError>,
}

impl LaunchAttempt {
    /// `HH:MM:SS` of the attempt, for display.
    pub fn time_label(&self) -> String {
        self.at.format("%H:%M:%S").to_string()
    }
}

/// Shared state accessible to all components via `use_context`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Platform name reported by the native bridge.
    pub platform: String,
    /// Channel the UI talks to.
    pub channel: String,
    /// How the channel treats method names it does not route.
    pub unhandled: UnhandledPolicy,
    /// Most recent attempt, if any. Not persisted.
    pub last_attempt: Option<LaunchAttempt>,
}

impl AppState {
    /// Create initial state from the backend services.
    pub fn new(svc: &AppServices) -> Self {
        Self {
            platform: svc.platform().to_string(),
            channel: CHANNEL_NAME.to_string(),
            unhandled: svc.config().unhandled_methods,
            last_attempt: None,
        }
    }
}
