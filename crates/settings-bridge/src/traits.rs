// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.

use settings_core::error::Result;

/// Unified bridge that groups all native capabilities.
///
/// Implementations are zero-sized; all state lives on the native side, so
/// the bridge can be shared freely across the channel glue.
pub trait PlatformBridge: SettingsOpener + Send + Sync {
    /// Human-readable platform name (e.g. "iOS", "Android").
    fn platform_name(&self) -> &str;
}

/// Open the OS-native settings screen scoped to this application.
pub trait SettingsOpener {
    /// Make one attempt to bring the user to this app's settings page.
    ///
    /// Returns Ok(()) once the OS accepted the request. No retries.
    fn open_app_settings(&self) -> Result<()>;

    /// Same attempt, collapsed to the boolean the channel reports.
    ///
    /// Failures are logged and recovered here; they never cross the channel.
    fn try_open_app_settings(&self) -> bool {
        match self.open_app_settings() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "could not open app settings");
                false
            }
        }
    }
}

impl<T: SettingsOpener + ?Sized> SettingsOpener for Box<T> {
    fn open_app_settings(&self) -> Result<()> {
        (**self).open_app_settings()
    }
}

impl<T: SettingsOpener + ?Sized> SettingsOpener for std::sync::Arc<T> {
    fn open_app_settings(&self) -> Result<()> {
        (**self).open_app_settings()
    }
}
