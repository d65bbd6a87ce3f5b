// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where native mobile APIs are unavailable.
//
// There is no per-app settings screen to resolve here, so every attempt
// returns `PlatformUnavailable` and the channel reports `false`.

use settings_core::error::{Result, SettingsError};

use crate::traits::*;

/// No-op bridge returned on non-mobile platforms.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl SettingsOpener for StubBridge {
    fn open_app_settings(&self) -> Result<()> {
        tracing::warn!("SettingsOpener::open_app_settings called on stub bridge");
        Err(SettingsError::PlatformUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_attempt_reports_false() {
        assert!(matches!(
            StubBridge.open_app_settings(),
            Err(SettingsError::PlatformUnavailable)
        ));
        assert!(!StubBridge.try_open_app_settings());
    }

    #[test]
    fn boxed_bridge_forwards() {
        let bridge: Box<dyn PlatformBridge> = Box::new(StubBridge);
        assert_eq!(bridge.platform_name(), "Desktop (stub)");
        assert!(!bridge.try_open_app_settings());
    }
}
