// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — loads config, registers the settings channel and
// gives the UI a typed way to call it.
//
// The channel registration lives inside `AppServices`, which lives for the
// whole UI session, so the handler stays bound until the app shuts down.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use tracing::{error, info};

use settings_bridge::{PlatformBridge, platform_bridge};
use settings_channel::{
    HandlerRegistration, InProcessMessenger, SettingsClient, register_settings_channel,
};
use settings_core::error::Result;
use settings_core::{AppConfig, CHANNEL_NAME};
use settings_core::human_errors::{HumanError, humanize_error};

use super::data_dir;
use crate::state::LaunchAttempt;

/// Shared application services accessible from components via
/// `use_context::<AppServices>()`.
#[derive(Clone)]
pub struct AppServices {
    client: Arc<SettingsClient<InProcessMessenger>>,
    _registration: Arc<HandlerRegistration<InProcessMessenger>>,
    config: AppConfig,
    platform: String,
    data_dir: PathBuf,
}

impl AppServices {
    /// Initialise all services. Call once at app startup, before the UI runs.
    pub fn init() -> Result<Self> {
        let dir = data_dir::data_dir();
        info!(path = %dir.display(), "initialising app services");
        Self::with_bridge(&dir, platform_bridge())
    }

    /// Initialise against an explicit data directory and native bridge.
    pub fn with_bridge(dir: &Path, bridge: Box<dyn PlatformBridge>) -> Result<Self> {
        let config = AppConfig::load_or_default(&data_dir::config_path(dir));
        let platform = bridge.platform_name().to_string();

        let messenger = Arc::new(InProcessMessenger::new());
        let registration = register_settings_channel(Arc::clone(&messenger), &config, bridge)?;
        let client = SettingsClient::new(messenger, CHANNEL_NAME);

        info!(platform = %platform, channel = CHANNEL_NAME, "app services initialised");

        Ok(Self {
            client: Arc::new(client),
            _registration: Arc::new(registration),
            config,
            platform,
            data_dir: dir.to_path_buf(),
        })
    }

    /// Ask the native side to open this app's settings screen.
    pub fn open_app_settings(&self) -> LaunchAttempt {
        let at = Local::now();
        match self.client.open_app_settings() {
            Ok(true) => LaunchAttempt {
                opened: true,
                at,
                problem: None,
            },
            Ok(false) => LaunchAttempt {
                opened: false,
                at,
                problem: Some(HumanError::settings_not_opened()),
            },
            Err(e) => {
                error!(error = %e, "settings channel call failed");
                LaunchAttempt {
                    opened: false,
                    at,
                    problem: Some(humanize_error(&e)),
                }
            }
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Human-readable platform name reported by the native bridge.
    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use settings_bridge::SettingsOpener;
    use settings_core::error::SettingsError;
    use settings_core::UnhandledPolicy;

    struct FakeBridge {
        opens: bool,
    }

    impl PlatformBridge for FakeBridge {
        fn platform_name(&self) -> &str {
            "Fake"
        }
    }

    impl SettingsOpener for FakeBridge {
        fn open_app_settings(&self) -> Result<()> {
            if self.opens {
                Ok(())
            } else {
                Err(SettingsError::Bridge("startActivity(settings): ActivityNotFoundException".into()))
            }
        }
    }

    #[test]
    fn successful_open_has_no_problem() {
        let dir = tempfile::tempdir().unwrap();
        let svc = AppServices::with_bridge(dir.path(), Box::new(FakeBridge { opens: true })).unwrap();

        let attempt = svc.open_app_settings();
        assert!(attempt.opened);
        assert!(attempt.problem.is_none());
        assert_eq!(svc.platform(), "Fake");
    }

    #[test]
    fn declined_open_explains_itself() {
        let dir = tempfile::tempdir().unwrap();
        let svc =
            AppServices::with_bridge(dir.path(), Box::new(FakeBridge { opens: false })).unwrap();

        let attempt = svc.open_app_settings();
        assert!(!attempt.opened);
        assert_eq!(attempt.problem, Some(HumanError::settings_not_opened()));
    }

    #[test]
    fn persisted_config_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            unhandled_methods: UnhandledPolicy::Drop,
        };
        config.save(&data_dir::config_path(dir.path())).unwrap();

        let svc = AppServices::with_bridge(dir.path(), Box::new(FakeBridge { opens: true })).unwrap();
        assert_eq!(svc.config(), &config);
        assert!(svc.open_app_settings().opened);
        assert_eq!(svc.data_dir(), dir.path());
    }

    #[test]
    fn stale_channel_keys_do_not_strand_the_button() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            data_dir::config_path(dir.path()),
            r#"{"app_id":"org.other","feature_name":"prefs"}"#,
        )
        .unwrap();

        let svc = AppServices::with_bridge(dir.path(), Box::new(FakeBridge { opens: true })).unwrap();
        let attempt = svc.open_app_settings();
        assert!(attempt.opened);
        assert!(attempt.problem.is_none());
    }
}
