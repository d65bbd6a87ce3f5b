// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the settings channel.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Application identifier used as the channel namespace.
pub const APP_ID: &str = "com.example";

/// Feature identifier appended to [`APP_ID`].
pub const FEATURE_NAME: &str = "settings";

/// Fully-qualified channel name: `"<app-id>/<feature-id>"`.
///
/// Both the registrar and every caller must use this exact byte string.
pub const CHANNEL_NAME: &str = "com.example/settings";

/// The only method the settings channel answers.
pub const METHOD_OPEN_APP_SETTING_SCREEN: &str = "openAppSettingScreen";

/// Android intent action for the per-app "App info" screen.
pub const ACTION_APPLICATION_DETAILS_SETTINGS: &str =
    "android.settings.APPLICATION_DETAILS_SETTINGS";

/// URI scheme the Android settings intent expects for its data.
pub const PACKAGE_URI_SCHEME: &str = "package";

/// Value of `UIApplicationOpenSettingsURLString` on every shipping iOS.
pub const IOS_OPEN_SETTINGS_URL: &str = "app-settings:";

/// Build a channel name from its two parts.
pub fn channel_name(app_id: &str, feature_name: &str) -> String {
    format!("{app_id}/{feature_name}")
}

/// A single cross-boundary request from the UI layer.
///
/// Consumed exactly once by the handler. Carries no identity beyond the call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    /// Ignored by the settings handler; kept so any call shape decodes.
    #[serde(rename = "args", default)]
    pub arguments: Value,
}

impl MethodCall {
    /// A call with no arguments.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: Value::Null,
        }
    }

    pub fn with_arguments(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

/// What came back across the channel for one call.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodResponse {
    /// The handler answered with a value.
    Success(Value),
    /// The handler answered with a structured error.
    Error {
        code: String,
        message: Option<String>,
        details: Value,
    },
    /// No handler exists for the method name.
    NotImplemented,
}

/// Native request that brings the user to this app's settings page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsTarget {
    /// Android: `Intent(ACTION_APPLICATION_DETAILS_SETTINGS, package:<pkg>)`.
    ApplicationDetails { package: String },
    /// iOS: the system settings URL. Scoped to the calling app by the OS.
    SettingsUrl(String),
}

impl SettingsTarget {
    pub fn application_details(package: impl Into<String>) -> Self {
        Self::ApplicationDetails {
            package: package.into(),
        }
    }

    pub fn ios_settings() -> Self {
        Self::SettingsUrl(IOS_OPEN_SETTINGS_URL.to_string())
    }

    /// Intent action, if this target is launched through an intent.
    pub fn action(&self) -> Option<&'static str> {
        match self {
            Self::ApplicationDetails { .. } => Some(ACTION_APPLICATION_DETAILS_SETTINGS),
            Self::SettingsUrl(_) => None,
        }
    }

    /// The URI handed to the OS: `package:<pkg>` or the settings URL.
    pub fn uri(&self) -> String {
        match self {
            Self::ApplicationDetails { package } => format!("{PACKAGE_URI_SCHEME}:{package}"),
            Self::SettingsUrl(url) => url.clone(),
        }
    }
}

impl std::fmt::Display for SettingsTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.action() {
            Some(action) => write!(f, "{action} {}", self.uri()),
            None => write!(f, "{}", self.uri()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_name_matches_parts() {
        assert_eq!(channel_name(APP_ID, FEATURE_NAME), CHANNEL_NAME);
    }

    #[test]
    fn android_target_uses_package_uri() {
        let target = SettingsTarget::application_details("com.example");
        assert_eq!(target.uri(), "package:com.example");
        assert_eq!(
            target.action(),
            Some("android.settings.APPLICATION_DETAILS_SETTINGS")
        );
    }

    #[test]
    fn ios_target_has_no_action() {
        let target = SettingsTarget::ios_settings();
        assert_eq!(target.action(), None);
        assert_eq!(target.to_string(), "app-settings:");
    }

    #[test]
    fn call_without_args_decodes() {
        let call: MethodCall = serde_json::from_str(r#"{"method":"openAppSettingScreen"}"#)
            .expect("decode");
        assert_eq!(call, MethodCall::new(METHOD_OPEN_APP_SETTING_SCREEN));
    }
}
