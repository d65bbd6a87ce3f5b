// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages shown when the settings screen can't be opened.
//
// Every technical error is mapped to plain English with a clear suggestion.
// The severity drives how the UI presents it.

use crate::error::SettingsError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Tapping the button again may well work.
    Transient,
    /// The user has to go somewhere else (the system Settings app).
    ActionRequired,
    /// Broken build or unsupported device; retrying won't help.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone, PartialEq)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether trying again is worthwhile.
    pub retriable: bool,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

impl HumanError {
    /// Shown when the call went through but the OS declined to open settings.
    pub fn settings_not_opened() -> Self {
        Self {
            message: "We couldn't open this app's settings.".into(),
            suggestion: "Open the Settings app on your device and find this app in the list of apps.".into(),
            retriable: true,
            severity: Severity::ActionRequired,
        }
    }
}

/// Convert a `SettingsError` into a `HumanError`.
pub fn humanize_error(err: &SettingsError) -> HumanError {
    match err {
        // -- Channel wiring (a build problem, not a user problem) --
        SettingsError::ChannelNotRegistered(_)
        | SettingsError::ChannelAlreadyRegistered(_)
        | SettingsError::MethodNotImplemented(_)
        | SettingsError::UnexpectedResult { .. } => HumanError {
            message: "This part of the app isn't working.".into(),
            suggestion: "Please update the app. If that doesn't help, report the problem.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        SettingsError::Codec(detail) => HumanError {
            message: "The app sent a message it couldn't understand.".into(),
            suggestion: format!("Please report this problem. ({detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        SettingsError::NoResponse(_) => HumanError {
            message: "The app didn't answer in time.".into(),
            suggestion: "Wait a moment, then try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        SettingsError::Remote { message, .. } => HumanError {
            message: "Something went wrong opening settings.".into(),
            suggestion: format!("Try again. ({message})"),
            retriable: true,
            severity: Severity::Transient,
        },

        // -- Storage --
        SettingsError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "The app isn't allowed to save its preferences.".into(),
                    suggestion: "Check the app's storage permission in your device settings.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "Something went wrong reading or saving data.".into(),
                    suggestion: "Try again. If it keeps happening, restart the app.".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }

        SettingsError::Serialization(_) => HumanError {
            message: "Saved preferences look damaged.".into(),
            suggestion: "The app will use its defaults. Nothing else needs doing.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        // -- Platform --
        SettingsError::Bridge(_) => HumanError::settings_not_opened(),

        SettingsError::PlatformUnavailable => HumanError {
            message: "This device doesn't have an app settings screen.".into(),
            suggestion: "App settings can only be opened on a phone or tablet.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}
