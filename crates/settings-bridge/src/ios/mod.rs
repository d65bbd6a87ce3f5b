// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// iOS platform bridge via objc2.
//
// Requires compilation with the iOS SDK (Xcode). The settings screen is
// reached by opening `UIApplicationOpenSettingsURLString`, which the OS scopes
// to the calling app's bundle.
//
// All UIKit interactions require the main thread; calling off-main returns
// `SettingsError::Bridge`.
//
// Unlike Android, the URL is checked with `canOpenURL:` before opening it.
// An Objective-C exception raised by `openURL:options:completionHandler:` is
// caught and reported as a bridge error.

#![cfg(target_os = "ios")]

use std::panic::AssertUnwindSafe;

use objc2::MainThreadMarker;
use objc2::rc::Retained;
use objc2::runtime::AnyObject;
use objc2_foundation::{NSDictionary, NSString, NSURL};
use objc2_ui_kit::UIApplication;

use settings_core::error::{Result, SettingsError};
use settings_core::types::SettingsTarget;

use crate::traits::*;

// ---------------------------------------------------------------------------
// UIKit constants
// ---------------------------------------------------------------------------

unsafe extern "C" {
    /// `UIApplication.openSettingsURLString`. Linked from UIKit.
    static UIApplicationOpenSettingsURLString: &'static NSString;
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Assert that we are on the main thread and return the marker.
fn require_main_thread() -> Result<MainThreadMarker> {
    MainThreadMarker::new()
        .ok_or_else(|| SettingsError::Bridge("must be called from the main thread".into()))
}

/// Build the settings `NSURL` from the UIKit constant.
fn settings_url() -> Result<(SettingsTarget, Retained<NSURL>)> {
    // SAFETY: UIKit exports this constant as an immutable, process-lifetime
    // `NSString *`; reading it has no side effects.
    let url_string: &NSString = unsafe { UIApplicationOpenSettingsURLString };
    let target = SettingsTarget::SettingsUrl(url_string.to_string());
    let url = NSURL::URLWithString(url_string)
        .ok_or_else(|| SettingsError::Bridge(format!("invalid settings URL {target}")))?;
    Ok((target, url))
}

// ---------------------------------------------------------------------------
// IosBridge
// ---------------------------------------------------------------------------

/// Concrete iOS platform bridge.
///
/// Must be driven from the main thread.
pub struct IosBridge;

impl IosBridge {
    /// Create a new iOS bridge instance.
    pub fn new() -> Self {
        Self
    }
}

impl Default for IosBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for IosBridge {
    fn platform_name(&self) -> &str {
        "iOS"
    }
}

// ---------------------------------------------------------------------------
// SettingsOpener -- UIApplication openURL:
// ---------------------------------------------------------------------------

impl SettingsOpener for IosBridge {
    /// Open this app's page in the Settings app.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Bridge` if not called from the main thread, if
    /// the settings URL can't be built or resolved, or if UIKit raises while
    /// opening it.
    fn open_app_settings(&self) -> Result<()> {
        let mtm = require_main_thread()?;
        let app = UIApplication::sharedApplication(mtm);
        let (target, url) = settings_url()?;

        // SAFETY: canOpenURL: is a documented UIApplication method; the
        // main-thread requirement is satisfied by require_main_thread() above.
        let resolvable = unsafe { app.canOpenURL(&url) };
        if !resolvable {
            return Err(SettingsError::Bridge(format!(
                "canOpenURL: reported {target} as unresolvable"
            )));
        }

        tracing::info!(%target, "iOS: opening settings URL");

        let options = NSDictionary::<NSString, AnyObject>::new();
        // SAFETY: openURL:options:completionHandler: with an empty options
        // dictionary and no completion block. Main thread confirmed above.
        // `catch` turns an Objective-C exception into an Err instead of
        // unwinding through Rust frames.
        let opened = unsafe {
            objc2::exception::catch(AssertUnwindSafe(|| {
                app.openURL_options_completionHandler(&url, &options, None)
            }))
        };
        opened.map_err(|exception| {
            SettingsError::Bridge(format!("openURL raised {exception:?}"))
        })?;

        tracing::info!(%target, "iOS: settings URL opened");
        Ok(())
    }
}
