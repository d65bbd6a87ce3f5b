// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Native platform bridge for opening the app's own settings screen.
//!
//! One capability trait ([`traits::SettingsOpener`]) with an implementation
//! per target OS: Android through JNI, iOS through objc2. Desktop and CI
//! builds get a stub that always reports the platform as unavailable.

pub mod traits;

#[cfg(target_os = "ios")]
pub mod ios;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub mod stub;

pub use traits::{PlatformBridge, SettingsOpener};

/// Retrieves the bridge implementation for the target operating system.
pub fn platform_bridge() -> Box<dyn PlatformBridge> {
    #[cfg(target_os = "ios")]
    {
        // iOS: `objc2` message sends into UIKit.
        Box::new(ios::IosBridge::new())
    }
    #[cfg(target_os = "android")]
    {
        // Android: `jni` calls on the hosting Activity.
        Box::new(android::AndroidBridge::new())
    }
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        // DESKTOP/CI: no settings screen to open.
        Box::new(stub::StubBridge)
    }
}
