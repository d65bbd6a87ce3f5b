// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform bridge via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. The settings screen is reached with a plain
// `startActivity` on the hosting Activity, so the call completes
// synchronously and needs no `onActivityResult` wiring.
//
// There is no `resolveActivity` pre-check: the only failure
// signal is a Java exception thrown by `startActivity` (typically
// `ActivityNotFoundException`).

#![cfg(target_os = "android")]

use jni::objects::{JObject, JString, JValue};
use jni::{JNIEnv, JavaVM};

use settings_core::error::{Result, SettingsError};
use settings_core::types::{PACKAGE_URI_SCHEME, SettingsTarget};

use crate::traits::*;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// Local references reserved for one bridge call. Everything created inside
/// the frame is released when the call returns.
const LOCAL_FRAME_CAPACITY: i32 = 16;

/// Run `f` with a [`JNIEnv`] for this thread and the hosting `Activity`.
///
/// Calls `ndk_context::android_context()` to retrieve the `JavaVM*` pointer
/// set by `android_main` or `ANativeActivity_onCreate`, then attaches the
/// current thread for the duration of the call if it is not already attached.
///
/// `f` runs inside its own JNI local frame. A thread that was already attached
/// (the UI thread) is not detached afterwards, so without the frame every
/// local ref `f` creates would stay live for the life of that thread.
fn with_activity<T>(f: impl FnOnce(&mut JNIEnv<'_>, &JObject<'_>) -> Result<T>) -> Result<T> {
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is guaranteed valid for the lifetime of the process.
    let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| SettingsError::Bridge(format!("failed to obtain JavaVM: {e}")))?;
    let mut env = vm
        .attach_current_thread()
        .map_err(|e| SettingsError::Bridge(format!("failed to attach JNI thread: {e}")))?;
    let activity = activity()?;
    env.with_local_frame(LOCAL_FRAME_CAPACITY, |env| {
        Ok::<_, jni::errors::Error>(f(env, &activity))
    })
    .map_err(|e| SettingsError::Bridge(format!("failed to push JNI local frame: {e}")))?
}

/// Obtain the current Android `Activity` as a [`JObject`].
fn activity() -> Result<JObject<'static>> {
    let ctx = ndk_context::android_context();
    let ptr = ctx.context();
    if ptr.is_null() {
        return Err(SettingsError::Bridge(
            "Android context is null — native activity not initialised".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Activity.
    Ok(unsafe { JObject::from_raw(ptr.cast()) })
}

/// Map a `jni::errors::Error` into `SettingsError::Bridge`.
///
/// A pending Java exception is described and cleared first; leaving it set
/// would make every later JNI call on this thread fail.
fn jni_err(env: &mut JNIEnv<'_>, context: &str, e: jni::errors::Error) -> SettingsError {
    if let jni::errors::Error::JavaException = e {
        if let Err(describe) = env.exception_describe() {
            tracing::debug!(error = %describe, context, "exception_describe failed");
        }
        if let Err(clear) = env.exception_clear() {
            tracing::debug!(error = %clear, context, "exception_clear failed");
        }
    }
    SettingsError::Bridge(format!("{context}: {e}"))
}

// ---------------------------------------------------------------------------
// Bridge struct
// ---------------------------------------------------------------------------

/// Android implementation of the settings bridge.
///
/// Zero-sized; all state lives on the Java side.
pub struct AndroidBridge;

impl AndroidBridge {
    /// Create a new Android bridge.
    ///
    /// This does **not** touch JNI; the first JNI call happens when a trait
    /// method is invoked.
    pub fn new() -> Self {
        Self
    }
}

impl Default for AndroidBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for AndroidBridge {
    fn platform_name(&self) -> &str {
        "Android"
    }
}

// ---------------------------------------------------------------------------
// SettingsOpener — Settings.ACTION_APPLICATION_DETAILS_SETTINGS
// ---------------------------------------------------------------------------

impl SettingsOpener for AndroidBridge {
    /// Launch the "App info" screen for this package.
    ///
    /// Equivalent to
    /// `startActivity(Intent(ACTION_APPLICATION_DETAILS_SETTINGS, Uri.fromParts("package", packageName, null)))`.
    fn open_app_settings(&self) -> Result<()> {
        with_activity(start_settings_activity)
    }
}

/// Build the settings intent for this package and start it from `activity`.
fn start_settings_activity(env: &mut JNIEnv<'_>, activity: &JObject<'_>) -> Result<()> {
    let package = package_name(env, activity)?;
    let target = SettingsTarget::application_details(&package);
    tracing::info!(%target, "Android: dispatching settings intent");

    let uri = package_uri(env, &package)?;

    let action = target
        .action()
        .ok_or_else(|| SettingsError::Bridge(format!("{target} has no intent action")))?;
    let j_action: JString = match env.new_string(action) {
        Ok(s) => s,
        Err(e) => return Err(jni_err(env, "new_string(action)", e)),
    };

    // new Intent(action, uri)
    let intent: JObject = match env.new_object(
        "android/content/Intent",
        "(Ljava/lang/String;Landroid/net/Uri;)V",
        &[JValue::Object(&j_action), JValue::Object(&uri)],
    ) {
        Ok(obj) => obj,
        Err(e) => return Err(jni_err(env, "new Intent", e)),
    };

    // activity.startActivity(intent)
    if let Err(e) = env.call_method(
        activity,
        "startActivity",
        "(Landroid/content/Intent;)V",
        &[JValue::Object(&intent)],
    ) {
        return Err(jni_err(env, "startActivity(settings)", e));
    }

    tracing::info!(package = %package, "Android: settings intent dispatched");
    Ok(())
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Read the application's package name via `activity.getPackageName()`.
fn package_name(env: &mut JNIEnv<'_>, activity: &JObject<'_>) -> Result<String> {
    let j_pkg: JObject = match env
        .call_method(activity, "getPackageName", "()Ljava/lang/String;", &[])
        .and_then(|v| v.l())
    {
        Ok(obj) => obj,
        Err(e) => return Err(jni_err(env, "getPackageName", e)),
    };

    let pkg: String = match env.get_string(&JString::from(j_pkg)) {
        Ok(s) => s.into(),
        Err(e) => return Err(jni_err(env, "get_string(packageName)", e)),
    };
    Ok(pkg)
}

/// Build `Uri.fromParts("package", package, null)`.
fn package_uri<'a>(env: &mut JNIEnv<'a>, package: &str) -> Result<JObject<'a>> {
    let j_scheme: JString = match env.new_string(PACKAGE_URI_SCHEME) {
        Ok(s) => s,
        Err(e) => return Err(jni_err(env, "new_string(scheme)", e)),
    };
    let j_package: JString = match env.new_string(package) {
        Ok(s) => s,
        Err(e) => return Err(jni_err(env, "new_string(package)", e)),
    };
    let null_fragment = JObject::null();

    match env
        .call_static_method(
            "android/net/Uri",
            "fromParts",
            "(Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;)Landroid/net/Uri;",
            &[
                JValue::Object(&j_scheme),
                JValue::Object(&j_package),
                JValue::Object(&null_fragment),
            ],
        )
        .and_then(|v| v.l())
    {
        Ok(uri) => Ok(uri),
        Err(e) => Err(jni_err(env, "Uri.fromParts", e)),
    }
}
