// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the settings bridge.

use thiserror::Error;

/// Top-level error type for all settings-bridge operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    // -- Channel errors --
    #[error("no handler registered for channel {0}")]
    ChannelNotRegistered(String),

    #[error("channel {0} already has a handler")]
    ChannelAlreadyRegistered(String),

    #[error("method codec error: {0}")]
    Codec(String),

    // -- Call outcomes seen by the caller --
    #[error("method not implemented: {0}")]
    MethodNotImplemented(String),

    #[error("no response to method call: {0}")]
    NoResponse(String),

    #[error("remote error {code}: {message}")]
    Remote { code: String, message: String },

    #[error("unexpected result for {method}: {value}")]
    UnexpectedResult { method: String, value: String },

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SettingsError>;
