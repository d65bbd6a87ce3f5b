// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware data directory resolution.

use std::path::{Path, PathBuf};

/// Name of the persisted config file inside the data directory.
pub const CONFIG_FILE: &str = "settings.json";

/// Return the application data directory, creating it if needed.
///
/// On mobile the process sandbox sets `HOME`, so the same lookup lands inside
/// the app container.
pub fn data_dir() -> PathBuf {
    let dir = base_dir().join("settings");
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!(path = %dir.display(), error = %e, "could not create data directory");
    }
    dir
}

/// Path of the config file inside `dir`.
pub fn config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE)
}

fn base_dir() -> PathBuf {
    // XDG data dir, then ~/.local/share, then /tmp.
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
        return PathBuf::from(xdg);
    }
    if let Some(home) = std::env::var_os("HOME") {
        return PathBuf::from(home).join(".local").join("share");
    }
    PathBuf::from("/tmp")
}
