// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-specific data directory resolution.
//
// Linux/macOS: $XDG_DATA_HOME/fileforge or ~/.local/share/fileforge.
// An explicit `--data-dir` always wins.

use std::path::{Path, PathBuf};

use tracing::warn;

/// Directory holding `config.json` and the activity history.
///
/// Created if it does not exist yet; a failure to create it is logged and
/// left for the stores to report.
pub fn data_dir(override_dir: Option<&Path>) -> PathBuf {
    let dir = match override_dir {
        Some(dir) => dir.to_path_buf(),
        None => dirs_fallback().join("fileforge"),
    };
    if let Err(err) = std::fs::create_dir_all(&dir) {
        warn!(path = %dir.display(), error = %err, "could not create data directory");
    }
    dir
}

/// Fallback data directory resolution without the `dirs` crate.
fn dirs_fallback() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME")
        && !xdg.is_empty()
    {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local").join("share");
    }
    PathBuf::from("/tmp")
}
