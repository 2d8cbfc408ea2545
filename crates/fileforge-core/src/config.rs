// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FileforgeError;

/// Where the activity history is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryBackend {
    /// JSON file in the data directory.
    #[default]
    File,
    /// Key/value table in `history.db`.
    Sqlite,
    /// Nothing survives the process.
    Memory,
}

impl FromStr for HistoryBackend {
    type Err = FileforgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => Err(FileforgeError::InvalidOption(format!(
                "unknown history backend '{other}'"
            ))),
        }
    }
}

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Largest accepted input file, in MiB.
    pub max_file_mb: u64,
    /// Backend for the activity history.
    pub history_backend: HistoryBackend,
    /// Directory artifacts are saved into. `None` means the working directory.
    pub output_dir: Option<PathBuf>,
    /// Paper size for documents created from text or images.
    pub paper_size: crate::PaperSize,
}

impl AppConfig {
    pub fn max_file_bytes(&self) -> u64 {
        self.max_file_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_file_mb: 50,
            history_backend: HistoryBackend::File,
            output_dir: None,
            paper_size: crate::PaperSize::A4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"max_file_mb": 10}"#).unwrap();
        assert_eq!(config.max_file_mb, 10);
        assert_eq!(config.history_backend, HistoryBackend::File);
        assert_eq!(config.max_file_bytes(), 10 * 1024 * 1024);
    }

    #[test]
    fn backend_names_are_lowercase() {
        let json = serde_json::to_string(&HistoryBackend::Sqlite).unwrap();
        assert_eq!(json, "\"sqlite\"");
        assert_eq!("SQLite".parse::<HistoryBackend>().unwrap(), HistoryBackend::Sqlite);
        assert!("cloud".parse::<HistoryBackend>().is_err());
    }
}
