// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Artifact export — hands finished tool output to the user.

use std::path::PathBuf;

use fileforge_core::Artifact;
use fileforge_core::error::{FileforgeError, Result};
use tracing::{info, instrument};

/// Somewhere finished artifacts can be saved.
pub trait Exporter: Send + Sync {
    /// Save `artifact` and return where it ended up.
    fn export(&self, artifact: &Artifact) -> Result<PathBuf>;
}

/// Writes artifacts into a directory, creating it on first use.
///
/// An existing file with the same name is replaced.
#[derive(Debug, Clone)]
pub struct DirectoryExporter {
    dir: PathBuf,
}

impl DirectoryExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Exporter for DirectoryExporter {
    #[instrument(skip(self, artifact), fields(file = %artifact.file_name, size = artifact.size()))]
    fn export(&self, artifact: &Artifact) -> Result<PathBuf> {
        // Artifact names come from user input; never let one escape the directory.
        let file_name = std::path::Path::new(&artifact.file_name)
            .file_name()
            .ok_or_else(|| {
                FileforgeError::InvalidInput(format!("unusable output name '{}'", artifact.file_name))
            })?;

        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, &artifact.bytes)?;

        info!(path = %path.display(), "artifact saved");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_into_created_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let exporter = DirectoryExporter::new(tmp.path().join("out"));

        let path = exporter.export(&Artifact::new("a.pdf", b"%PDF".to_vec())).unwrap();
        assert_eq!(path, tmp.path().join("out").join("a.pdf"));
        assert_eq!(std::fs::read(path).unwrap(), b"%PDF");
    }

    #[test]
    fn strips_directories_from_names() {
        let tmp = tempfile::tempdir().unwrap();
        let exporter = DirectoryExporter::new(tmp.path());

        let path = exporter.export(&Artifact::new("../escape.txt", b"x".to_vec())).unwrap();
        assert_eq!(path, tmp.path().join("escape.txt"));
    }

    #[test]
    fn rejects_names_without_a_file_part() {
        let tmp = tempfile::tempdir().unwrap();
        let exporter = DirectoryExporter::new(tmp.path());
        assert!(exporter.export(&Artifact::new("..", Vec::new())).is_err());
    }
}
