// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for FileForge.

use thiserror::Error;

/// Top-level error type for all FileForge operations.
#[derive(Debug, Error)]
pub enum FileforgeError {
    // -- Input validation --
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("\"{name}\" exceeds {limit_mb}MB limit")]
    FileTooLarge { name: String, limit_mb: u64 },

    #[error("no pages selected")]
    EmptySelection,

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("another operation is already in progress")]
    Busy,

    // -- Document errors --
    #[error("unsupported document type: {0}")]
    UnsupportedDocument(String),

    #[error("PDF operation failed: {0}")]
    Pdf(String),

    #[error("image processing failed: {0}")]
    Image(String),

    #[error("processing task failed: {0}")]
    Task(String),

    // -- Storage / persistence --
    #[error("storage error: {0}")]
    Storage(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FileforgeError {
    /// Whether the error was raised before any processing started.
    ///
    /// Validation errors never leave partial side effects behind.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_)
                | Self::FileTooLarge { .. }
                | Self::EmptySelection
                | Self::InvalidOption(_)
                | Self::Busy
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, FileforgeError>;
