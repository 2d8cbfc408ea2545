// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plain-language error messages shown when a tool cannot finish.
//
// Nothing is retried automatically; `retriable` only tells the user whether
// running the same tool again could help.

use crate::error::FileforgeError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fix the input or options and run the tool again.
    ActionRequired,
    /// Something on this machine hiccupped; running again may work.
    Transient,
    /// The file itself cannot be processed.
    Permanent,
}

/// A human-readable error with a message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    /// Whether re-running the same action could succeed.
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `FileforgeError` into a `HumanError`.
pub fn humanize_error(err: &FileforgeError) -> HumanError {
    match err {
        // -- Input validation --
        FileforgeError::InvalidInput(detail) => HumanError {
            message: "Some of the input is missing or not usable.".into(),
            suggestion: format!("Check the files and options, then try again. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        FileforgeError::FileTooLarge { name, limit_mb } => HumanError {
            message: format!("\"{name}\" is too large."),
            suggestion: format!("Files up to {limit_mb}MB are supported. Try a smaller file."),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        FileforgeError::EmptySelection => HumanError {
            message: "No pages are selected.".into(),
            suggestion: "Pick at least one page, for example \"1-3, 5\".".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        FileforgeError::InvalidOption(detail) => HumanError {
            message: "One of the options isn't recognised.".into(),
            suggestion: format!("Check the spelling of the option value. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        FileforgeError::Busy => HumanError {
            message: "Still working on the previous file.".into(),
            suggestion: "Wait for it to finish, then start the next one.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        // -- Processing --
        FileforgeError::UnsupportedDocument(detail) => HumanError {
            message: "This type of file isn't supported by this tool.".into(),
            suggestion: format!("Try converting it to PDF first. (File type: {detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        FileforgeError::Pdf(_) => HumanError {
            message: "Could not process this PDF. It may be corrupted or encrypted.".into(),
            suggestion: "Check that the file opens in a PDF viewer, or try a different file.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        FileforgeError::Image(_) => HumanError {
            message: "Could not read this image.".into(),
            suggestion: "The image may be damaged or in an unusual format. Try saving it as a JPEG or PNG first.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        FileforgeError::Task(_) => HumanError {
            message: "Something went wrong while processing this file.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        // -- Storage --
        FileforgeError::Storage(_) | FileforgeError::Database(_) => HumanError {
            message: "The activity history couldn't be saved.".into(),
            suggestion: "Your file was still produced. Check free disk space if this keeps happening.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        FileforgeError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => HumanError {
                message: "The file couldn't be found.".into(),
                suggestion: "It may have been moved or deleted. Check the path and try again.".into(),
                retriable: false,
                severity: Severity::ActionRequired,
            },
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "Permission denied while reading or writing a file.".into(),
                suggestion: "Check the file permissions, or choose a different output folder.".into(),
                retriable: false,
                severity: Severity::ActionRequired,
            },
            _ => HumanError {
                message: "There was a problem reading or writing a file.".into(),
                suggestion: "Try again. If this keeps happening, your disk may be full.".into(),
                retriable: true,
                severity: Severity::Transient,
            },
        },

        FileforgeError::Serialization(_) => HumanError {
            message: "The app had an internal data problem.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            retriable: true,
            severity: Severity::Transient,
        },
    }
}
