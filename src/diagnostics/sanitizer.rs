// SPDX-License-Identifier: MPL-2.0
//! Message sanitization and warning/error type definitions.
//!
//! This module provides:
//! - Type enums for categorizing warnings and errors
//! - Message sanitization that strips file paths before anything is recorded

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

// =============================================================================
// Warning and Error Type Enums
// =============================================================================

/// Categories of warnings that can occur in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningType {
    /// A requested directory does not exist.
    DirectoryNotFound,
    /// Permission was denied for an operation.
    PermissionDenied,
    /// A configuration issue was detected.
    ConfigurationIssue,
    /// Stored ratings, tags or visibility could not be read or written.
    MetadataIssue,
    /// Layout measurement failed and fallback cell sizes were used.
    GeometryFallback,
    /// Other warning type not covered by specific categories.
    Other,
}

/// Categories of errors that can occur in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Input/output error (file read/write failures).
    IoError,
    /// Listing or gallery lookup failed.
    CatalogError,
    /// Metadata store failure.
    MetadataError,
    /// Internal application error.
    InternalError,
    /// Other error type not covered by specific categories.
    Other,
}

impl From<&CatalogError> for ErrorType {
    fn from(error: &CatalogError) -> Self {
        match error {
            CatalogError::Io(_) => ErrorType::IoError,
            _ => ErrorType::CatalogError,
        }
    }
}

// =============================================================================
// Message Sanitization
// =============================================================================

/// Compiled regex patterns for path detection.
static PATH_PATTERNS: LazyLock<Regex> = LazyLock::new(|| {
    // Path continues until whitespace or common delimiters (quotes, parens, brackets)
    Regex::new(concat!(
        r#"("#,
        r#"~/[^\s"'()\[\]]+"#,                 // Home shortcut
        r#"|/[^\s"'()\[\]/]+/[^\s"'()\[\]]+"#, // Absolute Unix path with two or more segments
        r#"|[A-Za-z]:\\[^\s"'()\[\]]+"#,       // Windows drive paths (C:\, D:\, etc.)
        r#"|\\\\[^\s"'()\[\]]+"#,              // Windows UNC paths (\\server\share)
        r#")"#,
    ))
    .expect("path regex should compile")
});

/// Sanitizes a message by replacing file paths with a `<path>` placeholder.
///
/// # Examples
///
/// ```
/// use asset_lens::diagnostics::sanitize_message;
///
/// let msg = "Failed to list /home/user/models/loras";
/// assert_eq!(sanitize_message(msg), "Failed to list <path>");
///
/// let msg = "Cannot read C:\\Users\\name\\file.txt";
/// assert_eq!(sanitize_message(msg), "Cannot read <path>");
///
/// let msg = "Invalid format";
/// assert_eq!(sanitize_message(msg), "Invalid format");
/// ```
#[must_use]
pub fn sanitize_message(message: &str) -> String {
    PATH_PATTERNS.replace_all(message, "<path>").into_owned()
}
