// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for activity tracking.
//!
//! This module defines the events captured while browsing: what the user did,
//! how the application state changed, how long the expensive operations
//! took, and the warnings and errors raised along the way.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::sanitizer::{ErrorType, WarningType};

/// User-initiated actions that can be captured for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UserAction {
    // ==========================================================================
    // Library Actions
    // ==========================================================================
    /// Open a directory (via dialog, CLI, grid or saved state).
    OpenDirectory {
        #[serde(skip_serializing_if = "Option::is_none")]
        source: Option<String>,
    },

    /// Go to the parent directory.
    NavigateUp,

    /// Re-list the current directory.
    Refresh,

    /// Change the sort key or order.
    ChangeSort,

    /// Edit the search or tag filter.
    ChangeFilter,

    /// Move the grid zoom slider.
    SetGridZoom { percent: f32 },

    // ==========================================================================
    // Focus Actions
    // ==========================================================================
    /// Focus an asset from the grid.
    FocusAsset,

    /// Show one gallery image.
    OpenGalleryImage { index: usize },

    /// Go back from a gallery image to the asset preview.
    ReturnToAsset,

    /// Step to the next asset or gallery image.
    NavigateNext,

    /// Step to the previous asset or gallery image.
    NavigatePrevious,

    CloseFocus,

    ZoomIn,

    ZoomOut,

    // ==========================================================================
    // Metadata Actions
    // ==========================================================================
    SetRating { value: u8 },

    SetHidden { hidden: bool },

    /// Save tags, notes or the gallery keyword.
    EditMetadata,

    /// Assign a category by hand; `None` returns to automatic categorization.
    SetCategory {
        #[serde(skip_serializing_if = "Option::is_none")]
        category: Option<String>,
    },

    // ==========================================================================
    // Diagnostics
    // ==========================================================================
    ExportDiagnostics,
}

/// Application state changes worth recording.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AppStateEvent {
    /// A directory listing replaced the asset snapshot.
    SnapshotReplaced { count: usize },

    /// A gallery lookup finished for the focused asset.
    GalleryLoaded { count: usize, auto_opened: bool },

    /// A gallery response arrived after focus had moved on and was dropped.
    StaleGalleryResponse { request: u64 },

    /// The focused asset disappeared from a refreshed snapshot.
    FocusLost,

    /// Settings were loaded or changed.
    ConfigApplied,
}

/// Timed operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum AppOperation {
    /// The grid rebuilt its materialized cells.
    GridRender {
        start: usize,
        end: usize,
        forced: bool,
        placeholders: usize,
        duration_ms: u64,
    },

    /// A directory was listed.
    ListAssets { count: usize, duration_ms: u64 },

    /// Gallery images were searched for an asset.
    GalleryFetch { count: usize, duration_ms: u64 },
}

/// A warning with its category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WarningEvent {
    pub warning_type: WarningType,
    /// Sanitized description.
    pub message: String,
}

impl WarningEvent {
    #[must_use]
    pub fn new(warning_type: WarningType, message: impl Into<String>) -> Self {
        Self {
            warning_type,
            message: message.into(),
        }
    }
}

/// An error with its category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorEvent {
    pub error_type: ErrorType,
    /// Sanitized description.
    pub message: String,
}

impl ErrorEvent {
    #[must_use]
    pub fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
        }
    }
}

/// A diagnostic event with timestamp.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for duration calculations)
    pub timestamp: Instant,
    /// The type and data of the event
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    UserAction {
        action: UserAction,
        /// Optional additional details (e.g., the source of a directory).
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },

    AppState {
        state: AppStateEvent,
    },

    Operation {
        operation: AppOperation,
    },

    Warning {
        event: WarningEvent,
    },

    Error {
        event: ErrorEvent,
    },
}

impl DiagnosticEventKind {
    /// Stable name of the variant, used for report summaries.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            DiagnosticEventKind::UserAction { .. } => "user_action",
            DiagnosticEventKind::AppState { .. } => "app_state",
            DiagnosticEventKind::Operation { .. } => "operation",
            DiagnosticEventKind::Warning { .. } => "warning",
            DiagnosticEventKind::Error { .. } => "error",
        }
    }
}
