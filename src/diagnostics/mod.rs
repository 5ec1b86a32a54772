// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for collecting and exporting activity reports.
//!
//! Events are captured during browsing, kept in a memory-bounded event
//! log, and exported as JSON reports for performance analysis.
//!
//! # Architecture
//!
//! - [`DiagnosticsHandle`]: cheap, cloneable sender used by UI components
//! - [`DiagnosticsCollector`]: drains the channel into an [`EventLog`]
//! - [`DiagnosticReport`]: the exported JSON document
//!
//! # Privacy
//!
//! Warning and error messages, and action details, pass through
//! [`sanitize_message`] before they are stored. File paths become `<path>`.

mod buffer;
mod collector;
mod events;
mod export;
mod report;
mod sanitizer;

pub use buffer::{BufferCapacity, EventLog};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{
    AppOperation, AppStateEvent, DiagnosticEvent, DiagnosticEventKind, ErrorEvent, UserAction,
    WarningEvent,
};
pub use export::{default_export_directory, generate_default_filename, write_atomic, ExportError};
pub use report::{DiagnosticReport, ReportMetadata, ReportSummary, SerializableEvent, SystemInfo};
pub use sanitizer::{sanitize_message, ErrorType, WarningType};
