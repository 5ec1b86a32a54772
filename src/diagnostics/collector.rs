// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing diagnostic events.
//!
//! This module provides the central collector that receives events from
//! various parts of the application and stores them in a circular buffer.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use super::export::{default_export_directory, generate_default_filename, write_atomic, ExportError};
use super::{
    sanitize_message, AppOperation, AppStateEvent, BufferCapacity, DiagnosticEvent,
    DiagnosticEventKind, DiagnosticReport, ErrorEvent, EventLog, ReportMetadata, SerializableEvent,
    SystemInfo, UserAction, WarningEvent,
};

/// Handle for sending diagnostic events to the collector.
///
/// This handle is cheap to clone and can be shared across threads.
/// Events are sent via a bounded channel to avoid blocking the UI thread.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// Logs a user action event.
    ///
    /// This method is non-blocking and will drop the event if the
    /// internal channel is full (backpressure protection).
    pub fn log_action(&self, action: UserAction) {
        self.log_action_with_details(action, None);
    }

    /// Logs a user action event with optional details.
    ///
    /// Details are sanitized like warning and error messages.
    pub fn log_action_with_details(&self, action: UserAction, details: Option<String>) {
        let details = details.map(|d| sanitize_message(&d));
        self.send(DiagnosticEventKind::UserAction { action, details });
    }

    /// Logs a warning event. The message is sanitized to remove file paths.
    pub fn log_warning(&self, warning_event: WarningEvent) {
        let event = WarningEvent {
            message: sanitize_message(&warning_event.message),
            ..warning_event
        };
        self.send(DiagnosticEventKind::Warning { event });
    }

    /// Logs an error event. The message is sanitized to remove file paths.
    pub fn log_error(&self, error_event: ErrorEvent) {
        let event = ErrorEvent {
            message: sanitize_message(&error_event.message),
            ..error_event
        };
        self.send(DiagnosticEventKind::Error { event });
    }

    pub fn log_state(&self, state: AppStateEvent) {
        self.send(DiagnosticEventKind::AppState { state });
    }

    /// Logs an application operation event with timing.
    pub fn log_operation(&self, operation: AppOperation) {
        self.send(DiagnosticEventKind::Operation { operation });
    }

    /// Attempts to send an event, returning an error if the channel is full.
    ///
    /// # Errors
    ///
    /// Returns `TrySendError::Full` if the internal channel buffer is full,
    /// or `TrySendError::Disconnected` if the collector has been dropped.
    pub fn try_log_action(&self, action: UserAction) -> Result<(), TrySendError<DiagnosticEvent>> {
        let event = DiagnosticEvent::new(DiagnosticEventKind::UserAction {
            action,
            details: None,
        });
        self.event_tx.try_send(event)
    }

    fn send(&self, kind: DiagnosticEventKind) {
        // Non-blocking send - drop if channel is full
        let _ = self.event_tx.try_send(DiagnosticEvent::new(kind));
    }
}

/// Central collector for diagnostic events.
///
/// The collector receives events through a channel and stores them in a
/// memory-bounded circular buffer. Old events are automatically evicted
/// when the buffer reaches capacity.
pub struct DiagnosticsCollector {
    buffer: EventLog,
    event_rx: Receiver<DiagnosticEvent>,
    /// Sender stored to create handles.
    event_tx: Sender<DiagnosticEvent>,
    /// When collection started (monotonic clock for duration calculations).
    collection_started_at: Instant,
    /// When collection started (wall clock for report metadata).
    collection_started_at_utc: DateTime<Utc>,
}

impl std::fmt::Debug for DiagnosticsCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticsCollector")
            .field("len", &self.buffer.len())
            .field("capacity", &self.buffer.capacity())
            .field("collection_started_at_utc", &self.collection_started_at_utc)
            .finish_non_exhaustive()
    }
}

/// Default channel capacity for event buffering.
const DEFAULT_CHANNEL_CAPACITY: usize = 100;

impl DiagnosticsCollector {
    /// Creates a new diagnostics collector with the specified buffer capacity.
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);

        Self {
            buffer: EventLog::new(capacity),
            event_rx,
            event_tx,
            collection_started_at: Instant::now(),
            collection_started_at_utc: Utc::now(),
        }
    }

    /// Creates a handle for sending events to this collector.
    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Drains the event channel into the buffer.
    ///
    /// Call this periodically (e.g., on each UI tick).
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
        }
    }

    /// Logs an action directly to the buffer (bypassing the channel).
    pub fn log_action(&mut self, action: UserAction) {
        self.log_action_with_details(action, None);
    }

    pub fn log_action_with_details(&mut self, action: UserAction, details: Option<String>) {
        let details = details.map(|d| sanitize_message(&d));
        self.buffer
            .push(DiagnosticEvent::new(DiagnosticEventKind::UserAction { action, details }));
    }

    pub fn log_state(&mut self, state: AppStateEvent) {
        self.buffer
            .push(DiagnosticEvent::new(DiagnosticEventKind::AppState { state }));
    }

    pub fn log_operation(&mut self, operation: AppOperation) {
        self.buffer
            .push(DiagnosticEvent::new(DiagnosticEventKind::Operation { operation }));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns an iterator over all stored events (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Exports all collected events as a pretty-printed JSON report.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        self.build_report().to_json()
    }

    /// Builds a diagnostic report from the current buffer contents.
    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    #[must_use]
    pub fn build_report(&self) -> DiagnosticReport {
        let collection_duration_ms = self.collection_started_at.elapsed().as_millis() as u64;

        let events: Vec<SerializableEvent> = self
            .buffer
            .iter()
            .map(|event| {
                SerializableEvent::new(
                    event.timestamp,
                    self.collection_started_at,
                    event.kind.clone(),
                )
            })
            .collect();

        let metadata = ReportMetadata::new(
            self.collection_started_at_utc,
            collection_duration_ms,
            events.len(),
        )
        .with_evicted(self.buffer.evicted());

        DiagnosticReport::new(metadata, SystemInfo::collect(), events)
    }

    /// Writes the report to `path` atomically.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Io` if file operations fail.
    /// Returns `ExportError::Serialization` if JSON serialization fails.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let path = path.as_ref();
        let json = self.export_json()?;

        write_atomic(path, &json)?;

        Ok(path.to_path_buf())
    }

    /// Asks for a destination with a native save dialog, then exports there.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Cancelled` if the user cancels the dialog,
    /// otherwise the errors of [`Self::export_to_file`].
    pub fn export_with_dialog(&self) -> Result<PathBuf, ExportError> {
        let path = rfd::FileDialog::new()
            .set_directory(default_export_directory())
            .set_file_name(generate_default_filename())
            .add_filter("JSON", &["json"])
            .save_file()
            .ok_or(ExportError::Cancelled)?;

        self.export_to_file(&path)
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}
