// SPDX-License-Identifier: MPL-2.0
//! Toast stack.
//!
//! Notifications are kept oldest first and only the first [`MAX_VISIBLE`]
//! are shown; the rest wait for a slot. A notification identical to one
//! already waiting or shown is folded into it, so a directory that keeps
//! failing to list produces one toast with a counter instead of a column.

use super::notification::{Notification, NotificationId, Severity};
use crate::diagnostics::{DiagnosticsHandle, ErrorEvent, ErrorType, WarningEvent, WarningType};
use std::collections::VecDeque;
use std::time::Instant;

pub const MAX_VISIBLE: usize = 3;

/// Message keys of listing failures.
const CATALOG_ERROR_PREFIX: &str = "notification-catalog-";

#[derive(Debug, Clone)]
pub enum Message {
    Dismiss(NotificationId),
    Tick,
}

#[derive(Debug, Default)]
pub struct Manager {
    entries: VecDeque<Notification>,
    diagnostics: Option<DiagnosticsHandle>,
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Warnings and errors pushed after this are also recorded as
    /// diagnostic events.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    pub fn push(&mut self, notification: Notification) {
        self.push_at(notification, Instant::now());
    }

    fn push_at(&mut self, notification: Notification, now: Instant) {
        self.record(&notification);
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.same_content(&notification))
        {
            Some(existing) => existing.absorb(now),
            None => self.entries.push_back(notification),
        }
    }

    fn record(&self, notification: &Notification) {
        let Some(handle) = &self.diagnostics else {
            return;
        };
        match notification.severity() {
            Severity::Warning => handle.log_warning(WarningEvent::new(
                notification.warning_type().unwrap_or(WarningType::Other),
                notification.text(),
            )),
            Severity::Error => handle.log_error(ErrorEvent::new(
                notification.error_type().unwrap_or(ErrorType::Other),
                notification.text(),
            )),
            Severity::Success | Severity::Info => {}
        }
    }

    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => self.dismiss(*id),
            Message::Tick => self.expire(Instant::now()),
        }
    }

    pub fn dismiss(&mut self, id: NotificationId) {
        let Some(position) = self.entries.iter().position(|entry| entry.id() == id) else {
            return;
        };
        self.entries.remove(position);
        if position < MAX_VISIBLE {
            self.start_timers(MAX_VISIBLE - 1, Instant::now());
        }
    }

    /// Drops shown toasts whose time is up. A waiting toast's timer starts
    /// when it moves into view.
    fn expire(&mut self, now: Instant) {
        let mut shown = 0;
        let mut kept = 0;
        self.entries.retain(|entry| {
            if shown >= MAX_VISIBLE {
                return true;
            }
            shown += 1;
            let keep = !entry.is_expired(now);
            kept += usize::from(keep);
            keep
        });
        self.start_timers(kept, now);
    }

    /// Restarts the timers of shown toasts from position `from` on.
    fn start_timers(&mut self, from: usize, now: Instant) {
        for entry in self.entries.iter_mut().take(MAX_VISIBLE).skip(from) {
            entry.restart(now);
        }
    }

    /// Drops listing failures once a listing succeeds.
    pub fn clear_catalog_errors(&mut self) {
        self.entries
            .retain(|entry| !entry.message_key().starts_with(CATALOG_ERROR_PREFIX));
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter().take(MAX_VISIBLE)
    }

    #[must_use]
    pub fn waiting(&self) -> usize {
        self.entries.len().saturating_sub(MAX_VISIBLE)
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.entries.is_empty()
    }
}
