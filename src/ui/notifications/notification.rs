// SPDX-License-Identifier: MPL-2.0
//! A single toast: severity, message key with arguments, and the diagnostic
//! category recorded when it is a warning or an error.

use crate::diagnostics::{ErrorType, WarningType};
use crate::ui::design_tokens::palette;
use iced::Color;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    /// Stays until dismissed.
    Error,
}

impl Severity {
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            Severity::Success => palette::SUCCESS_500,
            Severity::Info => palette::INFO_500,
            Severity::Warning => palette::WARNING_500,
            Severity::Error => palette::ERROR_500,
        }
    }

    /// How long a toast stays on screen; `None` for errors.
    #[must_use]
    pub fn lifetime(self) -> Option<Duration> {
        match self {
            Severity::Success | Severity::Info => Some(Duration::from_secs(3)),
            Severity::Warning => Some(Duration::from_secs(5)),
            Severity::Error => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    message_key: String,
    message_args: Vec<(String, String)>,
    shown_at: Instant,
    /// How many identical notifications were folded into this one.
    repeats: u32,
    warning_type: Option<WarningType>,
    error_type: Option<ErrorType>,
}

impl Notification {
    /// `message_key` is resolved through [`super::messages`] when rendered.
    pub fn new(severity: Severity, message_key: impl Into<String>) -> Self {
        Self {
            id: NotificationId(NEXT_ID.fetch_add(1, Ordering::Relaxed)),
            severity,
            message_key: message_key.into(),
            message_args: Vec::new(),
            shown_at: Instant::now(),
            repeats: 1,
            warning_type: None,
            error_type: None,
        }
    }

    pub fn success(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Success, message_key)
    }

    pub fn info(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Info, message_key)
    }

    pub fn warning(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message_key)
    }

    pub fn error(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Error, message_key)
    }

    /// Value substituted for `{key}` in the message text.
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.message_args.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_warning_type(mut self, warning_type: WarningType) -> Self {
        self.warning_type = Some(warning_type);
        self
    }

    #[must_use]
    pub fn with_error_type(mut self, error_type: ErrorType) -> Self {
        self.error_type = Some(error_type);
        self
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    #[must_use]
    pub fn warning_type(&self) -> Option<WarningType> {
        self.warning_type
    }

    #[must_use]
    pub fn error_type(&self) -> Option<ErrorType> {
        self.error_type
    }

    #[must_use]
    pub fn repeats(&self) -> u32 {
        self.repeats
    }

    /// Resolved message text, with a repeat counter when folded.
    #[must_use]
    pub fn text(&self) -> String {
        let text = super::messages::resolve(&self.message_key, &self.message_args);
        if self.repeats > 1 {
            format!("{text} (x{})", self.repeats)
        } else {
            text
        }
    }

    /// Same severity, key and arguments.
    #[must_use]
    pub fn same_content(&self, other: &Notification) -> bool {
        self.severity == other.severity
            && self.message_key == other.message_key
            && self.message_args == other.message_args
    }

    /// Folds a repeat of this notification in and restarts its timer.
    pub(super) fn absorb(&mut self, now: Instant) {
        self.repeats = self.repeats.saturating_add(1);
        self.restart(now);
    }

    pub(super) fn restart(&mut self, now: Instant) {
        self.shown_at = now;
    }

    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        self.severity
            .lifetime()
            .is_some_and(|lifetime| now.saturating_duration_since(self.shown_at) >= lifetime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(Notification::info("a").id(), Notification::info("a").id());
    }

    #[test]
    fn errors_never_expire() {
        let later = Instant::now() + Duration::from_secs(3600);
        assert!(!Notification::error("notification-catalog-io").is_expired(later));
        assert!(Notification::success("notification-rating-saved").is_expired(later));
    }

    #[test]
    fn warnings_outlive_confirmations() {
        let now = Instant::now();
        let soon = now + Duration::from_secs(4);
        let mut saved = Notification::success("notification-rating-saved");
        let mut warning = Notification::warning("notification-config-save-error");
        saved.absorb(now);
        warning.absorb(now);
        assert!(saved.is_expired(soon));
        assert!(!warning.is_expired(soon));
    }

    #[test]
    fn text_resolves_arguments_and_repeats() {
        let mut notification = Notification::success("notification-rating-saved")
            .with_arg("name", "knight")
            .with_arg("rating", "4");
        assert_eq!(notification.text(), "knight rated 4");

        notification.absorb(Instant::now());
        assert_eq!(notification.repeats(), 2);
        assert_eq!(notification.text(), "knight rated 4 (x2)");
    }

    #[test]
    fn content_comparison_includes_arguments() {
        let a = Notification::info("notification-asset-hidden").with_arg("name", "a");
        let b = Notification::info("notification-asset-hidden").with_arg("name", "b");
        assert!(a.same_content(&a.clone()));
        assert!(!a.same_content(&b));
        let warning = Notification::warning("notification-asset-hidden").with_arg("name", "a");
        assert!(!a.same_content(&warning));
    }

    #[test]
    fn severity_colors_are_distinct() {
        let colors = [
            Severity::Success.color(),
            Severity::Info.color(),
            Severity::Warning.color(),
            Severity::Error.color(),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
