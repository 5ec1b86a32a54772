// SPDX-License-Identifier: MPL-2.0
//! Toasts reporting outcomes the user did not wait on: failed listings,
//! saved ratings, settings that could not be written.
//!
//! Confirmations fade after a few seconds, warnings a little later, and
//! errors stay until dismissed. Warnings and errors are also recorded in
//! the diagnostics buffer.

mod manager;
pub mod messages;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, Severity};
pub use toast::overlay;
