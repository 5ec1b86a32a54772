// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Native keyboard and window events are routed to the root update; frame
//! and tick subscriptions only run while there is work for them.

use super::config::NOTIFICATION_TICK_MS;
use super::Message;
use iced::{event, keyboard, time, window, Subscription};
use std::time::Duration;

/// Routes key presses not captured by a widget (the search field keeps its
/// own typing) and window resizes.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, _window_id| match event {
        event::Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size)),
        event::Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            match status {
                event::Status::Ignored => Some(Message::KeyPressed { key, modifiers }),
                event::Status::Captured => None,
            }
        }
        _ => None,
    })
}

/// Drives deferred grid renders on the next frame.
pub fn create_frame_subscription(render_pending: bool) -> Subscription<Message> {
    if render_pending {
        window::frames().map(Message::Frame)
    } else {
        Subscription::none()
    }
}

/// Creates a periodic tick subscription for notification auto-dismiss.
pub fn create_tick_subscription(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(Duration::from_millis(NOTIFICATION_TICK_MS)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
