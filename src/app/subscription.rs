// SPDX-License-Identifier: MPL-2.0
//! Event and timer subscriptions for the application.

use super::Message;
use iced::{event, keyboard, time, Subscription};
use std::time::Duration;

/// Routes runtime events to the application.
///
/// Window events always pass through so the window id is known before the
/// first shortcut. Key presses are forwarded only when no widget captured them.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, window_id| match (&event, status) {
        (event::Event::Window(_), _)
        | (event::Event::Keyboard(keyboard::Event::KeyPressed { .. }), event::Status::Ignored) => {
            Some(Message::RawEvent {
                window: window_id,
                event: event.clone(),
            })
        }
        _ => None,
    })
}

/// Re-triggers a refresh every `interval` while a server is configured.
pub fn create_refresh_subscription(enabled: bool, interval: Duration) -> Subscription<Message> {
    if enabled {
        time::every(interval).map(Message::RefreshTick)
    } else {
        Subscription::none()
    }
}

/// Creates a periodic tick subscription for notification auto-dismiss.
pub fn create_tick_subscription(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(Duration::from_millis(100)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
