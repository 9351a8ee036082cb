// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Manager` handles queuing, display timing, and dismissal of notifications.
//! It limits the number of visible toasts and manages auto-dismiss timers.

use super::notification::{Notification, NotificationId, Severity};
use std::collections::VecDeque;

/// Maximum number of notifications visible at once.
const MAX_VISIBLE: usize = 3;

/// Messages for notification state changes.
#[derive(Debug, Clone)]
pub enum Message {
    /// Dismiss a specific notification by ID.
    Dismiss(NotificationId),
    /// Tick for checking auto-dismiss timers.
    Tick,
}

/// Manages the notification queue and visible notifications.
#[derive(Debug, Default)]
pub struct Manager {
    /// Currently visible notifications (newest first).
    visible: VecDeque<Notification>,
    /// Queued notifications waiting to be displayed.
    queue: VecDeque<Notification>,
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a new notification to be displayed.
    ///
    /// A notification identical to one already shown or queued is dropped, so
    /// a server that stays offline across timer refreshes yields a single
    /// error toast. Warnings and errors are logged.
    pub fn push(&mut self, notification: Notification) {
        match notification.severity() {
            Severity::Warning => {
                tracing::warn!(key = notification.message_key(), "warning notification");
            }
            Severity::Error => {
                tracing::error!(key = notification.message_key(), "error notification");
            }
            Severity::Success | Severity::Info => {}
        }

        let duplicate = self
            .visible
            .iter()
            .chain(self.queue.iter())
            .any(|existing| existing.same_content(&notification));
        if duplicate {
            return;
        }

        if self.visible.len() < MAX_VISIBLE {
            self.visible.push_front(notification);
        } else {
            self.queue.push_back(notification);
        }
    }

    /// Dismisses a notification by its ID.
    ///
    /// Returns `true` if the notification was found and removed.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        if let Some(pos) = self.visible.iter().position(|n| n.id() == id) {
            self.visible.remove(pos);
            self.promote_from_queue();
            return true;
        }

        if let Some(pos) = self.queue.iter().position(|n| n.id() == id) {
            self.queue.remove(pos);
            return true;
        }

        false
    }

    /// Dismisses every visible notification whose auto-dismiss delay elapsed.
    pub fn tick(&mut self) {
        let to_dismiss: Vec<NotificationId> = self
            .visible
            .iter()
            .filter(|n| n.should_auto_dismiss())
            .map(Notification::id)
            .collect();

        for id in to_dismiss {
            self.dismiss(id);
        }
    }

    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(*id);
            }
            Message::Tick => {
                self.tick();
            }
        }
    }

    /// Returns the currently visible notifications.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether there are any notifications (visible or queued).
    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.visible.is_empty() || !self.queue.is_empty()
    }

    /// Removes every notification with the given message key.
    ///
    /// Called once a refresh succeeds so an earlier "could not load images"
    /// error does not linger.
    pub fn clear_key(&mut self, message_key: &str) {
        let visible_before = self.visible.len();
        self.visible.retain(|n| n.message_key() != message_key);
        self.queue.retain(|n| n.message_key() != message_key);

        if self.visible.len() < visible_before {
            self.promote_from_queue();
        }
    }

    fn promote_from_queue(&mut self) {
        while self.visible.len() < MAX_VISIBLE {
            if let Some(notification) = self.queue.pop_front() {
                self.visible.push_back(notification);
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_manager_is_empty() {
        let manager = Manager::new();
        assert_eq!(manager.visible_count(), 0);
        assert_eq!(manager.queued_count(), 0);
        assert!(!manager.has_notifications());
    }

    #[test]
    fn push_queues_when_visible_is_full() {
        let mut manager = Manager::new();

        for i in 0..MAX_VISIBLE {
            manager.push(Notification::success(format!("test-{i}")));
        }
        assert_eq!(manager.visible_count(), MAX_VISIBLE);
        assert_eq!(manager.queued_count(), 0);

        manager.push(Notification::success("queued"));
        assert_eq!(manager.visible_count(), MAX_VISIBLE);
        assert_eq!(manager.queued_count(), 1);
    }

    #[test]
    fn dismiss_promotes_from_queue() {
        let mut manager = Manager::new();

        let first = Notification::success("visible-0");
        let first_id = first.id();
        manager.push(first);
        for i in 1..MAX_VISIBLE {
            manager.push(Notification::success(format!("visible-{i}")));
        }
        manager.push(Notification::success("queued"));
        assert_eq!(manager.queued_count(), 1);

        assert!(manager.dismiss(first_id));
        assert_eq!(manager.visible_count(), MAX_VISIBLE);
        assert_eq!(manager.queued_count(), 0);
    }

    #[test]
    fn dismiss_nonexistent_returns_false() {
        let mut manager = Manager::new();
        let fake_id = Notification::success("temp").id();

        assert!(!manager.dismiss(fake_id));
    }

    #[test]
    fn handle_message_dismiss() {
        let mut manager = Manager::new();
        let notification = Notification::success("test");
        let id = notification.id();
        manager.push(notification);

        manager.handle_message(&Message::Dismiss(id));
        assert_eq!(manager.visible_count(), 0);
    }

    #[test]
    fn error_notifications_do_not_auto_dismiss() {
        let mut manager = Manager::new();
        let notification = Notification::error("notification-refresh-error");
        let id = notification.id();
        manager.push(notification);

        manager.tick();
        assert_eq!(manager.visible_count(), 1);

        manager.dismiss(id);
        assert_eq!(manager.visible_count(), 0);
    }

    #[test]
    fn identical_notifications_are_collapsed() {
        let mut manager = Manager::new();
        manager.push(Notification::error("notification-refresh-error"));
        manager.push(Notification::error("notification-refresh-error"));
        assert_eq!(manager.visible_count(), 1);

        manager.push(
            Notification::success("notification-delete-success").with_arg("filename", "a.png"),
        );
        manager.push(
            Notification::success("notification-delete-success").with_arg("filename", "b.png"),
        );
        assert_eq!(manager.visible_count(), 3);
    }

    #[test]
    fn clear_key_removes_only_matching_notifications() {
        let mut manager = Manager::new();
        manager.push(Notification::error("notification-refresh-error"));
        manager.push(Notification::error("notification-delete-error"));
        manager.push(Notification::success("notification-reset-success"));
        manager.push(Notification::warning("notification-config-load-error"));
        assert_eq!(manager.queued_count(), 1);

        manager.clear_key("notification-refresh-error");

        assert_eq!(manager.visible_count(), 3);
        assert_eq!(manager.queued_count(), 0);
        assert!(manager
            .visible()
            .all(|n| n.message_key() != "notification-refresh-error"));
    }
}
