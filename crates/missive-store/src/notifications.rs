//! Notification queue: bounded, most-recent-first, caller-swept expiry.

use chrono::Utc;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::models::{NewNotification, Notification, NotificationId};
use crate::store::Store;

/// Retention cap. Adding the 101st entry drops the oldest.
pub const MAX_NOTIFICATIONS: usize = 100;

impl Store {
    /// Record a notification, assigning a fresh id, and prepend it so the
    /// queue stays most-recent-first. Retention is bounded at
    /// [`MAX_NOTIFICATIONS`]; the oldest entries are dropped beyond that.
    pub fn add_notification(&mut self, new: NewNotification) -> NotificationId {
        let notification = Notification {
            id: NotificationId::new(),
            kind: new.kind,
            title: new.title,
            body: new.body,
            timestamp: Utc::now(),
            is_read: false,
            priority: new.priority,
            expires_at: new.expires_at,
            chat_id: new.chat_id,
            message_id: new.message_id,
        };
        let id = notification.id;

        self.notifications.push_front(notification);
        self.notifications.truncate(MAX_NOTIFICATIONS);

        debug!(notification = %id, "notification added");
        id
    }

    /// The queue, most recent first.
    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Number of unread entries.
    pub fn unread_notifications(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }

    /// Mark one entry read.
    pub fn mark_notification_read(&mut self, id: NotificationId) -> Result<()> {
        let n = self
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(StoreError::NotFound)?;
        n.is_read = true;
        Ok(())
    }

    /// Mark every entry read.
    pub fn mark_all_notifications_read(&mut self) {
        for n in self.notifications.iter_mut() {
            n.is_read = true;
        }
    }

    /// Remove one entry.
    pub fn remove_notification(&mut self, id: NotificationId) -> Result<()> {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        if self.notifications.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Drop the whole queue.
    pub fn clear_notifications(&mut self) {
        self.notifications.clear();
    }

    /// Remove entries whose expiry has passed, returning how many were
    /// dropped. The store schedules nothing: the caller invokes this from
    /// its own periodic timer.
    pub fn sweep_expired(&mut self) -> usize {
        let now = Utc::now();
        let before = self.notifications.len();
        self.notifications
            .retain(|n| n.expires_at.map_or(true, |at| at > now));
        let dropped = before - self.notifications.len();
        if dropped > 0 {
            debug!(dropped, "expired notifications swept");
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NotificationKind, Priority, User};
    use chrono::Duration;

    fn simple(title: &str) -> NewNotification {
        NewNotification::simple(NotificationKind::Message, title, "body")
    }

    #[test]
    fn add_prepends_most_recent_first() {
        let mut store = Store::new(User::default());
        store.add_notification(simple("first"));
        store.add_notification(simple("second"));

        let titles: Vec<&str> = store.notifications().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[test]
    fn retention_cap_drops_oldest() {
        let mut store = Store::new(User::default());
        for i in 0..(MAX_NOTIFICATIONS + 5) {
            store.add_notification(simple(&format!("n{i}")));
        }

        assert_eq!(store.notifications().count(), MAX_NOTIFICATIONS);
        // The newest entry survives, the very first batch is gone.
        assert_eq!(store.notifications().next().unwrap().title, "n104");
        assert!(store.notifications().all(|n| n.title != "n0"));
    }

    #[test]
    fn mark_read_and_unread_count() {
        let mut store = Store::new(User::default());
        let a = store.add_notification(simple("a"));
        store.add_notification(simple("b"));
        assert_eq!(store.unread_notifications(), 2);

        store.mark_notification_read(a).unwrap();
        assert_eq!(store.unread_notifications(), 1);

        store.mark_all_notifications_read();
        assert_eq!(store.unread_notifications(), 0);
    }

    #[test]
    fn mark_unknown_is_not_found() {
        let mut store = Store::new(User::default());
        assert!(matches!(
            store.mark_notification_read(NotificationId::new()),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn remove_and_clear() {
        let mut store = Store::new(User::default());
        let a = store.add_notification(simple("a"));
        store.add_notification(simple("b"));

        store.remove_notification(a).unwrap();
        assert_eq!(store.notifications().count(), 1);
        assert!(store.remove_notification(a).is_err());

        store.clear_notifications();
        assert_eq!(store.notifications().count(), 0);
    }

    #[test]
    fn sweep_drops_only_expired() {
        let mut store = Store::new(User::default());
        let mut expired = simple("expired");
        expired.expires_at = Some(Utc::now() - Duration::minutes(1));
        let mut live = simple("live");
        live.expires_at = Some(Utc::now() + Duration::hours(1));
        store.add_notification(expired);
        store.add_notification(live);
        store.add_notification(simple("no-expiry"));

        assert_eq!(store.sweep_expired(), 1);
        assert_eq!(store.notifications().count(), 2);
        assert!(store.notifications().all(|n| n.title != "expired"));
    }
}
