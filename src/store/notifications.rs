use crate::models::Notification;
use crate::store::push_front_capped;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default cap of the notification inbox.
pub const NOTIFICATION_CAP: usize = 100;

/// Notification inbox, most recent first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationState {
    /// Notifications, most recent first.
    pub items: Vec<Notification>,
    /// Number of unread items; kept in sync with `items`.
    pub unread_count: usize,
    /// Maximum number of items kept.
    pub cap: usize,
    /// Ids of the built-in notifications every user sees.
    #[serde(skip)]
    pub shared_ids: BTreeSet<String>,
}

impl Default for NotificationState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            unread_count: 0,
            cap: NOTIFICATION_CAP,
            shared_ids: BTreeSet::new(),
        }
    }
}

impl NotificationState {
    /// Create an empty inbox with the given cap.
    pub fn with_cap(cap: usize) -> Self {
        Self {
            cap,
            ..Self::default()
        }
    }

    /// Add the built-in notifications, given newest first.
    pub fn seed(&mut self, notifications: Vec<Notification>) {
        for notification in notifications.into_iter().rev() {
            self.shared_ids.insert(notification.id.clone());
            self.add(notification);
        }
    }

    /// Insert at the head, dropping the oldest items beyond the cap.
    pub fn add(&mut self, notification: Notification) -> bool {
        if self.items.iter().any(|n| n.id == notification.id) {
            return false;
        }
        push_front_capped(&mut self.items, notification, self.cap);
        self.recount();
        true
    }

    /// Mark one notification read. Returns whether it was unread.
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(n) if !n.is_read => {
                n.is_read = true;
                self.unread_count = self.unread_count.saturating_sub(1);
                true
            }
            _ => false,
        }
    }

    /// Mark one notification unread. Returns whether it was read.
    pub fn mark_unread(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(n) if n.is_read => {
                n.is_read = false;
                self.unread_count += 1;
                true
            }
            _ => false,
        }
    }

    /// Mark everything read.
    pub fn mark_all_read(&mut self) -> bool {
        if self.unread_count == 0 {
            return false;
        }
        for n in &mut self.items {
            n.is_read = true;
        }
        self.unread_count = 0;
        true
    }

    /// Remove one notification.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(pos) = self.items.iter().position(|n| n.id == id) else {
            return false;
        };
        let removed = self.items.remove(pos);
        if !removed.is_read {
            self.unread_count = self.unread_count.saturating_sub(1);
        }
        true
    }

    /// Empty the inbox.
    pub fn clear(&mut self) {
        self.items.clear();
        self.unread_count = 0;
    }

    /// Mark the given ids read (used when restoring persisted read state).
    pub fn apply_read_state(&mut self, read_ids: &[String]) {
        for n in &mut self.items {
            if read_ids.contains(&n.id) {
                n.is_read = true;
            }
        }
        self.recount();
    }

    /// Ids of read notifications.
    pub fn read_ids(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|n| n.is_read)
            .map(|n| n.id.clone())
            .collect()
    }

    /// Notifications created for the signed-in user, newest first.
    pub fn personal(&self) -> Vec<Notification> {
        self.items
            .iter()
            .filter(|n| !self.shared_ids.contains(&n.id))
            .cloned()
            .collect()
    }

    /// Merge a user's saved notifications back in, keeping the inbox newest
    /// first and within the cap.
    pub fn restore_personal(&mut self, saved: Vec<Notification>) {
        for notification in saved {
            if self.get(&notification.id).is_none() {
                self.items.push(notification);
            }
        }
        self.items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        self.items.truncate(self.cap);
        self.recount();
    }

    /// Drop the user's notifications and mark the built-in ones unread.
    pub fn reset_personal(&mut self) {
        let shared = &self.shared_ids;
        self.items.retain(|n| shared.contains(&n.id));
        for n in &mut self.items {
            n.is_read = false;
        }
        self.recount();
    }

    /// Look up a notification.
    pub fn get(&self, id: &str) -> Option<&Notification> {
        self.items.iter().find(|n| n.id == id)
    }

    fn recount(&mut self) {
        self.unread_count = self.items.iter().filter(|n| !n.is_read).count();
    }
}
