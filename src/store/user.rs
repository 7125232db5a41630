//! Signed-in user, favorites, watchlist and watch history.

use crate::models::{User, UserPatch};
use crate::store::{insert_unique, push_front_capped, remove_value};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default cap of the watch history.
pub const WATCH_HISTORY_CAP: usize = 100;

/// Session and profile of the current user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserState {
    /// Signed-in user.
    pub user: Option<User>,
    /// Maximum number of history entries kept.
    pub history_cap: usize,
}

impl Default for UserState {
    fn default() -> Self {
        Self {
            user: None,
            history_cap: WATCH_HISTORY_CAP,
        }
    }
}

impl UserState {
    /// Whether someone is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Id of the signed-in user.
    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    /// Sign in. Any non-empty credentials are accepted.
    ///
    /// The user id is derived from the email so that signing in again with
    /// the same address finds the same persisted data.
    pub fn login(&mut self, email: &str, password: &str, now: DateTime<Utc>) -> Option<&User> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return None;
        }

        let id = uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_OID, email.to_lowercase().as_bytes())
            .to_string();
        let name = email.split('@').next().unwrap_or(email).to_string();

        self.user = Some(User {
            id,
            name,
            email: email.to_string(),
            avatar: None,
            favorites: Vec::new(),
            watchlist: Vec::new(),
            watch_history: Vec::new(),
            created_at: now,
        });
        self.user.as_ref()
    }

    /// Replace the profile with a persisted one.
    pub fn restore(&mut self, mut user: User) {
        user.watch_history.truncate(self.history_cap);
        self.user = Some(user);
    }

    /// Sign out.
    pub fn logout(&mut self) -> bool {
        self.user.take().is_some()
    }

    /// Apply a partial profile update.
    pub fn update_profile(&mut self, patch: UserPatch) -> bool {
        match self.user.as_mut() {
            Some(user) => {
                user.apply(patch);
                true
            }
            None => false,
        }
    }

    /// Add to favorites; no-op if already present.
    pub fn add_favorite(&mut self, content_id: &str) -> bool {
        self.user
            .as_mut()
            .is_some_and(|u| insert_unique(&mut u.favorites, content_id))
    }

    /// Remove from favorites.
    pub fn remove_favorite(&mut self, content_id: &str) -> bool {
        self.user
            .as_mut()
            .is_some_and(|u| remove_value(&mut u.favorites, content_id))
    }

    /// Flip favorite membership. Returns the new membership.
    pub fn toggle_favorite(&mut self, content_id: &str) -> bool {
        if self.is_favorite(content_id) {
            self.remove_favorite(content_id);
            false
        } else {
            self.add_favorite(content_id)
        }
    }

    /// Whether the content is a favorite.
    pub fn is_favorite(&self, content_id: &str) -> bool {
        self.user
            .as_ref()
            .is_some_and(|u| u.favorites.iter().any(|id| id == content_id))
    }

    /// Add to the watchlist; no-op if already present.
    pub fn add_to_watchlist(&mut self, content_id: &str) -> bool {
        self.user
            .as_mut()
            .is_some_and(|u| insert_unique(&mut u.watchlist, content_id))
    }

    /// Remove from the watchlist.
    pub fn remove_from_watchlist(&mut self, content_id: &str) -> bool {
        self.user
            .as_mut()
            .is_some_and(|u| remove_value(&mut u.watchlist, content_id))
    }

    /// Flip watchlist membership. Returns the new membership.
    pub fn toggle_watchlist(&mut self, content_id: &str) -> bool {
        if self.in_watchlist(content_id) {
            self.remove_from_watchlist(content_id);
            false
        } else {
            self.add_to_watchlist(content_id)
        }
    }

    /// Whether the content is on the watchlist.
    pub fn in_watchlist(&self, content_id: &str) -> bool {
        self.user
            .as_ref()
            .is_some_and(|u| u.watchlist.iter().any(|id| id == content_id))
    }

    /// Record a watch: move (or insert) the id to the front, trim to the cap.
    pub fn add_to_history(&mut self, content_id: &str) -> bool {
        let cap = self.history_cap;
        match self.user.as_mut() {
            Some(user) => {
                user.watch_history.retain(|id| id != content_id);
                push_front_capped(&mut user.watch_history, content_id.to_string(), cap);
                true
            }
            None => false,
        }
    }

    /// Remove one history entry.
    pub fn remove_from_history(&mut self, content_id: &str) -> bool {
        self.user
            .as_mut()
            .is_some_and(|u| remove_value(&mut u.watch_history, content_id))
    }

    /// Empty the watch history.
    pub fn clear_history(&mut self) -> bool {
        match self.user.as_mut() {
            Some(user) if !user.watch_history.is_empty() => {
                user.watch_history.clear();
                true
            }
            _ => false,
        }
    }

    /// Watch history, most recent first.
    pub fn history(&self) -> &[String] {
        self.user
            .as_ref()
            .map(|u| u.watch_history.as_slice())
            .unwrap_or(&[])
    }

    /// Favorite ids.
    pub fn favorites(&self) -> &[String] {
        self.user
            .as_ref()
            .map(|u| u.favorites.as_slice())
            .unwrap_or(&[])
    }
}
