use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Signed-in user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Avatar URL.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Favorite content ids (unique).
    #[serde(default)]
    pub favorites: Vec<String>,
    /// Watchlist content ids (unique).
    #[serde(default)]
    pub watchlist: Vec<String>,
    /// Watched content ids, most recent first (unique).
    #[serde(default)]
    pub watch_history: Vec<String>,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

/// Partial profile update; `None` fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    /// New display name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New avatar (`Some(None)` clears it).
    pub avatar: Option<Option<String>>,
}

impl User {
    /// Apply a profile patch.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = avatar;
        }
    }
}
