use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A badge earned by reaching a progress target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    /// Unique identifier.
    pub id: String,
    /// Badge title.
    pub title: String,
    /// What the user has to do.
    #[serde(default)]
    pub description: String,
    /// Points awarded on unlock.
    pub points: u32,
    /// Current progress.
    #[serde(default)]
    pub progress: u32,
    /// Progress needed to unlock.
    pub target: u32,
    /// Unlock time; never cleared except by a reset.
    #[serde(default)]
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl Achievement {
    /// Whether the badge has been unlocked.
    pub fn is_unlocked(&self) -> bool {
        self.unlocked_at.is_some()
    }
}
