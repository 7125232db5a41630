use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Notification category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// New content was released.
    NewContent,
    /// A personalized recommendation.
    Recommendation,
    /// A friend did something.
    Social,
    /// Billing or plan change.
    Subscription,
    /// An achievement was unlocked.
    Achievement,
    /// Platform announcement.
    System,
}

/// A notification shown in the inbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique identifier.
    pub id: String,
    /// Category.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Headline.
    pub title: String,
    /// Body text.
    #[serde(default)]
    pub message: String,
    /// Whether the user has read it.
    #[serde(default)]
    pub is_read: bool,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
    /// Related content, if any.
    #[serde(default)]
    pub content_id: Option<String>,
}
