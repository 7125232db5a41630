//! Social entities: friends, reviews, activity feed, watch parties and
//! direct messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A friend of the current user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friend {
    /// User id of the friend.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Avatar URL.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Online right now.
    #[serde(default)]
    pub is_online: bool,
    /// Content they are currently watching.
    #[serde(default)]
    pub currently_watching: Option<String>,
}

/// A pending incoming friend request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequest {
    /// Request id.
    pub id: String,
    /// Requesting user.
    pub from: Friend,
    /// When it was sent.
    pub sent_at: DateTime<Utc>,
}

/// A user review of a title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Review id.
    pub id: String,
    /// Reviewed content.
    pub content_id: String,
    /// Author id.
    pub user_id: String,
    /// Author display name.
    pub user_name: String,
    /// Score between 0 and 10.
    pub rating: f64,
    /// Review text.
    #[serde(default)]
    pub text: String,
    /// Users who marked it helpful (unique).
    #[serde(default)]
    pub helpful_by: Vec<String>,
    /// Equal to `helpful_by.len()`.
    #[serde(default)]
    pub helpful_count: u32,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// What a friend did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// Started or finished watching.
    Watched,
    /// Wrote a review.
    Reviewed,
    /// Added to favorites.
    Favorited,
    /// Unlocked an achievement.
    Achievement,
    /// Hosted or joined a watch party.
    WatchParty,
}

/// An activity feed entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Entry id.
    pub id: String,
    /// Acting user.
    pub user_id: String,
    /// What happened.
    pub kind: ActivityKind,
    /// Related content.
    #[serde(default)]
    pub content_id: Option<String>,
    /// When it happened.
    pub timestamp: DateTime<Utc>,
}

/// A chat message inside a watch party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyMessage {
    /// Message id.
    pub id: String,
    /// Author.
    pub user_id: String,
    /// Text.
    pub text: String,
    /// Send time.
    pub timestamp: DateTime<Utc>,
}

/// A synchronized viewing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchParty {
    /// Party id.
    pub id: String,
    /// Hosting user.
    pub host_id: String,
    /// Content being watched.
    pub content_id: String,
    /// Member ids (unique, host included).
    pub participants: Vec<String>,
    /// Chat log, append-only.
    #[serde(default)]
    pub messages: Vec<PartyMessage>,
    /// Shared playback cursor in seconds.
    #[serde(default)]
    pub current_time: f64,
    /// Shared play/pause state.
    #[serde(default)]
    pub is_playing: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// A one-to-one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectMessage {
    /// Message id.
    pub id: String,
    /// Sender id.
    pub from: String,
    /// Recipient id.
    pub to: String,
    /// Text.
    pub text: String,
    /// Send time.
    pub timestamp: DateTime<Utc>,
    /// Read by the recipient.
    #[serde(default)]
    pub is_read: bool,
}
