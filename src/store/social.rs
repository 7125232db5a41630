//! Friends, reviews, activity feed, watch parties and direct messages.

use crate::models::new_id;
use crate::models::social::{
    Activity, DirectMessage, Friend, FriendRequest, PartyMessage, Review, WatchParty,
};
use crate::store::{insert_unique, push_front_capped, remove_value};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default cap of the activity feed.
pub const ACTIVITY_CAP: usize = 50;

/// Social graph and interactions of the current user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialState {
    /// Accepted friends.
    pub friends: Vec<Friend>,
    /// Incoming friend requests.
    pub requests: Vec<FriendRequest>,
    /// Reviews of catalog content.
    pub reviews: Vec<Review>,
    /// Activity feed, most recent first.
    pub activities: Vec<Activity>,
    /// Maximum number of activities kept.
    pub activity_cap: usize,
    /// Open watch parties.
    pub parties: Vec<WatchParty>,
    /// Direct messages in send order.
    pub messages: Vec<DirectMessage>,
}

impl Default for SocialState {
    fn default() -> Self {
        Self {
            friends: Vec::new(),
            requests: Vec::new(),
            reviews: Vec::new(),
            activities: Vec::new(),
            activity_cap: ACTIVITY_CAP,
            parties: Vec::new(),
            messages: Vec::new(),
        }
    }
}

impl SocialState {
    // ========== FRIENDS ==========

    /// Add a friend unless already present.
    pub fn add_friend(&mut self, friend: Friend) -> bool {
        if self.is_friend(&friend.id) {
            return false;
        }
        self.friends.push(friend);
        true
    }

    /// Remove a friend.
    pub fn remove_friend(&mut self, friend_id: &str) -> bool {
        let before = self.friends.len();
        self.friends.retain(|f| f.id != friend_id);
        self.friends.len() != before
    }

    /// Whether the user is a friend.
    pub fn is_friend(&self, friend_id: &str) -> bool {
        self.friends.iter().any(|f| f.id == friend_id)
    }

    /// Update presence of a friend.
    pub fn set_online(&mut self, friend_id: &str, online: bool, watching: Option<String>) -> bool {
        match self.friends.iter_mut().find(|f| f.id == friend_id) {
            Some(friend) => {
                friend.is_online = online;
                friend.currently_watching = if online { watching } else { None };
                true
            }
            None => false,
        }
    }

    /// Friends currently online.
    pub fn online_friends(&self) -> impl Iterator<Item = &Friend> {
        self.friends.iter().filter(|f| f.is_online)
    }

    /// Record an incoming request; one per user, ignored for existing friends.
    pub fn receive_request(&mut self, from: Friend, now: DateTime<Utc>) -> bool {
        if self.is_friend(&from.id) || self.requests.iter().any(|r| r.from.id == from.id) {
            return false;
        }
        self.requests.push(FriendRequest {
            id: new_id(),
            from,
            sent_at: now,
        });
        true
    }

    /// Accept a request, moving the requester into the friend list.
    pub fn accept_request(&mut self, request_id: &str) -> bool {
        let Some(pos) = self.requests.iter().position(|r| r.id == request_id) else {
            return false;
        };
        let request = self.requests.remove(pos);
        self.add_friend(request.from);
        true
    }

    /// Decline a request.
    pub fn decline_request(&mut self, request_id: &str) -> bool {
        let before = self.requests.len();
        self.requests.retain(|r| r.id != request_id);
        self.requests.len() != before
    }

    // ========== REVIEWS ==========

    /// Add a review. A user has at most one review per title; a second one
    /// replaces the first.
    pub fn add_review(&mut self, review: Review) {
        self.reviews
            .retain(|r| !(r.content_id == review.content_id && r.user_id == review.user_id));
        self.reviews.insert(0, review);
    }

    /// Remove a review.
    pub fn remove_review(&mut self, review_id: &str) -> bool {
        let before = self.reviews.len();
        self.reviews.retain(|r| r.id != review_id);
        self.reviews.len() != before
    }

    /// Flip a user's "helpful" mark. Returns the new state.
    pub fn toggle_helpful(&mut self, review_id: &str, user_id: &str) -> bool {
        let Some(review) = self.reviews.iter_mut().find(|r| r.id == review_id) else {
            return false;
        };

        let marked = if remove_value(&mut review.helpful_by, user_id) {
            false
        } else {
            insert_unique(&mut review.helpful_by, user_id)
        };
        review.helpful_count = review.helpful_by.len() as u32;
        marked
    }

    /// Reviews of one title, newest first.
    pub fn reviews_for(&self, content_id: &str) -> Vec<&Review> {
        self.reviews
            .iter()
            .filter(|r| r.content_id == content_id)
            .collect()
    }

    /// Mean review score of a title.
    pub fn average_rating(&self, content_id: &str) -> Option<f64> {
        let reviews = self.reviews_for(content_id);
        if reviews.is_empty() {
            return None;
        }
        Some(reviews.iter().map(|r| r.rating).sum::<f64>() / reviews.len() as f64)
    }

    // ========== ACTIVITY ==========

    /// Insert at the head of the feed, trimming to the cap.
    pub fn add_activity(&mut self, activity: Activity) {
        push_front_capped(&mut self.activities, activity, self.activity_cap);
    }

    /// Empty the feed.
    pub fn clear_activities(&mut self) {
        self.activities.clear();
    }

    // ========== WATCH PARTIES ==========

    /// Open a party with the host as first participant.
    pub fn create_party(&mut self, host_id: &str, content_id: &str, now: DateTime<Utc>) -> &WatchParty {
        self.parties.push(WatchParty {
            id: new_id(),
            host_id: host_id.to_string(),
            content_id: content_id.to_string(),
            participants: vec![host_id.to_string()],
            messages: Vec::new(),
            current_time: 0.0,
            is_playing: false,
            created_at: now,
        });
        &self.parties[self.parties.len() - 1]
    }

    /// Add a participant; no-op if already in.
    pub fn join_party(&mut self, party_id: &str, user_id: &str) -> bool {
        self.party_mut(party_id)
            .is_some_and(|p| insert_unique(&mut p.participants, user_id))
    }

    /// Remove a participant. The host leaving closes the party.
    pub fn leave_party(&mut self, party_id: &str, user_id: &str) -> bool {
        let host_left = self
            .party(party_id)
            .is_some_and(|p| p.host_id == user_id);
        if host_left {
            return self.end_party(party_id);
        }
        self.party_mut(party_id)
            .is_some_and(|p| remove_value(&mut p.participants, user_id))
    }

    /// Close a party.
    pub fn end_party(&mut self, party_id: &str) -> bool {
        let before = self.parties.len();
        self.parties.retain(|p| p.id != party_id);
        self.parties.len() != before
    }

    /// Append a chat message; only participants may post.
    pub fn send_party_message(
        &mut self,
        party_id: &str,
        user_id: &str,
        text: &str,
        now: DateTime<Utc>,
    ) -> bool {
        let Some(party) = self.party_mut(party_id) else {
            return false;
        };
        if !party.participants.iter().any(|p| p == user_id) {
            return false;
        }
        party.messages.push(PartyMessage {
            id: new_id(),
            user_id: user_id.to_string(),
            text: text.to_string(),
            timestamp: now,
        });
        true
    }

    /// Move the shared playback cursor.
    pub fn sync_playback(&mut self, party_id: &str, current_time: f64, is_playing: bool) -> bool {
        match self.party_mut(party_id) {
            Some(party) => {
                party.current_time = current_time.max(0.0);
                party.is_playing = is_playing;
                true
            }
            None => false,
        }
    }

    /// Play or pause without moving the cursor.
    pub fn set_playing(&mut self, party_id: &str, is_playing: bool) -> bool {
        match self.party_mut(party_id) {
            Some(party) => {
                party.is_playing = is_playing;
                true
            }
            None => false,
        }
    }

    /// Look up a party.
    pub fn party(&self, party_id: &str) -> Option<&WatchParty> {
        self.parties.iter().find(|p| p.id == party_id)
    }

    fn party_mut(&mut self, party_id: &str) -> Option<&mut WatchParty> {
        self.parties.iter_mut().find(|p| p.id == party_id)
    }

    // ========== DIRECT MESSAGES ==========

    /// Send a direct message.
    pub fn send_message(&mut self, from: &str, to: &str, text: &str, now: DateTime<Utc>) {
        self.messages.push(DirectMessage {
            id: new_id(),
            from: from.to_string(),
            to: to.to_string(),
            text: text.to_string(),
            timestamp: now,
            is_read: false,
        });
    }

    /// Mark every message from `other` to `me` read. Returns how many changed.
    pub fn mark_conversation_read(&mut self, me: &str, other: &str) -> usize {
        let mut changed = 0;
        for m in &mut self.messages {
            if m.to == me && m.from == other && !m.is_read {
                m.is_read = true;
                changed += 1;
            }
        }
        changed
    }

    /// Messages between two users, in send order.
    pub fn conversation(&self, a: &str, b: &str) -> Vec<&DirectMessage> {
        self.messages
            .iter()
            .filter(|m| (m.from == a && m.to == b) || (m.from == b && m.to == a))
            .collect()
    }

    /// Unread messages addressed to `me`.
    pub fn unread_messages(&self, me: &str) -> usize {
        self.messages
            .iter()
            .filter(|m| m.to == me && !m.is_read)
            .count()
    }
}
