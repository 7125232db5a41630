use crate::models::Reel;
use crate::store::{insert_unique, remove_value};
use serde::{Deserialize, Serialize};

/// Short-form clip feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReelState {
    /// Clips in feed order.
    pub reels: Vec<Reel>,
    /// Clips liked by the user; each like is reflected in `Reel::likes`.
    pub liked: Vec<String>,
    /// Clips saved by the user.
    pub saved: Vec<String>,
    /// Index of the clip on screen.
    pub current_index: usize,
}

impl ReelState {
    /// Replace the feed and rewind.
    pub fn set_reels(&mut self, reels: Vec<Reel>) {
        self.reels = reels;
        self.current_index = 0;
    }

    /// Flip the like and adjust the counter by one. Returns the new state.
    pub fn toggle_like(&mut self, reel_id: &str) -> bool {
        let Some(reel) = self.reels.iter_mut().find(|r| r.id == reel_id) else {
            return false;
        };

        if remove_value(&mut self.liked, reel_id) {
            reel.likes = reel.likes.saturating_sub(1);
            false
        } else {
            insert_unique(&mut self.liked, reel_id);
            reel.likes += 1;
            true
        }
    }

    /// Whether the clip is liked.
    pub fn is_liked(&self, reel_id: &str) -> bool {
        self.liked.iter().any(|id| id == reel_id)
    }

    /// Flip the saved flag. Returns the new state.
    pub fn toggle_save(&mut self, reel_id: &str) -> bool {
        if !self.reels.iter().any(|r| r.id == reel_id) {
            return false;
        }
        if remove_value(&mut self.saved, reel_id) {
            false
        } else {
            insert_unique(&mut self.saved, reel_id)
        }
    }

    /// Count a view.
    pub fn record_view(&mut self, reel_id: &str) -> bool {
        self.bump(reel_id, |r| r.views += 1)
    }

    /// Count a share.
    pub fn share(&mut self, reel_id: &str) -> bool {
        self.bump(reel_id, |r| r.shares += 1)
    }

    /// Move to the next clip, stopping at the end.
    pub fn next(&mut self) -> Option<&Reel> {
        if self.current_index + 1 < self.reels.len() {
            self.current_index += 1;
        }
        self.current()
    }

    /// Move to the previous clip, stopping at the start.
    pub fn previous(&mut self) -> Option<&Reel> {
        self.current_index = self.current_index.saturating_sub(1);
        self.current()
    }

    /// Clip on screen.
    pub fn current(&self) -> Option<&Reel> {
        self.reels.get(self.current_index)
    }

    /// Look up a clip.
    pub fn get(&self, reel_id: &str) -> Option<&Reel> {
        self.reels.iter().find(|r| r.id == reel_id)
    }

    fn bump(&mut self, reel_id: &str, f: impl FnOnce(&mut Reel)) -> bool {
        match self.reels.iter_mut().find(|r| r.id == reel_id) {
            Some(reel) => {
                f(reel);
                true
            }
            None => false,
        }
    }
}
