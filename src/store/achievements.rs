//! Achievement progress, points and level.
//!
//! Unlocking is one-way: once `unlocked_at` is set it stays set until
//! [`AchievementState::reset`], and the points of a badge are awarded exactly
//! once no matter how often progress is reported afterwards.

use crate::models::Achievement;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Points needed per level.
pub const POINTS_PER_LEVEL: u32 = 100;

/// Achievements of the current user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementState {
    /// All badges.
    pub achievements: Vec<Achievement>,
    /// Sum of points of unlocked badges.
    pub total_points: u32,
    /// `total_points / 100 + 1`.
    pub level: u32,
    /// Ids unlocked since the last call to `take_recent_unlocks`.
    #[serde(skip)]
    pub recent_unlocks: Vec<String>,
}

impl Default for AchievementState {
    fn default() -> Self {
        Self {
            achievements: Vec::new(),
            total_points: 0,
            level: 1,
            recent_unlocks: Vec::new(),
        }
    }
}

/// Level for a point total.
pub fn level_for(points: u32) -> u32 {
    points / POINTS_PER_LEVEL + 1
}

impl AchievementState {
    /// Load the badge definitions, keeping nothing of the previous state.
    pub fn seed(&mut self, achievements: Vec<Achievement>) {
        self.achievements = achievements;
        self.recompute();
    }

    /// Set progress. Crossing the target unlocks the badge once.
    ///
    /// Returns whether this call unlocked it.
    pub fn update_progress(&mut self, id: &str, progress: u32, now: DateTime<Utc>) -> bool {
        let Some(achievement) = self.achievements.iter_mut().find(|a| a.id == id) else {
            return false;
        };

        achievement.progress = progress;
        if achievement.progress >= achievement.target && achievement.unlocked_at.is_none() {
            return self.unlock(id, now);
        }
        false
    }

    /// Add to the current progress.
    pub fn increment_progress(&mut self, id: &str, delta: u32, now: DateTime<Utc>) -> bool {
        let Some(current) = self.get(id).map(|a| a.progress) else {
            return false;
        };
        self.update_progress(id, current.saturating_add(delta), now)
    }

    /// Unlock a badge and award its points. No-op when already unlocked.
    pub fn unlock(&mut self, id: &str, now: DateTime<Utc>) -> bool {
        let Some(achievement) = self.achievements.iter_mut().find(|a| a.id == id) else {
            return false;
        };
        if achievement.unlocked_at.is_some() {
            return false;
        }

        achievement.unlocked_at = Some(now);
        achievement.progress = achievement.progress.max(achievement.target);
        self.total_points += achievement.points;
        self.level = level_for(self.total_points);
        self.recent_unlocks.push(id.to_string());

        tracing::debug!(achievement = id, points = self.total_points, "Achievement unlocked");
        true
    }

    /// Clear all progress and unlocks.
    pub fn reset(&mut self) {
        for a in &mut self.achievements {
            a.progress = 0;
            a.unlocked_at = None;
        }
        self.recent_unlocks.clear();
        self.recompute();
    }

    /// Restore persisted progress onto the current definitions.
    pub fn restore(&mut self, saved: Vec<Achievement>) {
        for a in &mut self.achievements {
            if let Some(s) = saved.iter().find(|s| s.id == a.id) {
                a.progress = s.progress;
                a.unlocked_at = s.unlocked_at;
            }
        }
        self.recompute();
    }

    /// Drain the ids unlocked since the last call.
    pub fn take_recent_unlocks(&mut self) -> Vec<String> {
        std::mem::take(&mut self.recent_unlocks)
    }

    /// Look up a badge.
    pub fn get(&self, id: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == id)
    }

    /// Unlocked badges.
    pub fn unlocked(&self) -> impl Iterator<Item = &Achievement> {
        self.achievements.iter().filter(|a| a.is_unlocked())
    }

    fn recompute(&mut self) {
        self.total_points = self.unlocked().map(|a| a.points).sum();
        self.level = level_for(self.total_points);
    }
}
