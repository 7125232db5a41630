use crate::models::WatchProgress;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Playback positions keyed by `contentId[-seasonId][-episodeId]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WatchProgressState {
    /// One entry per movie or episode.
    pub entries: BTreeMap<String, WatchProgress>,
}

/// Position update for one movie or episode.
#[derive(Debug, Clone)]
pub struct ProgressUpdate<'a> {
    /// Content id.
    pub content_id: &'a str,
    /// Season id, for episodes.
    pub season_id: Option<&'a str>,
    /// Episode id, for episodes.
    pub episode_id: Option<&'a str>,
    /// Position in seconds.
    pub current_time: f64,
    /// Total length in seconds.
    pub duration: f64,
}

impl WatchProgressState {
    /// Insert or replace the entry for this movie or episode.
    pub fn update(&mut self, update: ProgressUpdate<'_>, now: DateTime<Utc>) -> &WatchProgress {
        let key = WatchProgress::key(update.content_id, update.season_id, update.episode_id);
        let duration = update.duration.max(0.0);
        let mut current_time = update.current_time.max(0.0);
        if duration > 0.0 {
            current_time = current_time.min(duration);
        }
        let completed = duration > 0.0 && current_time >= duration;

        let entry = WatchProgress {
            content_id: update.content_id.to_string(),
            season_id: update.season_id.map(str::to_string),
            episode_id: update.episode_id.map(str::to_string),
            current_time,
            duration,
            last_watched: now,
            completed,
        };

        self.entries.insert(key.clone(), entry);
        &self.entries[&key]
    }

    /// Mark an entry as fully watched. No-op when already completed.
    pub fn mark_completed(&mut self, key: &str, now: DateTime<Utc>) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) if !entry.completed => {
                entry.current_time = entry.duration;
                entry.completed = true;
                entry.last_watched = now;
                true
            }
            _ => false,
        }
    }

    /// Look up an entry by key.
    pub fn get(&self, key: &str) -> Option<&WatchProgress> {
        self.entries.get(key)
    }

    /// All entries belonging to one content id.
    pub fn entries_for(&self, content_id: &str) -> Vec<&WatchProgress> {
        self.entries
            .values()
            .filter(|e| e.content_id == content_id)
            .collect()
    }

    /// Remove an entry.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
