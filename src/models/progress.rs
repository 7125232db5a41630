use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fraction of a title that must be watched before it shows up as
/// "continue watching".
pub const CONTINUE_THRESHOLD: f64 = 0.1;

/// Playback position for one movie or one episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchProgress {
    /// Content id.
    pub content_id: String,
    /// Season id for episodes.
    #[serde(default)]
    pub season_id: Option<String>,
    /// Episode id for episodes.
    #[serde(default)]
    pub episode_id: Option<String>,
    /// Position in seconds.
    pub current_time: f64,
    /// Total length in seconds.
    pub duration: f64,
    /// Last time this entry was updated.
    pub last_watched: DateTime<Utc>,
    /// Whether playback reached the end.
    #[serde(default)]
    pub completed: bool,
}

impl WatchProgress {
    /// Compound key: `contentId[-seasonId][-episodeId]`.
    pub fn key(content_id: &str, season_id: Option<&str>, episode_id: Option<&str>) -> String {
        let mut key = content_id.to_string();
        for part in [season_id, episode_id].into_iter().flatten() {
            key.push('-');
            key.push_str(part);
        }
        key
    }

    /// Key of this entry.
    pub fn entry_key(&self) -> String {
        Self::key(
            &self.content_id,
            self.season_id.as_deref(),
            self.episode_id.as_deref(),
        )
    }

    /// Watched fraction in `[0, 1]`; zero when the duration is unknown.
    pub fn fraction(&self) -> f64 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (self.current_time / self.duration).clamp(0.0, 1.0)
    }

    /// Started but not finished.
    pub fn is_in_progress(&self) -> bool {
        let fraction = self.fraction();
        fraction > CONTINUE_THRESHOLD && fraction < 1.0
    }
}
