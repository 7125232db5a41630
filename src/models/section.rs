use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a home-page row shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Highest rated or most viewed.
    Trending,
    /// Most recent releases.
    NewReleases,
    /// In-progress titles.
    ContinueWatching,
    /// Personalized recommendations.
    Recommended,
    /// Hand-picked row.
    Curated,
    /// Single-genre row.
    Genre,
}

/// A row of content on the home page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSection {
    /// Unique identifier.
    pub id: String,
    /// Row title.
    pub title: String,
    /// Row kind.
    pub kind: SectionKind,
    /// Content ids in display order (unique).
    #[serde(default)]
    pub content_ids: Vec<String>,
    /// Maximum number of ids kept.
    pub max_items: usize,
    /// Last time the row content changed.
    pub last_updated: DateTime<Utc>,
    /// Whether the row is shown.
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    /// Display position.
    #[serde(default)]
    pub order: u32,
}

fn default_visible() -> bool {
    true
}
