//! Catalog content models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of catalog content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Feature film.
    Movie,
    /// Episodic series.
    Series,
    /// Cloud game.
    Game,
}

impl ContentKind {
    /// Parse a kind from its lowercase name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "movie" | "movies" => Some(ContentKind::Movie),
            "series" | "show" | "tv" => Some(ContentKind::Series),
            "game" | "games" => Some(ContentKind::Game),
            _ => None,
        }
    }
}

/// A feature film.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// Unique identifier.
    pub id: String,
    /// Title.
    pub title: String,
    /// Short synopsis.
    #[serde(default)]
    pub description: String,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<String>,
    /// Average rating between 0 and 10.
    pub rating: f64,
    /// Release date.
    pub release_date: NaiveDate,
    /// Runtime in minutes.
    pub duration: u32,
    /// Maturity rating (e.g. "PG-13").
    #[serde(default)]
    pub maturity_rating: String,
    /// Main cast.
    #[serde(default)]
    pub cast: Vec<String>,
    /// Director.
    #[serde(default)]
    pub director: Option<String>,
    /// Total views on the platform.
    #[serde(default)]
    pub views: u64,
    /// Only available on paid plans.
    #[serde(default)]
    pub is_premium: bool,
}

/// An episode of a series season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    /// Unique identifier.
    pub id: String,
    /// Episode number within the season.
    pub number: u32,
    /// Episode title.
    pub title: String,
    /// Runtime in minutes.
    pub duration: u32,
}

/// A season of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    /// Unique identifier.
    pub id: String,
    /// Season number.
    pub number: u32,
    /// Episodes in broadcast order.
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

/// An episodic series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    /// Unique identifier.
    pub id: String,
    /// Title.
    pub title: String,
    /// Short synopsis.
    #[serde(default)]
    pub description: String,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<String>,
    /// Average rating between 0 and 10.
    pub rating: f64,
    /// First air date.
    pub release_date: NaiveDate,
    /// Typical episode runtime in minutes.
    pub duration: u32,
    /// Maturity rating.
    #[serde(default)]
    pub maturity_rating: String,
    /// Main cast.
    #[serde(default)]
    pub cast: Vec<String>,
    /// Seasons in order.
    #[serde(default)]
    pub seasons: Vec<Season>,
    /// Total views on the platform.
    #[serde(default)]
    pub views: u64,
    /// Only available on paid plans.
    #[serde(default)]
    pub is_premium: bool,
}

impl Series {
    /// Find an episode by season and episode id.
    pub fn episode(&self, season_id: &str, episode_id: &str) -> Option<&Episode> {
        self.seasons
            .iter()
            .find(|s| s.id == season_id)
            .and_then(|s| s.episodes.iter().find(|e| e.id == episode_id))
    }

    /// Total number of episodes across all seasons.
    pub fn episode_count(&self) -> usize {
        self.seasons.iter().map(|s| s.episodes.len()).sum()
    }
}

/// A cloud game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Unique identifier.
    pub id: String,
    /// Title.
    pub title: String,
    /// Short synopsis.
    #[serde(default)]
    pub description: String,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<String>,
    /// Average rating between 0 and 10.
    pub rating: f64,
    /// Release date.
    pub release_date: NaiveDate,
    /// Supported platforms.
    #[serde(default)]
    pub platforms: Vec<String>,
    /// Total plays on the platform.
    #[serde(default)]
    pub views: u64,
    /// Only available on paid plans.
    #[serde(default)]
    pub is_premium: bool,
}

/// A short-form clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reel {
    /// Unique identifier.
    pub id: String,
    /// Catalog content this clip promotes.
    pub content_id: String,
    /// Caption.
    pub title: String,
    /// Like counter.
    #[serde(default)]
    pub likes: u64,
    /// View counter.
    #[serde(default)]
    pub views: u64,
    /// Share counter.
    #[serde(default)]
    pub shares: u64,
    /// Comment counter.
    #[serde(default)]
    pub comments: u64,
}

/// Borrowed view over any catalog item, used by selectors.
#[derive(Debug, Clone, Copy)]
pub enum ContentItem<'a> {
    /// A movie.
    Movie(&'a Movie),
    /// A series.
    Series(&'a Series),
    /// A game.
    Game(&'a Game),
}

impl<'a> ContentItem<'a> {
    /// Identifier.
    pub fn id(&self) -> &'a str {
        match self {
            ContentItem::Movie(m) => &m.id,
            ContentItem::Series(s) => &s.id,
            ContentItem::Game(g) => &g.id,
        }
    }

    /// Title.
    pub fn title(&self) -> &'a str {
        match self {
            ContentItem::Movie(m) => &m.title,
            ContentItem::Series(s) => &s.title,
            ContentItem::Game(g) => &g.title,
        }
    }

    /// Genres.
    pub fn genres(&self) -> &'a [String] {
        match self {
            ContentItem::Movie(m) => &m.genres,
            ContentItem::Series(s) => &s.genres,
            ContentItem::Game(g) => &g.genres,
        }
    }

    /// Rating.
    pub fn rating(&self) -> f64 {
        match self {
            ContentItem::Movie(m) => m.rating,
            ContentItem::Series(s) => s.rating,
            ContentItem::Game(g) => g.rating,
        }
    }

    /// Release date.
    pub fn release_date(&self) -> NaiveDate {
        match self {
            ContentItem::Movie(m) => m.release_date,
            ContentItem::Series(s) => s.release_date,
            ContentItem::Game(g) => g.release_date,
        }
    }

    /// View counter.
    pub fn views(&self) -> u64 {
        match self {
            ContentItem::Movie(m) => m.views,
            ContentItem::Series(s) => s.views,
            ContentItem::Game(g) => g.views,
        }
    }

    /// Whether a paid plan is required.
    pub fn is_premium(&self) -> bool {
        match self {
            ContentItem::Movie(m) => m.is_premium,
            ContentItem::Series(s) => s.is_premium,
            ContentItem::Game(g) => g.is_premium,
        }
    }

    /// Cast members (games have none).
    pub fn cast(&self) -> &'a [String] {
        match self {
            ContentItem::Movie(m) => &m.cast,
            ContentItem::Series(s) => &s.cast,
            ContentItem::Game(_) => &[],
        }
    }

    /// Kind of content.
    pub fn kind(&self) -> ContentKind {
        match self {
            ContentItem::Movie(_) => ContentKind::Movie,
            ContentItem::Series(_) => ContentKind::Series,
            ContentItem::Game(_) => ContentKind::Game,
        }
    }
}
