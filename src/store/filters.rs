use crate::models::ContentKind;
use crate::store::{insert_unique, remove_value};
use serde::{Deserialize, Serialize};

/// Browse page sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Catalog order.
    #[default]
    Relevance,
    /// Highest rating first.
    Rating,
    /// Newest first.
    ReleaseDate,
    /// Alphabetical.
    Title,
    /// Most viewed first.
    Popularity,
}

/// Browse page filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterState {
    /// Selected genres; an item matches if it has any of them.
    pub genres: Vec<String>,
    /// Inclusive release year range.
    pub year_range: Option<(i32, i32)>,
    /// Minimum rating.
    pub min_rating: Option<f64>,
    /// Restrict to one kind.
    pub kind: Option<ContentKind>,
    /// Sort order.
    pub sort_by: SortBy,
}

impl FilterState {
    /// Select or deselect a genre. Returns the new selection state.
    pub fn toggle_genre(&mut self, genre: &str) -> bool {
        if remove_value(&mut self.genres, genre) {
            false
        } else {
            insert_unique(&mut self.genres, genre)
        }
    }

    /// Set the year range; bounds are swapped if given in reverse.
    pub fn set_year_range(&mut self, range: Option<(i32, i32)>) {
        self.year_range = range.map(|(a, b)| if a <= b { (a, b) } else { (b, a) });
    }

    /// Set the minimum rating, clamped to `0..=10`.
    pub fn set_min_rating(&mut self, rating: Option<f64>) {
        self.min_rating = rating.map(|r| r.clamp(0.0, 10.0));
    }

    /// Restrict to one kind.
    pub fn set_kind(&mut self, kind: Option<ContentKind>) {
        self.kind = kind;
    }

    /// Change sort order.
    pub fn set_sort(&mut self, sort_by: SortBy) {
        self.sort_by = sort_by;
    }

    /// Clear all filters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether any filter narrows the results.
    pub fn is_active(&self) -> bool {
        !self.genres.is_empty()
            || self.year_range.is_some()
            || self.min_rating.is_some()
            || self.kind.is_some()
    }
}
