//! Movies, series and games.

use crate::models::{ContentItem, Game, Movie, Series};
use crate::selectors;
use serde::{Deserialize, Serialize};

/// Catalog collections plus the highlight rows derived from them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogState {
    /// Movies in catalog order.
    pub movies: Vec<Movie>,
    /// Series in catalog order.
    pub series: Vec<Series>,
    /// Games in catalog order.
    pub games: Vec<Game>,
    /// Ids of trending content.
    pub trending: Vec<String>,
    /// Ids of top-rated content.
    pub top_rated: Vec<String>,
    /// Ids of the newest releases.
    pub new_releases: Vec<String>,
    /// Id of the hero banner item.
    pub featured: Option<String>,
}

macro_rules! keyed_ops {
    ($field:ident, $ty:ty, $set:ident, $add:ident, $update:ident, $remove:ident, $get:ident) => {
        /// Replace the whole collection.
        pub fn $set(&mut self, items: Vec<$ty>) {
            self.$field = items;
        }

        /// Append an item unless its id is already present.
        pub fn $add(&mut self, item: $ty) -> bool {
            if self.$field.iter().any(|existing| existing.id == item.id) {
                return false;
            }
            self.$field.push(item);
            true
        }

        /// Replace the item with the same id.
        pub fn $update(&mut self, item: $ty) -> bool {
            match self.$field.iter_mut().find(|existing| existing.id == item.id) {
                Some(existing) => {
                    *existing = item;
                    true
                }
                None => false,
            }
        }

        /// Remove the item with `id`.
        pub fn $remove(&mut self, id: &str) -> bool {
            let before = self.$field.len();
            self.$field.retain(|existing| existing.id != id);
            self.$field.len() != before
        }

        /// Look up an item by id.
        pub fn $get(&self, id: &str) -> Option<&$ty> {
            self.$field.iter().find(|existing| existing.id == id)
        }
    };
}

impl CatalogState {
    keyed_ops!(movies, Movie, set_movies, add_movie, update_movie, remove_movie, movie);
    keyed_ops!(series, Series, set_series, add_series, update_series, remove_series, show);
    keyed_ops!(games, Game, set_games, add_game, update_game, remove_game, game);

    /// Every watchable item (movies then series), in catalog order.
    pub fn watchables(&self) -> Vec<ContentItem<'_>> {
        self.movies
            .iter()
            .map(ContentItem::Movie)
            .chain(self.series.iter().map(ContentItem::Series))
            .collect()
    }

    /// Every item including games, in catalog order.
    pub fn all(&self) -> Vec<ContentItem<'_>> {
        let mut items = self.watchables();
        items.extend(self.games.iter().map(ContentItem::Game));
        items
    }

    /// Look up any item by id.
    pub fn content(&self, id: &str) -> Option<ContentItem<'_>> {
        self.movie(id)
            .map(ContentItem::Movie)
            .or_else(|| self.show(id).map(ContentItem::Series))
            .or_else(|| self.game(id).map(ContentItem::Game))
    }

    /// Sorted, de-duplicated genres across the catalog.
    pub fn genres(&self) -> Vec<String> {
        let mut genres: Vec<String> = self
            .all()
            .iter()
            .flat_map(|item| item.genres().iter().cloned())
            .collect();
        genres.sort();
        genres.dedup();
        genres
    }

    /// Recompute the highlight rows from the current collections.
    pub fn refresh_highlights(&mut self, size: usize) {
        let items = self.watchables();
        let trending = ids(selectors::trending(&items, size));
        let top_rated = ids(selectors::top_rated(&items, size));
        let new_releases = ids(selectors::new_releases(&items, size));
        let featured = trending.first().cloned();

        self.trending = trending;
        self.top_rated = top_rated;
        self.new_releases = new_releases;
        self.featured = featured;
    }

    /// Number of items across all collections.
    pub fn len(&self) -> usize {
        self.movies.len() + self.series.len() + self.games.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn ids(items: Vec<ContentItem<'_>>) -> Vec<String> {
    items.iter().map(|item| item.id().to_string()).collect()
}
