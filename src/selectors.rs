//! Pure views over the store.
//!
//! Nothing here mutates state or reads a clock; identical inputs always give
//! identically ordered outputs. All sorts are stable, so ties keep catalog
//! order.

use crate::models::{
    ContentItem, Notification, Plan, PlanLimits, PlanTier, Subscription, SubscriptionStatus,
    WatchProgress,
};
use crate::store::filters::{FilterState, SortBy};
use crate::store::progress::WatchProgressState;
use chrono::Datelike;
use std::collections::{BTreeMap, BTreeSet};

/// Maximum number of recommendations returned.
pub const RECOMMENDATION_LIMIT: usize = 20;
/// Weight of each genre shared with the watch history.
pub const GENRE_WEIGHT: f64 = 0.3;
/// Weight of the rating.
pub const RATING_WEIGHT: f64 = 0.7;
/// Rating at which content is recommended regardless of genre.
pub const HIGH_RATING_THRESHOLD: f64 = 8.0;

/// Highest rated first.
pub fn trending<'a>(items: &[ContentItem<'a>], n: usize) -> Vec<ContentItem<'a>> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| b.rating().total_cmp(&a.rating()));
    sorted.truncate(n);
    sorted
}

/// Highest rated first, limited to content rated at least
/// [`HIGH_RATING_THRESHOLD`].
pub fn top_rated<'a>(items: &[ContentItem<'a>], n: usize) -> Vec<ContentItem<'a>> {
    let high: Vec<ContentItem<'a>> = items
        .iter()
        .copied()
        .filter(|i| i.rating() >= HIGH_RATING_THRESHOLD)
        .collect();
    trending(&high, n)
}

/// Newest release first.
pub fn new_releases<'a>(items: &[ContentItem<'a>], n: usize) -> Vec<ContentItem<'a>> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| b.release_date().cmp(&a.release_date()));
    sorted.truncate(n);
    sorted
}

/// A scored recommendation.
#[derive(Debug, Clone, Copy)]
pub struct Recommendation<'a> {
    /// Recommended item.
    pub item: ContentItem<'a>,
    /// Ranking score.
    pub score: f64,
    /// Number of the item's genres that appear in the watch history.
    pub shared_genres: usize,
}

/// How often each genre occurs across the watched items.
pub fn genre_frequency(catalog: &[ContentItem<'_>], history: &[String]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for id in history {
        if let Some(item) = catalog.iter().find(|i| i.id() == id) {
            for genre in item.genres() {
                *counts.entry(genre.clone()).or_insert(0) += 1;
            }
        }
    }
    counts
}

/// `shared_genres * 0.3 + rating * 0.7`.
pub fn recommendation_score(shared_genres: usize, rating: f64) -> f64 {
    shared_genres as f64 * GENRE_WEIGHT + rating * RATING_WEIGHT
}

/// Recommendations from watch history and favorites, capped at
/// [`RECOMMENDATION_LIMIT`].
pub fn recommendations<'a>(
    catalog: &[ContentItem<'a>],
    history: &[String],
    favorites: &[String],
) -> Vec<Recommendation<'a>> {
    recommend(catalog, history, favorites, RECOMMENDATION_LIMIT)
}

/// Score every item that is neither watched nor a favorite. Items qualify by
/// sharing a genre with the history or by a high rating. Highest score first.
pub fn recommend<'a>(
    catalog: &[ContentItem<'a>],
    history: &[String],
    favorites: &[String],
    limit: usize,
) -> Vec<Recommendation<'a>> {
    let frequency = genre_frequency(catalog, history);

    let mut scored: Vec<Recommendation<'a>> = catalog
        .iter()
        .filter(|item| {
            let id = item.id();
            !history.iter().any(|h| h == id) && !favorites.iter().any(|f| f == id)
        })
        .filter_map(|item| {
            let shared_genres = item
                .genres()
                .iter()
                .filter(|g| frequency.contains_key(*g))
                .count();
            let qualifies = shared_genres > 0 || item.rating() >= HIGH_RATING_THRESHOLD;
            qualifies.then(|| Recommendation {
                item: *item,
                score: recommendation_score(shared_genres, item.rating()),
                shared_genres,
            })
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(limit);
    scored
}

/// Items sharing genres with `content_id`, most overlap first, then rating.
pub fn similar_content<'a>(
    catalog: &[ContentItem<'a>],
    content_id: &str,
    n: usize,
) -> Vec<ContentItem<'a>> {
    let Some(target) = catalog.iter().find(|i| i.id() == content_id) else {
        return Vec::new();
    };

    let mut similar: Vec<(usize, ContentItem<'a>)> = catalog
        .iter()
        .filter(|i| i.id() != content_id)
        .map(|i| {
            let overlap = i
                .genres()
                .iter()
                .filter(|g| target.genres().contains(*g))
                .count();
            (overlap, *i)
        })
        .filter(|(overlap, _)| *overlap > 0)
        .collect();

    similar.sort_by(|(oa, a), (ob, b)| ob.cmp(oa).then(b.rating().total_cmp(&a.rating())));
    similar.into_iter().take(n).map(|(_, i)| i).collect()
}

/// Ids of content that requires a paid plan.
pub fn restricted_content(catalog: &[ContentItem<'_>]) -> BTreeSet<String> {
    catalog
        .iter()
        .filter(|i| i.is_premium())
        .map(|i| i.id().to_string())
        .collect()
}

/// Whether the subscription grants access to `content_id`.
///
/// Requires an active subscription; a free plan (or a plan that cannot be
/// found) additionally excludes restricted content.
pub fn can_access_content(
    subscription: Option<&Subscription>,
    plans: &[Plan],
    restricted: &BTreeSet<String>,
    content_id: &str,
) -> bool {
    let Some(subscription) = subscription else {
        return false;
    };
    if subscription.status != SubscriptionStatus::Active {
        return false;
    }

    let is_free = plans
        .iter()
        .find(|p| p.id == subscription.plan_id)
        .is_none_or(|p| p.tier == PlanTier::Free);

    !is_free || !restricted.contains(content_id)
}

/// Limits of the active plan, or free limits without one.
pub fn plan_limits(subscription: Option<&Subscription>, plans: &[Plan]) -> PlanLimits {
    subscription
        .filter(|s| s.status == SubscriptionStatus::Active)
        .and_then(|s| plans.iter().find(|p| p.id == s.plan_id))
        .map(|p| p.limits.clone())
        .unwrap_or_else(PlanLimits::free)
}

/// In-progress entries, most recently watched first.
pub fn continue_watching(progress: &WatchProgressState, max_items: usize) -> Vec<&WatchProgress> {
    let mut entries: Vec<&WatchProgress> = progress
        .entries
        .values()
        .filter(|e| e.is_in_progress())
        .collect();
    entries.sort_by(|a, b| b.last_watched.cmp(&a.last_watched));
    entries.truncate(max_items);
    entries
}

/// Apply browse filters and sort order.
pub fn apply_filters<'a>(items: &[ContentItem<'a>], filters: &FilterState) -> Vec<ContentItem<'a>> {
    let mut matched: Vec<ContentItem<'a>> = items
        .iter()
        .copied()
        .filter(|i| filters.kind.is_none_or(|k| i.kind() == k))
        .filter(|i| filters.genres.is_empty() || i.genres().iter().any(|g| filters.genres.contains(g)))
        .filter(|i| filters.min_rating.is_none_or(|min| i.rating() >= min))
        .filter(|i| {
            filters.year_range.is_none_or(|(from, to)| {
                let year = i.release_date().year();
                year >= from && year <= to
            })
        })
        .collect();

    match filters.sort_by {
        SortBy::Relevance => {}
        SortBy::Rating => matched.sort_by(|a, b| b.rating().total_cmp(&a.rating())),
        SortBy::ReleaseDate => matched.sort_by(|a, b| b.release_date().cmp(&a.release_date())),
        SortBy::Title => matched.sort_by_key(|i| i.title().to_lowercase()),
        SortBy::Popularity => matched.sort_by(|a, b| b.views().cmp(&a.views())),
    }
    matched
}

/// Case-insensitive match on title, genre or cast.
pub fn search_catalog<'a>(items: &[ContentItem<'a>], query: &str) -> Vec<ContentItem<'a>> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    items
        .iter()
        .copied()
        .filter(|i| {
            i.title().to_lowercase().contains(&query)
                || i.genres().iter().any(|g| g.to_lowercase().contains(&query))
                || i.cast().iter().any(|c| c.to_lowercase().contains(&query))
        })
        .collect()
}

/// Unread notifications counted from scratch.
pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.is_read).count()
}
