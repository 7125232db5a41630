//! Startup seeding.

use crate::mock;
use crate::storage::keys;
use crate::store::AppStore;
use crate::store::sections::ContentSectionState;
use crate::store::theme::ThemeState;

/// Seed collections from the built-in data and reload the persisted session.
///
/// Returns whether a session was restored.
pub fn bootstrap(store: &mut AppStore) -> bool {
    let now = store.now();

    store.catalog.set_movies(mock::movies());
    store.catalog.set_series(mock::series());
    store.catalog.set_games(mock::games());
    store.catalog.refresh_highlights(store.limits.highlight_size);

    store.reels.set_reels(mock::reels());
    store.subscription.set_plans(mock::plans());
    store.achievements.seed(mock::achievements());
    store.sections = ContentSectionState::from_sections(mock::sections(now));

    store.notifications.seed(mock::notifications(now));

    let persistence = store.persistence().clone();
    store.theme = persistence.load(keys::THEME, ThemeState::default());
    store.search.recent = persistence.load(keys::RECENT_SEARCHES, Vec::new());

    let user_id: Option<String> = persistence.load(keys::USER, None);
    let restored = match user_id {
        Some(id) => {
            let found = store.restore_user_data(&id);
            if !found {
                tracing::warn!(user = %id, "Stored session has no profile, signing out");
                persistence.remove(keys::USER);
            }
            found
        }
        None => false,
    };

    store.refresh_sections();

    tracing::info!(
        content = store.catalog.len(),
        notifications = store.notifications.items.len(),
        restored,
        "Store initialized"
    );
    restored
}
