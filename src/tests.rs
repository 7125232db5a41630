use crate::bootstrap;
use crate::clock::ManualClock;
use crate::config::{Config, StorageBackend};
use crate::error::AppError;
use crate::models::{
    ContentItem, ContentKind, ContentSection, Movie, NotificationKind, PaymentMethod,
    PaymentMethodKind, PlaybackSettingsPatch, SectionKind, Settings, SettingsPatch,
    SubscriptionStatus, TransactionStatus, VideoQuality, WatchProgress,
};
use crate::models::social::{Activity, ActivityKind, Review};
use crate::payment::{FixedOutcome, NoDelay, PaymentRequest, PaymentSimulator};
use crate::selectors;
use crate::storage::{KeyValueStore, MemoryStore, Persistence, SqliteStore, keys};
use crate::store::AppStore;
use crate::store::achievements::AchievementState;
use crate::store::catalog::CatalogState;
use crate::store::filters::{FilterState, SortBy};
use crate::store::notifications::NotificationState;
use crate::store::progress::{ProgressUpdate, WatchProgressState};
use crate::store::reels::ReelState;
use crate::store::search::{RECENT_SEARCH_CAP, SearchState};
use crate::store::sections::ContentSectionState;
use crate::store::social::SocialState;
use crate::store::theme::{ThemeMode, ThemeState};
use crate::store::user::UserState;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use std::sync::Arc;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
}

fn test_store_with(persistence: Persistence) -> (AppStore, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(start()));
    let mut store = AppStore::new(&Config::default(), persistence, clock.clone());
    bootstrap(&mut store);
    (store, clock)
}

fn test_store() -> (AppStore, Arc<ManualClock>) {
    test_store_with(Persistence::memory())
}

fn signed_in_store() -> (AppStore, Arc<ManualClock>) {
    let (mut store, clock) = test_store();
    store.login("alice@example.com", "secret").unwrap();
    (store, clock)
}

fn movie(id: &str, genres: &[&str], rating: f64) -> Movie {
    Movie {
        id: id.to_string(),
        title: format!("Movie {}", id),
        description: String::new(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        rating,
        release_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        duration: 100,
        maturity_rating: "PG".to_string(),
        cast: Vec::new(),
        director: None,
        views: 0,
        is_premium: false,
    }
}

fn card() -> PaymentMethod {
    PaymentMethod {
        id: "card-1".to_string(),
        kind: PaymentMethodKind::Card,
        label: "Visa".to_string(),
        last4: Some("4242".to_string()),
        is_default: false,
    }
}

fn section(id: &str, content_ids: &[&str], max_items: usize, order: u32) -> ContentSection {
    ContentSection {
        id: id.to_string(),
        title: id.to_string(),
        kind: SectionKind::Curated,
        content_ids: content_ids.iter().map(|c| c.to_string()).collect(),
        max_items,
        last_updated: start(),
        is_visible: true,
        order,
    }
}

fn watch(store: &mut AppStore, content_id: &str, current_time: f64, duration: f64) -> WatchProgress {
    store.record_progress(ProgressUpdate {
        content_id,
        season_id: None,
        episode_id: None,
        current_time,
        duration,
    })
}

fn ids(items: &[ContentItem<'_>]) -> Vec<String> {
    items.iter().map(|i| i.id().to_string()).collect()
}

// ========== SELECTORS ==========

#[test]
fn recommendation_score_counts_shared_genres() {
    let mut catalog = CatalogState::default();
    catalog.set_movies(vec![
        movie("m1", &["Drama"], 6.0),
        movie("m2", &["Drama", "Thriller"], 6.0),
        movie("m3", &["Thriller"], 7.0),
    ]);
    let history = vec!["m1".to_string(), "m2".to_string()];

    let recs = selectors::recommendations(&catalog.watchables(), &history, &[]);

    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].item.id(), "m3");
    assert_eq!(recs[0].shared_genres, 1);
    assert!((recs[0].score - 5.2).abs() < 1e-9);
}

#[test]
fn recommendations_skip_watched_and_favorites() {
    let mut catalog = CatalogState::default();
    catalog.set_movies(vec![
        movie("m1", &["Drama"], 6.0),
        movie("m2", &["Comedy"], 9.0),
        movie("m3", &["Drama"], 7.0),
        movie("m4", &["Horror"], 5.0),
        movie("m5", &["Drama"], 6.5),
    ]);
    let history = vec!["m1".to_string()];
    let favorites = vec!["m3".to_string()];

    let first = selectors::recommendations(&catalog.watchables(), &history, &favorites);
    let second = selectors::recommendations(&catalog.watchables(), &history, &favorites);

    let first_ids: Vec<&str> = first.iter().map(|r| r.item.id()).collect();
    let second_ids: Vec<&str> = second.iter().map(|r| r.item.id()).collect();
    // m2: 0 * 0.3 + 9.0 * 0.7 = 6.3; m5: 1 * 0.3 + 6.5 * 0.7 = 4.85
    assert_eq!(first_ids, vec!["m2", "m5"]);
    assert_eq!(first_ids, second_ids);
}

#[test]
fn recommendations_respect_limit() {
    let mut catalog = CatalogState::default();
    catalog.set_movies((0..30).map(|i| movie(&format!("m{}", i), &["Drama"], 9.0)).collect());

    let recs = selectors::recommend(&catalog.watchables(), &[], &[], 5);
    assert_eq!(recs.len(), 5);
    assert_eq!(recs[0].item.id(), "m0");
}

#[test]
fn highlights_follow_rating_and_date() {
    let (store, _) = test_store();

    assert_eq!(store.catalog.trending[0], "m4");
    assert_eq!(store.catalog.featured.as_deref(), Some("m4"));
    assert_eq!(store.catalog.top_rated, vec!["m4", "s1", "m1", "s3", "m6"]);
    assert_eq!(&store.catalog.new_releases[..3], &["m7", "s3", "m4"]);
}

#[test]
fn similar_content_ranks_by_genre_overlap() {
    let mut catalog = CatalogState::default();
    catalog.set_movies(vec![
        movie("m1", &["Drama", "Thriller"], 7.0),
        movie("m2", &["Drama"], 9.0),
        movie("m3", &["Drama", "Thriller"], 6.0),
        movie("m4", &["Comedy"], 9.5),
    ]);

    let similar = selectors::similar_content(&catalog.watchables(), "m1", 10);
    assert_eq!(ids(&similar), vec!["m3", "m2"]);
}

#[test]
fn filters_narrow_and_sort() {
    let (store, _) = test_store();
    let mut filters = FilterState::default();
    assert!(!filters.is_active());

    filters.set_kind(Some(ContentKind::Movie));
    filters.set_min_rating(Some(8.0));
    filters.set_sort(SortBy::Rating);
    let matched = selectors::apply_filters(&store.catalog.all(), &filters);
    assert_eq!(ids(&matched), vec!["m4", "m1", "m6"]);

    filters.set_year_range(Some((2024, 2021)));
    assert_eq!(filters.year_range, Some((2021, 2024)));
    filters.set_min_rating(Some(42.0));
    assert_eq!(filters.min_rating, Some(10.0));

    filters.reset();
    assert!(!filters.is_active());
    assert!(filters.toggle_genre("Drama"));
    assert!(!filters.toggle_genre("Drama"));
}

#[test]
fn search_matches_title_genre_and_cast() {
    let (mut store, _) = test_store();

    let results = store.search("  thriller ");
    assert!(results.contains(&"m2".to_string()));
    assert!(results.contains(&"s3".to_string()));

    assert!(store.search("kai brooks").contains(&"m4".to_string()));
    assert!(store.search("").is_empty());
    assert_eq!(store.search.recent[0], "kai brooks");

    let saved: Vec<String> = store.persistence().load(keys::RECENT_SEARCHES, Vec::new());
    assert_eq!(saved, store.search.recent);
}

// ========== USER ==========

#[test]
fn favorites_stay_unique_and_toggle_back() {
    let (mut store, _) = signed_in_store();

    assert!(store.user.add_favorite("m1"));
    assert!(!store.user.add_favorite("m1"));
    assert_eq!(store.user.favorites(), &["m1".to_string()]);

    assert!(!store.toggle_favorite("m1"));
    assert!(store.toggle_favorite("m1"));
    assert_eq!(store.user.favorites(), &["m1".to_string()]);

    assert!(store.toggle_watchlist("s1"));
    assert!(store.user.in_watchlist("s1"));
    assert!(!store.toggle_watchlist("s1"));
    assert!(!store.user.in_watchlist("s1"));
}

#[test]
fn library_ops_are_noops_when_signed_out() {
    let mut state = UserState::default();
    assert!(!state.add_favorite("m1"));
    assert!(!state.add_to_history("m1"));
    assert!(state.history().is_empty());
    assert!(state.login("", "pw", start()).is_none());
    assert!(state.login("a@b.c", "", start()).is_none());
}

#[test]
fn login_id_is_stable_per_email() {
    let mut a = UserState::default();
    let mut b = UserState::default();
    let id_a = a.login("Bob@Example.com", "x", start()).unwrap().id.clone();
    let id_b = b.login("bob@example.com", "y", start()).unwrap().id.clone();
    assert_eq!(id_a, id_b);
    assert_eq!(a.user.as_ref().unwrap().name, "Bob");
}

#[test]
fn watch_history_is_most_recent_first_and_capped() {
    let mut state = UserState {
        history_cap: 3,
        ..UserState::default()
    };
    state.login("a@b.c", "pw", start());

    for id in ["a", "b", "c", "d", "b"] {
        state.add_to_history(id);
    }
    assert_eq!(state.history(), &["b", "d", "c"]);

    assert!(state.remove_from_history("d"));
    assert!(state.clear_history());
    assert!(!state.clear_history());
}

#[test]
fn recent_searches_dedupe_case_insensitively() {
    let mut search = SearchState::default();
    for i in 0..12 {
        search.add_recent_search(&format!("q{}", i));
    }
    assert_eq!(search.recent.len(), RECENT_SEARCH_CAP);
    assert_eq!(search.recent[0], "q11");

    assert!(search.add_recent_search("Q5"));
    assert_eq!(search.recent[0], "Q5");
    assert_eq!(search.recent.len(), RECENT_SEARCH_CAP);
    assert_eq!(search.recent.iter().filter(|q| q.eq_ignore_ascii_case("q5")).count(), 1);

    assert!(!search.add_recent_search("   "));
    assert!(search.remove_recent_search("q5"));
}

// ========== PROGRESS ==========

#[test]
fn progress_key_and_clamping() {
    let mut progress = WatchProgressState::default();

    let entry = progress.update(
        ProgressUpdate {
            content_id: "s1",
            season_id: Some("s1-s1"),
            episode_id: Some("s1-s1-e2"),
            current_time: 9000.0,
            duration: 3000.0,
        },
        start(),
    );
    assert_eq!(entry.entry_key(), "s1-s1-s1-s1-s1-e2");
    assert_eq!(entry.current_time, 3000.0);
    assert!(entry.completed);

    let entry = progress.update(
        ProgressUpdate {
            content_id: "m1",
            season_id: None,
            episode_id: None,
            current_time: 100.0,
            duration: 0.0,
        },
        start(),
    );
    assert_eq!(entry.fraction(), 0.0);
    assert!(!entry.completed);
    assert_eq!(progress.len(), 2);
}

#[test]
fn partial_episode_keys_stay_distinct() {
    assert_eq!(WatchProgress::key("s1", None, None), "s1");
    assert_eq!(WatchProgress::key("s1", Some("s1-s1"), None), "s1-s1-s1");
    assert_eq!(WatchProgress::key("s1", None, Some("s1-s1-e1")), "s1-s1-s1-e1");

    let mut progress = WatchProgressState::default();
    for (season_id, episode_id) in [(None, None), (Some("s1-s1"), None), (None, Some("s1-s1-e1"))] {
        progress.update(
            ProgressUpdate {
                content_id: "s1",
                season_id,
                episode_id,
                current_time: 60.0,
                duration: 600.0,
            },
            start(),
        );
    }
    assert_eq!(progress.len(), 3);
    assert_eq!(progress.entries_for("s1").len(), 3);
}

#[test]
fn finishing_an_entry_counts_once() {
    let (mut store, _) = signed_in_store();
    watch(&mut store, "m1", 1200.0, 6000.0);
    assert_eq!(store.continue_watching().len(), 1);

    assert!(store.finish_progress("m1"));
    let entry = store.progress.get("m1").unwrap();
    assert!(entry.completed);
    assert_eq!(entry.current_time, 6000.0);
    assert!(store.continue_watching().is_empty());
    assert_eq!(store.achievements.get("completionist").unwrap().progress, 1);

    assert!(!store.finish_progress("m1"));
    assert!(!store.finish_progress("missing"));
    assert_eq!(store.achievements.get("completionist").unwrap().progress, 1);
}

#[test]
fn continue_watching_needs_partial_progress() {
    let (mut store, clock) = signed_in_store();

    watch(&mut store, "m1", 300.0, 6000.0);
    clock.advance(Duration::minutes(1));
    watch(&mut store, "m2", 3000.0, 6000.0);
    clock.advance(Duration::minutes(1));
    watch(&mut store, "m3", 6000.0, 6000.0);
    clock.advance(Duration::minutes(1));
    watch(&mut store, "m5", 1200.0, 6000.0);

    let ids: Vec<&str> = store
        .continue_watching()
        .iter()
        .map(|p| p.content_id.as_str())
        .collect();
    assert_eq!(ids, vec!["m5", "m2"]);

    let row = store.sections.section("continue-watching").unwrap();
    assert_eq!(row.content_ids, vec!["m5", "m2"]);
}

#[test]
fn record_progress_updates_history() {
    let (mut store, _) = signed_in_store();

    watch(&mut store, "m1", 100.0, 1000.0);
    watch(&mut store, "m2", 100.0, 1000.0);
    watch(&mut store, "m1", 200.0, 1000.0);

    assert_eq!(store.user.history(), &["m1", "m2"]);
    assert_eq!(store.progress.get("m1").unwrap().current_time, 200.0);
}

// ========== ACHIEVEMENTS ==========

#[test]
fn achievement_unlocks_exactly_once() {
    let mut state = AchievementState::default();
    state.seed(crate::mock::achievements());

    assert!(state.update_progress("first-watch", 1, start()));
    let unlocked_at = state.get("first-watch").unwrap().unlocked_at;
    assert_eq!(state.total_points, 10);

    let later = start() + Duration::days(1);
    assert!(!state.update_progress("first-watch", 5, later));
    assert!(!state.unlock("first-watch", later));
    assert_eq!(state.get("first-watch").unwrap().unlocked_at, unlocked_at);
    assert_eq!(state.total_points, 10);
    assert_eq!(state.take_recent_unlocks(), vec!["first-watch"]);
    assert!(state.take_recent_unlocks().is_empty());
}

#[test]
fn achievement_level_follows_points() {
    let mut state = AchievementState::default();
    state.seed(crate::mock::achievements());
    assert_eq!(state.level, 1);

    // 50 + 75 = 125 points
    state.unlock("binge-watcher", start());
    state.unlock("completionist", start());
    assert_eq!(state.total_points, 125);
    assert_eq!(state.level, 2);

    state.reset();
    assert_eq!(state.total_points, 0);
    assert_eq!(state.level, 1);
    assert_eq!(state.unlocked().count(), 0);
}

#[test]
fn first_watch_unlock_sends_notification() {
    let (mut store, _) = signed_in_store();
    let unread_before = store.notifications.unread_count;

    watch(&mut store, "m1", 100.0, 1000.0);

    assert!(store.achievements.get("first-watch").unwrap().is_unlocked());
    assert_eq!(store.notifications.items[0].kind, NotificationKind::Achievement);
    assert_eq!(store.notifications.unread_count, unread_before + 1);

    watch(&mut store, "m1", 200.0, 1000.0);
    let achievement_notes = store
        .notifications
        .items
        .iter()
        .filter(|n| n.kind == NotificationKind::Achievement)
        .count();
    assert_eq!(achievement_notes, 1);
}

// ========== SUBSCRIPTION ==========

#[test]
fn login_starts_free_plan() {
    let (store, _) = signed_in_store();
    let sub = store.subscription.subscription.as_ref().unwrap();
    assert_eq!(sub.plan_id, "free");
    assert_eq!(sub.status, SubscriptionStatus::Active);
    assert_eq!(sub.current_period_end, start() + Duration::days(30));
}

#[test]
fn completed_payment_switches_plan() {
    let (mut store, clock) = signed_in_store();
    clock.advance(Duration::hours(1));
    let now = store.now();

    assert!(store.initiate_payment("premium", card(), true));
    assert!(store.process_payment());
    let tx = store.complete_payment().unwrap();

    assert_eq!(tx.status, TransactionStatus::Completed);
    assert_eq!(tx.amount_cents, 1999);
    assert_eq!(store.subscription.transactions.len(), 1);

    let sub = store.subscription.subscription.as_ref().unwrap();
    assert_eq!(sub.plan_id, "premium");
    assert_eq!(sub.current_period_end, now + Duration::days(30));
    assert_eq!(
        store.subscription.default_payment_method().map(|m| m.id.as_str()),
        Some("card-1")
    );
    assert!(store.subscription.payment.current.is_none());
    assert_eq!(store.notifications.items[0].kind, NotificationKind::Subscription);
}

#[test]
fn failed_payment_keeps_subscription() {
    let (mut store, _) = signed_in_store();

    store.initiate_payment("standard", card(), false);
    store.process_payment();
    let tx = store.fail_payment("Card declined").unwrap();

    assert_eq!(tx.status, TransactionStatus::Failed);
    assert_eq!(tx.error.as_deref(), Some("Card declined"));
    assert_eq!(store.subscription.subscription.as_ref().unwrap().plan_id, "free");
    assert_eq!(store.subscription.payment.error.as_deref(), Some("Card declined"));
    assert!(store.subscription.payment_methods.is_empty());
}

#[test]
fn payment_transitions_are_enforced() {
    let (mut store, _) = signed_in_store();

    assert!(!store.initiate_payment("platinum", card(), false));
    assert!(store.complete_payment().is_none());

    assert!(store.initiate_payment("basic", card(), false));
    assert!(!store.initiate_payment("premium", card(), false));
    assert!(store.complete_payment().is_none());
    assert!(store.fail_payment("nope").is_none());

    let cancelled = store.cancel_payment().unwrap();
    assert_eq!(cancelled.status, TransactionStatus::Cancelled);
    assert!(store.subscription.payment.current.is_none());

    store.initiate_payment("basic", card(), false);
    store.process_payment();
    assert!(!store.process_payment());
    assert!(store.cancel_payment().is_none());
    assert!(store.complete_payment().is_some());
}

#[test]
fn transaction_status_transitions() {
    use TransactionStatus::*;
    assert!(Pending.can_transition_to(Processing));
    assert!(Pending.can_transition_to(Cancelled));
    assert!(Processing.can_transition_to(Completed));
    assert!(Processing.can_transition_to(Failed));
    assert!(!Pending.can_transition_to(Completed));
    assert!(!Processing.can_transition_to(Cancelled));
    assert!(!Completed.can_transition_to(Failed));
    assert!(Failed.is_terminal());
}

#[test]
fn cancel_and_expire_subscription() {
    let (mut store, clock) = signed_in_store();

    assert!(store.cancel_subscription());
    assert!(!store.cancel_subscription());
    assert!(store.reactivate_subscription());
    assert!(store.cancel_subscription());

    clock.advance(Duration::days(31));
    let now = store.now();
    assert!(store.subscription.expire_if_due(now));
    let sub = store.subscription.subscription.as_ref().unwrap();
    assert_eq!(sub.status, SubscriptionStatus::Cancelled);
    assert!(!store.reactivate_subscription());
}

#[test]
fn access_depends_on_plan_and_status() {
    let (mut store, _) = test_store();
    assert!(!store.can_access("m1"));

    store.login("alice@example.com", "secret");
    assert!(store.can_access("m1"));
    assert!(!store.can_access("m4"));
    assert!(store.plan_limits().ads);

    store.initiate_payment("premium", card(), false);
    store.process_payment();
    store.complete_payment();
    assert!(store.can_access("m4"));
    assert_eq!(store.plan_limits().max_streams, 4);

    store.subscription.subscription.as_mut().unwrap().status = SubscriptionStatus::Expired;
    assert!(!store.can_access("m1"));
    assert!(store.plan_limits().ads);
}

#[test]
fn default_payment_method_is_unique() {
    let (mut store, _) = signed_in_store();
    let subs = &mut store.subscription;

    let mut first = card();
    first.is_default = true;
    subs.add_payment_method(first);

    let mut second = card();
    second.id = "card-2".to_string();
    second.is_default = true;
    subs.add_payment_method(second);

    assert_eq!(subs.payment_methods.iter().filter(|m| m.is_default).count(), 1);
    assert_eq!(subs.default_payment_method().unwrap().id, "card-2");

    assert!(subs.set_default_payment_method("card-1"));
    assert_eq!(subs.default_payment_method().unwrap().id, "card-1");
    assert!(!subs.set_default_payment_method("missing"));
}

// ========== SETTINGS ==========

#[test]
fn settings_patch_merges_one_section() {
    let (mut store, _) = signed_in_store();

    store.update_settings(SettingsPatch::Playback(PlaybackSettingsPatch {
        quality: Some(VideoQuality::Uhd),
        ..Default::default()
    }));

    let settings = &store.settings.settings;
    assert_eq!(settings.playback.quality, VideoQuality::Uhd);
    assert!(settings.playback.autoplay_next);
    assert_eq!(settings.privacy, Settings::default().privacy);

    let patch: SettingsPatch =
        serde_json::from_str(r#"{"section":"privacy","patch":{"publicProfile":false}}"#).unwrap();
    store.update_settings(patch);
    assert!(!store.settings.settings.privacy.public_profile);
    assert!(store.settings.settings.privacy.show_online_status);
    assert_eq!(store.settings.settings.playback.quality, VideoQuality::Uhd);

    store.reset_settings();
    assert_eq!(store.settings.settings, Settings::default());
}

#[test]
fn settings_load_with_missing_fields() {
    let persistence = Persistence::memory();
    persistence
        .store()
        .set("settings_x", br#"{"playback":{"quality":"hd"}}"#)
        .unwrap();

    let settings: Settings = persistence.load("settings_x", Settings::default());
    assert_eq!(settings.playback.quality, VideoQuality::Hd);
    assert!(settings.playback.autoplay_next);
    assert_eq!(settings.downloads, Settings::default().downloads);
}

// ========== NOTIFICATIONS ==========

#[test]
fn mark_read_decrements_unread_once() {
    let (mut store, _) = test_store();
    assert_eq!(store.notifications.unread_count, 3);
    let id = store.notifications.items[0].id.clone();

    assert!(store.mark_notification_read(&id));
    assert_eq!(store.notifications.unread_count, 2);
    assert!(!store.mark_notification_read(&id));
    assert_eq!(store.notifications.unread_count, 2);
    assert!(!store.mark_notification_read("missing"));

    let unread_id = store.notifications.items[1].id.clone();
    assert!(store.notifications.remove(&unread_id));
    assert_eq!(store.notifications.unread_count, 1);
    assert!(store.notifications.remove(&id));
    assert_eq!(store.notifications.unread_count, 1);

    assert!(store.mark_all_notifications_read());
    assert_eq!(store.notifications.unread_count, 0);
    assert!(!store.mark_all_notifications_read());
    assert_eq!(
        store.notifications.unread_count,
        selectors::unread_count(&store.notifications.items)
    );
}

#[test]
fn notifications_are_newest_first_and_capped() {
    let (mut store, _) = test_store();
    store.notifications = NotificationState::with_cap(2);

    let a = store.notify(NotificationKind::System, "a", "", None);
    let b = store.notify(NotificationKind::System, "b", "", None);
    let c = store.notify(NotificationKind::Social, "c", "", Some("m1"));

    let ids: Vec<&str> = store.notifications.items.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec![c.as_str(), b.as_str()]);
    assert!(store.notifications.get(&a).is_none());
    assert_eq!(store.notifications.unread_count, 2);
}

#[test]
fn activities_are_newest_first_and_capped() {
    let mut social = SocialState {
        activity_cap: 3,
        ..SocialState::default()
    };

    for i in 0..5 {
        social.add_activity(Activity {
            id: format!("a{}", i),
            user_id: "u1".to_string(),
            kind: ActivityKind::Watched,
            content_id: Some("m1".to_string()),
            timestamp: start() + Duration::minutes(i),
        });
    }

    let ids: Vec<&str> = social.activities.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a4", "a3", "a2"]);
}

#[test]
fn welcome_notifications_are_seeded_newest_first() {
    let (store, _) = test_store();
    let items = &store.notifications.items;
    assert_eq!(items.len(), 3);
    assert!(items.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
}

// ========== SECTIONS ==========

#[test]
fn section_lookup_matches_rows() {
    let mut state = ContentSectionState::from_sections(vec![
        section("b", &["m1", "m2", "m1"], 5, 1),
        section("a", &["m2"], 2, 0),
    ]);
    assert_eq!(state.sections[0].id, "a");
    assert_eq!(state.section("b").unwrap().content_ids, vec!["m1", "m2"]);
    assert_eq!(state.content_lookup, state.rebuild_lookup());

    assert!(state.add_content("a", "m3", start()));
    assert!(state.add_content("a", "m4", start()));
    assert_eq!(state.section("a").unwrap().content_ids, vec!["m3", "m4"]);
    assert_eq!(state.sections_for("m2"), &["b".to_string()]);
    assert_eq!(state.content_lookup, state.rebuild_lookup());

    assert!(!state.add_content("a", "m4", start()));
    assert!(state.remove_content("b", "m1", start()));
    assert!(state.sections_for("m1").is_empty());
    assert_eq!(state.content_lookup, state.rebuild_lookup());

    state.set_content("b", vec!["m4".to_string(), "m4".to_string()], start());
    assert_eq!(state.sections_for("m4"), &["a".to_string(), "b".to_string()]);
    assert_eq!(state.content_lookup, state.rebuild_lookup());

    assert!(state.remove_section("a"));
    assert_eq!(state.sections_for("m4"), &["b".to_string()]);
    assert_eq!(state.content_lookup, state.rebuild_lookup());
}

#[test]
fn sections_reorder_and_hide() {
    let mut state = ContentSectionState::from_sections(vec![
        section("a", &[], 5, 0),
        section("b", &[], 5, 1),
        section("c", &[], 5, 2),
    ]);

    state.reorder(&["c".to_string(), "a".to_string()]);
    let order: Vec<&str> = state.sections.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(order, vec!["c", "a", "b"]);

    assert_eq!(state.toggle_visibility("a"), Some(false));
    assert_eq!(state.visible().count(), 2);
    assert_eq!(state.toggle_visibility("missing"), None);
}

#[test]
fn section_lookup_follows_display_order() {
    let mut state = ContentSectionState::from_sections(vec![
        section("a", &["m1"], 5, 0),
        section("b", &["m1"], 5, 1),
    ]);
    assert_eq!(state.sections_for("m1"), &["a".to_string(), "b".to_string()]);

    state.reorder(&["b".to_string(), "a".to_string()]);
    assert_eq!(state.sections_for("m1"), &["b".to_string(), "a".to_string()]);
    assert_eq!(state.content_lookup, state.rebuild_lookup());

    assert!(state.add_section(section("c", &["m1"], 5, 0)));
    assert_eq!(state.content_lookup, state.rebuild_lookup());

    state.set_content("a", vec!["m2".to_string()], start());
    state.set_content("a", vec!["m1".to_string()], start());
    assert_eq!(state.content_lookup, state.rebuild_lookup());
}

#[test]
fn derived_rows_are_filled_at_startup() {
    let (store, _) = test_store();
    let trending = store.sections.section("trending").unwrap();
    assert_eq!(trending.content_ids, store.catalog.trending);
    assert_eq!(
        store.sections.section("staff-picks").unwrap().content_ids,
        vec!["m1", "s1", "m6", "g2"]
    );
    assert_eq!(store.sections.content_lookup, store.sections.rebuild_lookup());
}

// ========== SOCIAL, REELS, THEME ==========

#[test]
fn watch_party_ends_when_host_leaves() {
    let mut social = SocialState::default();
    let party_id = social.create_party("u1", "m1", start()).id.clone();

    assert!(social.join_party(&party_id, "u2"));
    assert!(!social.join_party(&party_id, "u2"));
    assert!(social.send_party_message(&party_id, "u2", "hi", start()));
    assert!(!social.send_party_message(&party_id, "u3", "hi", start()));
    assert!(social.sync_playback(&party_id, 42.0, true));
    assert_eq!(social.party(&party_id).unwrap().current_time, 42.0);

    assert!(social.leave_party(&party_id, "u2"));
    assert!(social.party(&party_id).is_some());
    assert!(social.leave_party(&party_id, "u1"));
    assert!(social.party(&party_id).is_none());
}

#[test]
fn reviews_are_one_per_user_and_helpful_toggles() {
    let mut social = SocialState::default();
    let review = |id: &str, rating: f64| Review {
        id: id.to_string(),
        content_id: "m1".to_string(),
        user_id: "u1".to_string(),
        user_name: "Alice".to_string(),
        rating,
        text: String::new(),
        helpful_by: Vec::new(),
        helpful_count: 0,
        created_at: start(),
    };

    social.add_review(review("r1", 6.0));
    social.add_review(review("r2", 8.0));
    assert_eq!(social.reviews_for("m1").len(), 1);
    assert_eq!(social.average_rating("m1"), Some(8.0));

    assert!(social.toggle_helpful("r2", "u2"));
    assert_eq!(social.reviews[0].helpful_count, 1);
    assert!(!social.toggle_helpful("r2", "u2"));
    assert_eq!(social.reviews[0].helpful_count, 0);
}

#[test]
fn direct_messages_track_unread() {
    let mut social = SocialState::default();
    social.send_message("u1", "u2", "hey", start());
    social.send_message("u2", "u1", "yo", start());
    social.send_message("u1", "u2", "movie?", start());

    assert_eq!(social.conversation("u1", "u2").len(), 3);
    assert_eq!(social.unread_messages("u2"), 2);
    assert_eq!(social.mark_conversation_read("u2", "u1"), 2);
    assert_eq!(social.unread_messages("u2"), 0);
}

#[test]
fn reel_like_toggles_counter() {
    let mut reels = ReelState::default();
    reels.set_reels(crate::mock::reels());
    let likes = reels.get("r1").unwrap().likes;

    assert!(reels.toggle_like("r1"));
    assert_eq!(reels.get("r1").unwrap().likes, likes + 1);
    assert!(!reels.toggle_like("r1"));
    assert_eq!(reels.get("r1").unwrap().likes, likes);
    assert!(!reels.is_liked("r1"));
    assert!(!reels.toggle_like("missing"));

    assert!(reels.previous().is_some());
    assert_eq!(reels.current_index, 0);
    reels.next();
    reels.next();
    reels.next();
    reels.next();
    assert_eq!(reels.current_index, 3);
}

#[test]
fn theme_toggle_and_accent() {
    let mut theme = ThemeState::default();
    assert_eq!(theme.toggle(), ThemeMode::Light);
    assert_eq!(theme.toggle(), ThemeMode::Dark);
    theme.set_mode(ThemeMode::System);
    assert_eq!(theme.toggle(), ThemeMode::Dark);

    assert!(theme.set_accent("#1DB954"));
    assert_eq!(theme.accent, "#1db954");
    assert!(!theme.set_accent("red"));
    assert!(!theme.set_accent("#12345"));
    assert_eq!(theme.accent, "#1db954");
}

// ========== PERSISTENCE ==========

#[test]
fn persistence_swallows_quota_errors() {
    let persistence = Persistence::new(Arc::new(MemoryStore::with_quota(32)));

    persistence.save("small", &1u32);
    assert!(persistence.contains("small"));

    persistence.save("big", &"x".repeat(100));
    assert!(!persistence.contains("big"));
    assert_eq!(persistence.load("big", 7u32), 7);
}

#[test]
fn persistence_falls_back_on_malformed_json() {
    let persistence = Persistence::memory();
    persistence.store().set("broken", b"{not json").unwrap();

    assert!(persistence.try_load::<Settings>("broken").is_err());
    assert_eq!(persistence.load("broken", Settings::default()), Settings::default());
    assert_eq!(persistence.load::<Option<String>>("missing", None), None);
}

#[test]
fn sqlite_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("store.db");

    {
        let store = SqliteStore::open(&path).unwrap();
        store.set("b", b"2").unwrap();
        store.set("a", b"1").unwrap();
        store.set("a", b"3").unwrap();
        assert_eq!(store.get("a").unwrap(), Some(b"3".to_vec()));
        assert_eq!(store.keys().unwrap(), vec!["a", "b"]);
        store.remove("b").unwrap();
        store.remove("b").unwrap();
    }

    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.get("a").unwrap(), Some(b"3".to_vec()));
    assert_eq!(store.get("b").unwrap(), None);
}

#[test]
fn session_survives_restart() {
    let persistence = Persistence::new(Arc::new(SqliteStore::open_memory().unwrap()));

    let user_id = {
        let (mut store, _) = test_store_with(persistence.clone());
        let user = store.login("alice@example.com", "secret").unwrap();
        store.toggle_favorite("m1");
        watch(&mut store, "m2", 600.0, 6000.0);
        store.update_settings(SettingsPatch::Playback(PlaybackSettingsPatch {
            skip_intro: Some(true),
            ..Default::default()
        }));
        assert!(store.mark_all_notifications_read());
        store.set_theme(ThemeMode::Light);
        user.id
    };

    let clock = Arc::new(ManualClock::new(start()));
    let mut store = AppStore::new(&Config::default(), persistence, clock);
    assert!(bootstrap(&mut store));

    assert_eq!(store.user.user_id(), Some(user_id.as_str()));
    assert_eq!(store.user.favorites(), &["m1".to_string()]);
    assert_eq!(store.user.history(), &["m2".to_string()]);
    assert!(store.progress.get("m2").is_some());
    assert!(store.settings.settings.playback.skip_intro);
    assert!(store.achievements.get("first-watch").unwrap().is_unlocked());
    assert_eq!(store.achievements.total_points, 10);
    assert_eq!(store.subscription.subscription.as_ref().unwrap().plan_id, "free");
    assert_eq!(store.theme.mode, ThemeMode::Light);
    assert_eq!(store.notifications.items.len(), 4);
    assert_eq!(store.notifications.items[0].kind, NotificationKind::Achievement);
    assert_eq!(store.notifications.unread_count, 0);
}

#[test]
fn user_notifications_follow_the_session() {
    let (mut store, _) = signed_in_store();
    watch(&mut store, "m1", 600.0, 6000.0);
    assert!(store.mark_notification_read("welcome"));
    assert_eq!(store.notifications.items.len(), 4);
    assert_eq!(store.notifications.unread_count, 3);

    assert!(store.logout());
    assert_eq!(store.notifications.items.len(), 3);
    assert_eq!(store.notifications.unread_count, 3);

    store.login("bob@example.com", "secret").unwrap();
    assert_eq!(store.notifications.items.len(), 3);
    assert_eq!(store.notifications.unread_count, 3);

    store.login("alice@example.com", "secret").unwrap();
    assert_eq!(store.notifications.items.len(), 4);
    assert_eq!(store.notifications.items[0].kind, NotificationKind::Achievement);
    assert!(store.notifications.get("welcome").unwrap().is_read);
    assert_eq!(store.notifications.unread_count, 3);
}

#[test]
fn logout_clears_and_login_restores() {
    let (mut store, _) = signed_in_store();
    watch(&mut store, "m1", 600.0, 6000.0);

    assert!(store.logout());
    assert!(!store.logout());
    assert!(store.user.user.is_none());
    assert!(store.progress.is_empty());
    assert!(store.subscription.subscription.is_none());
    assert!(!store.persistence().contains(keys::USER));

    store.login("alice@example.com", "secret").unwrap();
    assert!(store.progress.get("m1").is_some());
    assert_eq!(store.user.history(), &["m1".to_string()]);
    assert!(store.persistence().contains(keys::USER));
}

#[test]
fn stale_session_without_profile_is_dropped() {
    let persistence = Persistence::memory();
    persistence.save(keys::USER, "ghost");

    let (store, _) = test_store_with(persistence.clone());
    assert!(store.user.user.is_none());
    assert!(!persistence.contains(keys::USER));
}

#[test]
fn signed_out_changes_are_not_persisted() {
    let (mut store, _) = test_store();
    store.update_settings(SettingsPatch::Playback(PlaybackSettingsPatch {
        skip_intro: Some(true),
        ..Default::default()
    }));

    let keys = store.persistence().store().keys().unwrap();
    assert!(keys.iter().all(|k| !k.starts_with("settings_")));
}

// ========== CONFIG ==========

#[test]
fn config_defaults_fill_missing_sections() {
    let config: Config = toml::from_str("[payments]\nsuccess_rate = 0.5\n").unwrap();
    assert_eq!(config.payments.success_rate, 0.5);
    assert_eq!(config.payments.min_delay_ms, 1000);
    assert_eq!(config.payments.period_days, 30);
    assert_eq!(config.storage.backend, StorageBackend::Sqlite);
    assert_eq!(config.history.watch_history, 100);
    assert_eq!(config.recommendations.limit, 20);
    assert!(config.validate().is_ok());
}

#[test]
fn generated_config_parses() {
    let config: Config = toml::from_str(&Config::generate_default()).unwrap();
    assert_eq!(config.catalog.highlight_size, 10);
    assert_eq!(config.history.activities, 50);
    assert!(config.validate().is_ok());
}

#[test]
fn config_rejects_bad_values() {
    let mut config = Config::default();
    config.payments.success_rate = 1.5;
    assert!(matches!(config.validate(), Err(AppError::Config(_))));

    let mut config = Config::default();
    config.payments.min_delay_ms = 5000;
    assert!(config.validate().is_err());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[payments]\nperiod_days = 0\n").unwrap();
    assert!(matches!(Config::load(&path), Err(AppError::Config(_))));
}

#[test]
fn billing_period_is_bounded() {
    let mut config = Config::default();
    config.payments.period_days = 3650;
    assert!(config.validate().is_ok());
    config.payments.period_days = i64::MAX;
    assert!(matches!(config.validate(), Err(AppError::Config(_))));

    let clock = Arc::new(ManualClock::new(start()));
    let mut store = AppStore::new(&config, Persistence::memory(), clock);
    bootstrap(&mut store);
    store.login("a@b.c", "pw").unwrap();

    let sub = store.subscription.subscription.as_ref().unwrap();
    assert_eq!(sub.current_period_end, start() + Duration::days(3650));
}

#[test]
fn config_caps_reach_the_store() {
    let mut config = Config::default();
    config.history.watch_history = 2;
    config.payments.period_days = 7;

    let clock = Arc::new(ManualClock::new(start()));
    let mut store = AppStore::new(&config, Persistence::memory(), clock);
    bootstrap(&mut store);
    store.login("a@b.c", "pw");

    for id in ["m1", "m2", "m3"] {
        watch(&mut store, id, 10.0, 100.0);
    }
    assert_eq!(store.user.history(), &["m3", "m2"]);

    let sub = store.subscription.subscription.as_ref().unwrap();
    assert_eq!(sub.current_period_end, start() + Duration::days(7));
}

// ========== PAYMENT SIMULATOR ==========

fn request(plan_id: &str) -> PaymentRequest {
    PaymentRequest {
        plan_id: plan_id.to_string(),
        method: card(),
        save_method: true,
    }
}

#[tokio::test]
async fn simulator_completes_payment() {
    let (store, _) = signed_in_store();
    let shared = store.into_shared();
    let simulator = PaymentSimulator::new(NoDelay, FixedOutcome(true));

    let tx = simulator.run(&shared, request("standard")).await.unwrap();

    assert_eq!(tx.status, TransactionStatus::Completed);
    let store = shared.lock();
    assert_eq!(store.subscription.subscription.as_ref().unwrap().plan_id, "standard");
    assert!(store.subscription.payment.current.is_none());
}

#[tokio::test]
async fn simulator_reports_decline() {
    let (store, _) = signed_in_store();
    let shared = store.into_shared();
    let simulator = PaymentSimulator::new(NoDelay, FixedOutcome(false));

    let err = simulator.run(&shared, request("premium")).await.unwrap_err();

    assert!(matches!(err, AppError::Payment(_)));
    let store = shared.lock();
    assert_eq!(store.subscription.subscription.as_ref().unwrap().plan_id, "free");
    assert_eq!(store.subscription.transactions[0].status, TransactionStatus::Failed);
    assert!(store.subscription.payment.current.is_none());
}

#[test]
fn simulator_rejects_unknown_plan_and_signed_out_user() {
    let simulator = PaymentSimulator::new(NoDelay, FixedOutcome(true));

    let (store, _) = test_store();
    let shared = store.into_shared();
    let err = tokio_test::block_on(simulator.run(&shared, request("basic"))).unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition(_)));

    shared.lock().login("a@b.c", "pw");
    let err = tokio_test::block_on(simulator.run(&shared, request("platinum"))).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert!(shared.lock().subscription.transactions.is_empty());
}
