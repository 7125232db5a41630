//! Application store: every slice plus the persistence and time sources.
//!
//! Slices are plain data with reducer methods and never touch storage.
//! [`AppStore`] wraps the reducers that change user-scoped data and calls
//! [`AppStore::persist`] after each of them, so saving stays a separate,
//! observable step.

pub mod achievements;
pub mod catalog;
pub mod filters;
pub mod notifications;
pub mod progress;
pub mod reels;
pub mod search;
pub mod sections;
pub mod settings;
pub mod social;
pub mod subscription;
pub mod theme;
pub mod user;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::models::{
    Achievement, Notification, NotificationKind, PaymentMethod, PlanLimits, SectionKind,
    Settings, SettingsPatch, Transaction, User, UserPatch, WatchProgress, new_id,
};
use crate::selectors::{self, Recommendation};
use crate::storage::{Persistence, keys};
use achievements::AchievementState;
use catalog::CatalogState;
use filters::FilterState;
use notifications::NotificationState;
use parking_lot::Mutex;
use progress::{ProgressUpdate, WatchProgressState};
use reels::ReelState;
use search::SearchState;
use sections::ContentSectionState;
use settings::SettingsState;
use social::SocialState;
use std::sync::Arc;
use subscription::{MAX_BILLING_PERIOD_DAYS, SubscriptionState};
use theme::{ThemeMode, ThemeState};
use user::UserState;

/// Store shared with async tasks. Never hold the lock across an await.
pub type SharedStore = Arc<Mutex<AppStore>>;

/// A persisted part of the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slice {
    /// Id of the signed-in user.
    Session,
    /// Profile, favorites, watchlist and history.
    Profile,
    /// Watch progress.
    Progress,
    /// Settings.
    Settings,
    /// The user's notifications and which ones were read.
    Notifications,
    /// Achievement progress.
    Achievements,
    /// Subscription, transactions and payment methods.
    Billing,
    /// Theme preference.
    Theme,
    /// Recent searches.
    RecentSearches,
}

impl Slice {
    /// Slices that belong to the signed-in user.
    pub const USER_SCOPED: [Slice; 6] = [
        Slice::Profile,
        Slice::Progress,
        Slice::Settings,
        Slice::Notifications,
        Slice::Achievements,
        Slice::Billing,
    ];
}

/// Sizes the store needs from the configuration.
#[derive(Debug, Clone)]
pub struct StoreLimits {
    /// Highlight row size.
    pub highlight_size: usize,
    /// Continue-watching row size.
    pub continue_watching: usize,
    /// Recommendation count.
    pub recommendations: usize,
}

impl From<&Config> for StoreLimits {
    fn from(config: &Config) -> Self {
        Self {
            highlight_size: config.catalog.highlight_size,
            continue_watching: config.catalog.continue_watching,
            recommendations: config.recommendations.limit,
        }
    }
}

/// The whole client state.
pub struct AppStore {
    /// Movies, series and games.
    pub catalog: CatalogState,
    /// Session and profile.
    pub user: UserState,
    /// Playback positions.
    pub progress: WatchProgressState,
    /// Inbox.
    pub notifications: NotificationState,
    /// Badges.
    pub achievements: AchievementState,
    /// Clip feed.
    pub reels: ReelState,
    /// Friends, reviews, parties, messages.
    pub social: SocialState,
    /// Plans and billing.
    pub subscription: SubscriptionState,
    /// Preferences.
    pub settings: SettingsState,
    /// Home-page rows.
    pub sections: ContentSectionState,
    /// Search box.
    pub search: SearchState,
    /// Browse filters.
    pub filters: FilterState,
    /// Theme.
    pub theme: ThemeState,
    /// Row sizes.
    pub limits: StoreLimits,
    persistence: Persistence,
    clock: Arc<dyn Clock>,
}

impl AppStore {
    /// Create an empty store.
    pub fn new(config: &Config, persistence: Persistence, clock: Arc<dyn Clock>) -> Self {
        let mut user = UserState::default();
        user.history_cap = config.history.watch_history;

        let mut social = SocialState::default();
        social.activity_cap = config.history.activities;

        let mut subscription = SubscriptionState::default();
        subscription.period_days = config
            .payments
            .period_days
            .clamp(1, MAX_BILLING_PERIOD_DAYS);

        Self {
            catalog: CatalogState::default(),
            user,
            progress: WatchProgressState::default(),
            notifications: NotificationState::with_cap(config.history.notifications),
            achievements: AchievementState::default(),
            reels: ReelState::default(),
            social,
            subscription,
            settings: SettingsState::default(),
            sections: ContentSectionState::default(),
            search: SearchState::default(),
            filters: FilterState::default(),
            theme: ThemeState::default(),
            limits: StoreLimits::from(config),
            persistence,
            clock,
        }
    }

    /// Default config, in-memory storage and the wall clock.
    pub fn in_memory() -> Self {
        Self::new(&Config::default(), Persistence::memory(), Arc::new(SystemClock))
    }

    /// Wrap for sharing with async tasks.
    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    /// Current time from the store clock.
    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    /// Persistence adapter.
    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    // ========== PERSISTENCE ==========

    /// Save one slice. User-scoped slices are skipped while signed out.
    pub fn persist(&self, slice: Slice) {
        match slice {
            Slice::Theme => self.persistence.save(keys::THEME, &self.theme),
            Slice::RecentSearches => self
                .persistence
                .save(keys::RECENT_SEARCHES, &self.search.recent),
            _ => self.persist_user_scoped(slice),
        }
    }

    fn persist_user_scoped(&self, slice: Slice) {
        let p = &self.persistence;
        let Some(user) = self.user.user.as_ref() else {
            tracing::debug!(?slice, "Not signed in, skipping persist");
            return;
        };
        let id = user.id.as_str();

        match slice {
            Slice::Session => p.save(keys::USER, id),
            Slice::Profile => p.save(&keys::profile(id), user),
            Slice::Progress => p.save(&keys::watch_progress(id), &self.progress),
            Slice::Settings => p.save(&keys::settings(id), &self.settings.settings),
            Slice::Notifications => {
                p.save(&keys::notifications(id), &self.notifications.personal());
                p.save(&keys::notifications_read(id), &self.notifications.read_ids());
            }
            Slice::Achievements => {
                p.save(&keys::achievements(id), &self.achievements.achievements)
            }
            Slice::Billing => {
                match &self.subscription.subscription {
                    Some(s) => p.save(&keys::subscription(id), s),
                    None => p.remove(&keys::subscription(id)),
                }
                p.save(&keys::transactions(id), &self.subscription.transactions);
                p.save(&keys::payment_methods(id), &self.subscription.payment_methods);
            }
            Slice::Theme | Slice::RecentSearches => {}
        }
    }

    /// Save every slice.
    pub fn persist_all(&self) {
        self.persist(Slice::Session);
        for slice in Slice::USER_SCOPED {
            self.persist(slice);
        }
        self.persist(Slice::Theme);
        self.persist(Slice::RecentSearches);
    }

    /// Load a user's persisted data over the in-memory defaults.
    ///
    /// Returns whether a stored profile was found.
    pub fn restore_user_data(&mut self, user_id: &str) -> bool {
        let p = self.persistence.clone();

        let profile: Option<User> = p.load(&keys::profile(user_id), None);
        let found = profile.is_some();
        if let Some(profile) = profile {
            self.user.restore(profile);
        }

        self.progress = p.load(&keys::watch_progress(user_id), WatchProgressState::default());
        self.settings
            .restore(p.load(&keys::settings(user_id), Settings::default()));

        let saved: Vec<Notification> = p.load(&keys::notifications(user_id), Vec::new());
        self.notifications.restore_personal(saved);
        let read: Vec<String> = p.load(&keys::notifications_read(user_id), Vec::new());
        self.notifications.apply_read_state(&read);

        let saved: Vec<Achievement> = p.load(&keys::achievements(user_id), Vec::new());
        self.achievements.restore(saved);

        if let Some(subscription) = p.load(&keys::subscription(user_id), None) {
            self.subscription.set_subscription(subscription);
        }
        self.subscription.transactions = p.load(&keys::transactions(user_id), Vec::new());
        self.subscription.payment_methods = p.load(&keys::payment_methods(user_id), Vec::new());

        tracing::debug!(user = user_id, found, "Restored user data");
        found
    }

    fn reset_user_data(&mut self) {
        self.progress.clear();
        self.settings.reset();
        self.achievements.reset();
        self.subscription.clear_subscription();
        self.subscription.transactions.clear();
        self.subscription.payment_methods.clear();
        self.subscription.payment = Default::default();
        self.notifications.reset_personal();
    }

    // ========== SESSION ==========

    /// Sign in with any non-empty credentials and load the user's data.
    pub fn login(&mut self, email: &str, password: &str) -> Option<User> {
        if email.trim().is_empty() || password.is_empty() {
            return None;
        }
        self.logout();

        let now = self.now();
        let user_id = self.user.login(email, password, now)?.id.clone();

        self.restore_user_data(&user_id);
        if self.subscription.start_free(&user_id, now) {
            self.persist(Slice::Billing);
        }
        self.persist(Slice::Session);
        self.persist(Slice::Profile);
        self.refresh_sections();

        tracing::info!(user = %user_id, "Signed in");
        self.user.user.clone()
    }

    /// Save and drop the user's data, then sign out.
    pub fn logout(&mut self) -> bool {
        if !self.user.is_authenticated() {
            return false;
        }
        for slice in Slice::USER_SCOPED {
            self.persist(slice);
        }
        self.persistence.remove(keys::USER);
        self.user.logout();
        self.reset_user_data();
        self.refresh_sections();

        tracing::info!("Signed out");
        true
    }

    /// Apply a profile patch.
    pub fn update_profile(&mut self, patch: UserPatch) -> bool {
        let changed = self.user.update_profile(patch);
        if changed {
            self.persist(Slice::Profile);
        }
        changed
    }

    // ========== LIBRARY ==========

    /// Flip favorite membership. Returns the new membership.
    pub fn toggle_favorite(&mut self, content_id: &str) -> bool {
        let favorite = self.user.toggle_favorite(content_id);
        self.persist(Slice::Profile);
        favorite
    }

    /// Flip watchlist membership. Returns the new membership.
    pub fn toggle_watchlist(&mut self, content_id: &str) -> bool {
        let listed = self.user.toggle_watchlist(content_id);
        self.persist(Slice::Profile);
        listed
    }

    /// Record playback, update history, and advance watch achievements.
    pub fn record_progress(&mut self, update: ProgressUpdate<'_>) -> WatchProgress {
        let now = self.now();
        let content_id = update.content_id.to_string();
        let entry = self.progress.update(update, now).clone();

        let first_time = !self.user.history().iter().any(|id| *id == content_id);
        self.user.add_to_history(&content_id);

        if first_time {
            self.achievements.increment_progress("first-watch", 1, now);
            self.achievements.increment_progress("binge-watcher", 1, now);
        }
        if entry.completed {
            self.achievements.increment_progress("completionist", 1, now);
        }
        self.announce_unlocks();

        self.persist(Slice::Progress);
        self.persist(Slice::Profile);
        self.persist(Slice::Achievements);
        self.refresh_continue_watching();
        entry
    }

    /// Mark a progress entry as fully watched.
    pub fn finish_progress(&mut self, key: &str) -> bool {
        let now = self.now();
        if !self.progress.mark_completed(key, now) {
            return false;
        }
        self.achievements.increment_progress("completionist", 1, now);
        self.announce_unlocks();

        self.persist(Slice::Progress);
        self.persist(Slice::Achievements);
        self.refresh_continue_watching();
        true
    }

    /// Forget one progress entry.
    pub fn remove_progress(&mut self, key: &str) -> bool {
        let removed = self.progress.remove(key);
        if removed {
            self.persist(Slice::Progress);
            self.refresh_continue_watching();
        }
        removed
    }

    /// Empty the watch history.
    pub fn clear_history(&mut self) -> bool {
        let cleared = self.user.clear_history();
        if cleared {
            self.persist(Slice::Profile);
        }
        cleared
    }

    // ========== SETTINGS ==========

    /// Merge a settings patch.
    pub fn update_settings(&mut self, patch: SettingsPatch) {
        self.settings.update(patch);
        self.persist(Slice::Settings);
    }

    /// Back to default settings.
    pub fn reset_settings(&mut self) {
        self.settings.reset();
        self.persist(Slice::Settings);
    }

    // ========== NOTIFICATIONS ==========

    /// Push a notification.
    pub fn notify(
        &mut self,
        kind: NotificationKind,
        title: &str,
        message: &str,
        content_id: Option<&str>,
    ) -> String {
        let id = new_id();
        self.notifications.add(Notification {
            id: id.clone(),
            kind,
            title: title.to_string(),
            message: message.to_string(),
            is_read: false,
            timestamp: self.now(),
            content_id: content_id.map(str::to_string),
        });
        self.persist(Slice::Notifications);
        id
    }

    /// Mark one notification read.
    pub fn mark_notification_read(&mut self, id: &str) -> bool {
        let changed = self.notifications.mark_read(id);
        if changed {
            self.persist(Slice::Notifications);
        }
        changed
    }

    /// Mark every notification read.
    pub fn mark_all_notifications_read(&mut self) -> bool {
        let changed = self.notifications.mark_all_read();
        if changed {
            self.persist(Slice::Notifications);
        }
        changed
    }

    // ========== ACHIEVEMENTS ==========

    /// Set achievement progress; unlocking notifies once.
    pub fn update_achievement(&mut self, id: &str, progress: u32) -> bool {
        let unlocked = self.achievements.update_progress(id, progress, self.clock.now());
        self.announce_unlocks();
        self.persist(Slice::Achievements);
        unlocked
    }

    /// Unlock an achievement directly.
    pub fn unlock_achievement(&mut self, id: &str) -> bool {
        let unlocked = self.achievements.unlock(id, self.clock.now());
        self.announce_unlocks();
        self.persist(Slice::Achievements);
        unlocked
    }

    fn announce_unlocks(&mut self) {
        for id in self.achievements.take_recent_unlocks() {
            let Some(title) = self.achievements.get(&id).map(|a| a.title.clone()) else {
                continue;
            };
            let level = self.achievements.level;
            self.notify(
                NotificationKind::Achievement,
                &format!("Achievement unlocked: {}", title),
                &format!("You are now level {}", level),
                None,
            );
        }
    }

    // ========== BILLING ==========

    /// Open a checkout for a plan.
    pub fn initiate_payment(&mut self, plan_id: &str, method: PaymentMethod, save_method: bool) -> bool {
        let now = self.now();
        let started = self
            .subscription
            .initiate_payment(plan_id, method, save_method, now)
            .is_some();
        if started {
            tracing::info!(plan = plan_id, "Payment initiated");
        }
        started
    }

    /// Submit the open checkout.
    pub fn process_payment(&mut self) -> bool {
        self.subscription.process_payment()
    }

    /// Complete the checkout and switch plans.
    pub fn complete_payment(&mut self) -> Option<Transaction> {
        let user_id = self.user.user_id()?.to_string();
        let transaction = self.subscription.complete_payment(&user_id, self.now())?;

        let plan_name = self
            .subscription
            .plan(&transaction.plan_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| transaction.plan_id.clone());
        self.notify(
            NotificationKind::Subscription,
            "Subscription updated",
            &format!("You are now on the {} plan", plan_name),
            None,
        );

        tracing::info!(plan = %transaction.plan_id, transaction = %transaction.id, "Payment completed");
        self.persist(Slice::Billing);
        Some(transaction)
    }

    /// Fail the checkout with a message.
    pub fn fail_payment(&mut self, error: &str) -> Option<Transaction> {
        let transaction = self.subscription.fail_payment(error, self.now())?;
        tracing::info!(transaction = %transaction.id, error, "Payment failed");
        self.persist(Slice::Billing);
        Some(transaction)
    }

    /// Abandon a checkout that has not been submitted.
    pub fn cancel_payment(&mut self) -> Option<Transaction> {
        let transaction = self.subscription.cancel_payment(self.now())?;
        self.persist(Slice::Billing);
        Some(transaction)
    }

    /// Stop renewing at period end.
    pub fn cancel_subscription(&mut self) -> bool {
        let changed = self.subscription.cancel_subscription();
        if changed {
            self.persist(Slice::Billing);
        }
        changed
    }

    /// Undo a pending cancellation.
    pub fn reactivate_subscription(&mut self) -> bool {
        let changed = self.subscription.reactivate_subscription();
        if changed {
            self.persist(Slice::Billing);
        }
        changed
    }

    // ========== THEME & SEARCH ==========

    /// Set the color scheme.
    pub fn set_theme(&mut self, mode: ThemeMode) {
        self.theme.set_mode(mode);
        self.persist(Slice::Theme);
    }

    /// Flip dark/light.
    pub fn toggle_theme(&mut self) -> ThemeMode {
        let mode = self.theme.toggle();
        self.persist(Slice::Theme);
        mode
    }

    /// Run a catalog search, store the results and remember the query.
    pub fn search(&mut self, query: &str) -> Vec<String> {
        self.search.set_query(query);
        self.search.set_searching(true);

        let results: Vec<String> = selectors::search_catalog(&self.catalog.all(), query)
            .iter()
            .map(|i| i.id().to_string())
            .collect();

        self.search.set_results(results.clone());
        if self.search.add_recent_search(query) {
            self.persist(Slice::RecentSearches);
        }
        results
    }

    // ========== DERIVED VIEWS ==========

    /// Personalized recommendations.
    pub fn recommendations(&self) -> Vec<Recommendation<'_>> {
        selectors::recommend(
            &self.catalog.watchables(),
            self.user.history(),
            self.user.favorites(),
            self.limits.recommendations,
        )
    }

    /// In-progress titles, most recent first.
    pub fn continue_watching(&self) -> Vec<&WatchProgress> {
        selectors::continue_watching(&self.progress, self.limits.continue_watching)
    }

    /// Whether the current subscription covers `content_id`.
    pub fn can_access(&self, content_id: &str) -> bool {
        let restricted = selectors::restricted_content(&self.catalog.all());
        selectors::can_access_content(
            self.subscription.subscription.as_ref(),
            &self.subscription.plans,
            &restricted,
            content_id,
        )
    }

    /// Limits of the current plan.
    pub fn plan_limits(&self) -> PlanLimits {
        selectors::plan_limits(
            self.subscription.subscription.as_ref(),
            &self.subscription.plans,
        )
    }

    // ========== SECTIONS ==========

    /// Refill the rows backed by derived data.
    pub fn refresh_sections(&mut self) {
        let now = self.now();
        let rows: Vec<(String, Vec<String>)> = self
            .sections
            .sections
            .iter()
            .filter_map(|s| {
                let ids = match s.kind {
                    SectionKind::Trending => self.catalog.trending.clone(),
                    SectionKind::NewReleases => self.catalog.new_releases.clone(),
                    SectionKind::ContinueWatching => self.continue_watching_ids(),
                    SectionKind::Recommended => self
                        .recommendations()
                        .iter()
                        .map(|r| r.item.id().to_string())
                        .collect(),
                    SectionKind::Curated | SectionKind::Genre => return None,
                };
                Some((s.id.clone(), ids))
            })
            .collect();

        for (section_id, ids) in rows {
            self.sections.set_content(&section_id, ids, now);
        }
    }

    fn refresh_continue_watching(&mut self) {
        let now = self.now();
        let ids = self.continue_watching_ids();
        let targets: Vec<String> = self
            .sections
            .sections
            .iter()
            .filter(|s| s.kind == SectionKind::ContinueWatching)
            .map(|s| s.id.clone())
            .collect();
        for section_id in targets {
            self.sections.set_content(&section_id, ids.clone(), now);
        }
    }

    fn continue_watching_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for entry in self.continue_watching() {
            insert_unique(&mut ids, &entry.content_id);
        }
        ids
    }
}

/// Push `value` unless already present. Returns whether it was added.
pub(crate) fn insert_unique(list: &mut Vec<String>, value: &str) -> bool {
    if list.iter().any(|v| v == value) {
        return false;
    }
    list.push(value.to_string());
    true
}

/// Remove every occurrence of `value`. Returns whether anything was removed.
pub(crate) fn remove_value(list: &mut Vec<String>, value: &str) -> bool {
    let before = list.len();
    list.retain(|v| v != value);
    list.len() != before
}

/// Insert at the head and drop items beyond `cap` from the tail.
pub(crate) fn push_front_capped<T>(list: &mut Vec<T>, item: T, cap: usize) {
    list.insert(0, item);
    list.truncate(cap);
}
