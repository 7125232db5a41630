//! Domain records held by the store.

mod achievement;
mod content;
mod notification;
mod progress;
mod section;
mod settings;
pub mod social;
mod subscription;
mod user;

pub use achievement::Achievement;
pub use content::{ContentItem, ContentKind, Episode, Game, Movie, Reel, Season, Series};
pub use notification::{Notification, NotificationKind};
pub use progress::WatchProgress;
pub use section::{ContentSection, SectionKind};
pub use settings::{
    AccessibilitySettings, AccessibilitySettingsPatch, DownloadSettings, DownloadSettingsPatch,
    NotificationSettings, NotificationSettingsPatch, ParentalControls, ParentalControlsPatch,
    PlaybackSettings, PlaybackSettingsPatch, PrivacySettings, PrivacySettingsPatch, Settings,
    SettingsPatch, VideoQuality,
};
pub use subscription::{
    PaymentMethod, PaymentMethodKind, Plan, PlanLimits, PlanTier, Subscription,
    SubscriptionStatus, Transaction, TransactionStatus,
};
pub use user::{User, UserPatch};

/// Generate a new random identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
