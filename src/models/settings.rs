//! User settings and their partial-update patches.
//!
//! Every settings section deserializes with defaults for missing fields, so
//! blobs written by older builds still load. Each section has a matching
//! patch type whose `None` fields leave the current value untouched.

use serde::{Deserialize, Serialize};

/// Preferred streaming quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoQuality {
    /// Pick based on bandwidth.
    #[default]
    Auto,
    /// 480p.
    Sd,
    /// 720p / 1080p.
    Hd,
    /// 2160p.
    Uhd,
}

/// Notification preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationSettings {
    /// Send email notifications.
    pub email_notifications: bool,
    /// Send push notifications.
    pub push_notifications: bool,
    /// Notify on new releases.
    pub new_releases: bool,
    /// Notify on recommendations.
    pub recommendations: bool,
    /// Notify on friend activity.
    pub social_activity: bool,
    /// Notify on billing events.
    pub billing: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            push_notifications: true,
            new_releases: true,
            recommendations: true,
            social_activity: true,
            billing: true,
        }
    }
}

/// Privacy preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrivacySettings {
    /// Profile visible to non-friends.
    pub public_profile: bool,
    /// Friends can see watch history.
    pub share_watch_history: bool,
    /// Friends can see online status.
    pub show_online_status: bool,
    /// Allow watch party invites from anyone.
    pub allow_party_invites: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            public_profile: true,
            share_watch_history: true,
            show_online_status: true,
            allow_party_invites: true,
        }
    }
}

/// Playback preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaybackSettings {
    /// Start the next episode automatically.
    pub autoplay_next: bool,
    /// Play previews while browsing.
    pub autoplay_previews: bool,
    /// Preferred quality.
    pub quality: VideoQuality,
    /// Skip intros when markers exist.
    pub skip_intro: bool,
    /// Default playback speed.
    pub playback_speed: f32,
    /// Default audio language.
    pub audio_language: String,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            autoplay_next: true,
            autoplay_previews: true,
            quality: VideoQuality::Auto,
            skip_intro: false,
            playback_speed: 1.0,
            audio_language: "en".to_string(),
        }
    }
}

/// Accessibility preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccessibilitySettings {
    /// Show subtitles by default.
    pub subtitles: bool,
    /// Subtitle language.
    pub subtitle_language: String,
    /// Subtitle size multiplier.
    pub subtitle_size: f32,
    /// High contrast UI.
    pub high_contrast: bool,
    /// Disable UI animations.
    pub reduce_motion: bool,
    /// Prefer audio-described tracks.
    pub audio_description: bool,
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self {
            subtitles: false,
            subtitle_language: "en".to_string(),
            subtitle_size: 1.0,
            high_contrast: false,
            reduce_motion: false,
            audio_description: false,
        }
    }
}

/// Parental control preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParentalControls {
    /// Restrictions enabled.
    pub enabled: bool,
    /// Highest allowed maturity rating.
    pub max_maturity_rating: Option<String>,
    /// PIN required to change restrictions.
    pub pin: Option<String>,
    /// Titles hidden regardless of rating.
    pub blocked_content: Vec<String>,
}

/// Download preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DownloadSettings {
    /// Only download on Wi-Fi.
    pub wifi_only: bool,
    /// Download quality.
    pub quality: VideoQuality,
    /// Download the next episode automatically.
    pub auto_download_next: bool,
    /// Maximum number of stored downloads.
    pub max_downloads: u32,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            wifi_only: true,
            quality: VideoQuality::Hd,
            auto_download_next: false,
            max_downloads: 25,
        }
    }
}

/// All settings of a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Notification preferences.
    pub notifications: NotificationSettings,
    /// Privacy preferences.
    pub privacy: PrivacySettings,
    /// Playback preferences.
    pub playback: PlaybackSettings,
    /// Accessibility preferences.
    pub accessibility: AccessibilitySettings,
    /// Parental controls.
    pub parental_controls: ParentalControls,
    /// Download preferences.
    pub downloads: DownloadSettings,
}

macro_rules! set_if_some {
    ($target:expr, $patch:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $patch.$field {
                $target.$field = value;
            }
        )+
    };
}

/// Partial update of [`NotificationSettings`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettingsPatch {
    /// See [`NotificationSettings::email_notifications`].
    pub email_notifications: Option<bool>,
    /// See [`NotificationSettings::push_notifications`].
    pub push_notifications: Option<bool>,
    /// See [`NotificationSettings::new_releases`].
    pub new_releases: Option<bool>,
    /// See [`NotificationSettings::recommendations`].
    pub recommendations: Option<bool>,
    /// See [`NotificationSettings::social_activity`].
    pub social_activity: Option<bool>,
    /// See [`NotificationSettings::billing`].
    pub billing: Option<bool>,
}

impl NotificationSettingsPatch {
    /// Merge into `target`.
    pub fn apply(self, target: &mut NotificationSettings) {
        set_if_some!(
            target,
            self,
            email_notifications,
            push_notifications,
            new_releases,
            recommendations,
            social_activity,
            billing,
        );
    }
}

/// Partial update of [`PrivacySettings`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacySettingsPatch {
    /// See [`PrivacySettings::public_profile`].
    pub public_profile: Option<bool>,
    /// See [`PrivacySettings::share_watch_history`].
    pub share_watch_history: Option<bool>,
    /// See [`PrivacySettings::show_online_status`].
    pub show_online_status: Option<bool>,
    /// See [`PrivacySettings::allow_party_invites`].
    pub allow_party_invites: Option<bool>,
}

impl PrivacySettingsPatch {
    /// Merge into `target`.
    pub fn apply(self, target: &mut PrivacySettings) {
        set_if_some!(
            target,
            self,
            public_profile,
            share_watch_history,
            show_online_status,
            allow_party_invites,
        );
    }
}

/// Partial update of [`PlaybackSettings`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSettingsPatch {
    /// See [`PlaybackSettings::autoplay_next`].
    pub autoplay_next: Option<bool>,
    /// See [`PlaybackSettings::autoplay_previews`].
    pub autoplay_previews: Option<bool>,
    /// See [`PlaybackSettings::quality`].
    pub quality: Option<VideoQuality>,
    /// See [`PlaybackSettings::skip_intro`].
    pub skip_intro: Option<bool>,
    /// See [`PlaybackSettings::playback_speed`].
    pub playback_speed: Option<f32>,
    /// See [`PlaybackSettings::audio_language`].
    pub audio_language: Option<String>,
}

impl PlaybackSettingsPatch {
    /// Merge into `target`.
    pub fn apply(self, target: &mut PlaybackSettings) {
        set_if_some!(
            target,
            self,
            autoplay_next,
            autoplay_previews,
            quality,
            skip_intro,
            playback_speed,
            audio_language,
        );
    }
}

/// Partial update of [`AccessibilitySettings`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilitySettingsPatch {
    /// See [`AccessibilitySettings::subtitles`].
    pub subtitles: Option<bool>,
    /// See [`AccessibilitySettings::subtitle_language`].
    pub subtitle_language: Option<String>,
    /// See [`AccessibilitySettings::subtitle_size`].
    pub subtitle_size: Option<f32>,
    /// See [`AccessibilitySettings::high_contrast`].
    pub high_contrast: Option<bool>,
    /// See [`AccessibilitySettings::reduce_motion`].
    pub reduce_motion: Option<bool>,
    /// See [`AccessibilitySettings::audio_description`].
    pub audio_description: Option<bool>,
}

impl AccessibilitySettingsPatch {
    /// Merge into `target`.
    pub fn apply(self, target: &mut AccessibilitySettings) {
        set_if_some!(
            target,
            self,
            subtitles,
            subtitle_language,
            subtitle_size,
            high_contrast,
            reduce_motion,
            audio_description,
        );
    }
}

/// Partial update of [`ParentalControls`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentalControlsPatch {
    /// See [`ParentalControls::enabled`].
    pub enabled: Option<bool>,
    /// See [`ParentalControls::max_maturity_rating`].
    pub max_maturity_rating: Option<Option<String>>,
    /// See [`ParentalControls::pin`].
    pub pin: Option<Option<String>>,
    /// See [`ParentalControls::blocked_content`].
    pub blocked_content: Option<Vec<String>>,
}

impl ParentalControlsPatch {
    /// Merge into `target`.
    pub fn apply(self, target: &mut ParentalControls) {
        set_if_some!(target, self, enabled, max_maturity_rating, pin, blocked_content);
    }
}

/// Partial update of [`DownloadSettings`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadSettingsPatch {
    /// See [`DownloadSettings::wifi_only`].
    pub wifi_only: Option<bool>,
    /// See [`DownloadSettings::quality`].
    pub quality: Option<VideoQuality>,
    /// See [`DownloadSettings::auto_download_next`].
    pub auto_download_next: Option<bool>,
    /// See [`DownloadSettings::max_downloads`].
    pub max_downloads: Option<u32>,
}

impl DownloadSettingsPatch {
    /// Merge into `target`.
    pub fn apply(self, target: &mut DownloadSettings) {
        set_if_some!(target, self, wifi_only, quality, auto_download_next, max_downloads);
    }
}

/// A patch addressed to one settings section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "section", content = "patch", rename_all = "snake_case")]
pub enum SettingsPatch {
    /// Patch notification preferences.
    Notifications(NotificationSettingsPatch),
    /// Patch privacy preferences.
    Privacy(PrivacySettingsPatch),
    /// Patch playback preferences.
    Playback(PlaybackSettingsPatch),
    /// Patch accessibility preferences.
    Accessibility(AccessibilitySettingsPatch),
    /// Patch parental controls.
    ParentalControls(ParentalControlsPatch),
    /// Patch download preferences.
    Downloads(DownloadSettingsPatch),
}

impl Settings {
    /// Merge a patch into the addressed section, leaving all other fields alone.
    pub fn apply(&mut self, patch: SettingsPatch) {
        match patch {
            SettingsPatch::Notifications(p) => p.apply(&mut self.notifications),
            SettingsPatch::Privacy(p) => p.apply(&mut self.privacy),
            SettingsPatch::Playback(p) => p.apply(&mut self.playback),
            SettingsPatch::Accessibility(p) => p.apply(&mut self.accessibility),
            SettingsPatch::ParentalControls(p) => p.apply(&mut self.parental_controls),
            SettingsPatch::Downloads(p) => p.apply(&mut self.downloads),
        }
    }
}
