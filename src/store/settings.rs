use crate::models::{Settings, SettingsPatch};
use serde::{Deserialize, Serialize};

/// Settings of the current user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsState {
    /// Effective settings.
    pub settings: Settings,
}

impl SettingsState {
    /// Merge a patch into one section.
    pub fn update(&mut self, patch: SettingsPatch) {
        self.settings.apply(patch);
    }

    /// Replace with persisted settings.
    pub fn restore(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Back to defaults.
    pub fn reset(&mut self) {
        self.settings = Settings::default();
    }
}
