use serde::{Deserialize, Serialize};

/// Color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Dark scheme.
    #[default]
    Dark,
    /// Light scheme.
    Light,
    /// Follow the operating system.
    System,
}

/// Theme preference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeState {
    /// Color scheme.
    pub mode: ThemeMode,
    /// Accent color as a hex string.
    pub accent: String,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self {
            mode: ThemeMode::Dark,
            accent: "#e50914".to_string(),
        }
    }
}

impl ThemeState {
    /// Set the scheme.
    pub fn set_mode(&mut self, mode: ThemeMode) {
        self.mode = mode;
    }

    /// Flip between dark and light; `System` resolves to dark.
    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = match self.mode {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light | ThemeMode::System => ThemeMode::Dark,
        };
        self.mode
    }

    /// Set the accent color. Only `#rgb` / `#rrggbb` values are accepted.
    pub fn set_accent(&mut self, accent: &str) -> bool {
        let hex = accent.strip_prefix('#').unwrap_or("");
        let valid = matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
        if valid {
            self.accent = accent.to_lowercase();
        }
        valid
    }
}
