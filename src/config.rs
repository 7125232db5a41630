use crate::store::subscription::MAX_BILLING_PERIOD_DAYS;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Client-side state store for a video streaming platform.
#[derive(Parser, Debug, Clone)]
#[command(name = "reel-rs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file.
    #[arg(short, long, env = "REEL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Write a default config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },

    /// Show catalog highlights (default if no command given).
    Catalog {
        /// Restrict to one kind (movie, series, game).
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// Sign in. Any password is accepted.
    Login {
        /// Email address.
        email: String,
        /// Password (defaults to a placeholder).
        #[arg(short, long, default_value = "password")]
        password: String,
    },

    /// Sign out.
    Logout,

    /// Record playback progress.
    Watch {
        /// Content id.
        content_id: String,
        /// Position in seconds.
        #[arg(long, default_value_t = 600.0)]
        position: f64,
        /// Duration in seconds (defaults to the catalog runtime).
        #[arg(long)]
        duration: Option<f64>,
        /// Season id, for series.
        #[arg(long, requires = "episode")]
        season: Option<String>,
        /// Episode id, for series.
        #[arg(long, requires = "season")]
        episode: Option<String>,
    },

    /// List titles to continue watching.
    Continue,

    /// Show personalized recommendations.
    Recommend,

    /// Search the catalog.
    Search {
        /// Query text.
        query: String,
    },

    /// Buy a plan through the simulated checkout.
    Subscribe {
        /// Plan id.
        plan: String,
    },

    /// Show notifications.
    Notifications {
        /// Mark everything read.
        #[arg(long)]
        read_all: bool,
    },

    /// Print effective settings.
    Settings,
}

/// Main configuration from TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Catalog configuration.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// List caps.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Simulated payment configuration.
    #[serde(default)]
    pub payments: PaymentConfig,

    /// Recommendation configuration.
    #[serde(default)]
    pub recommendations: RecommendationConfig,
}

/// Storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Lost when the process exits.
    Memory,
    /// SQLite file.
    #[default]
    Sqlite,
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend to use.
    #[serde(default)]
    pub backend: StorageBackend,

    /// Path to the SQLite file.
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_storage_path(),
        }
    }
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("data/local-storage.db")
}

/// Catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Size of the trending, top-rated and new-release rows.
    #[serde(default = "default_highlight_size")]
    pub highlight_size: usize,

    /// Size of the continue-watching row.
    #[serde(default = "default_continue_watching")]
    pub continue_watching: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            highlight_size: default_highlight_size(),
            continue_watching: default_continue_watching(),
        }
    }
}

fn default_highlight_size() -> usize {
    10
}

fn default_continue_watching() -> usize {
    10
}

/// Caps of most-recent-first lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Watch history entries kept.
    #[serde(default = "default_watch_history")]
    pub watch_history: usize,

    /// Notifications kept.
    #[serde(default = "default_notifications")]
    pub notifications: usize,

    /// Activity feed entries kept.
    #[serde(default = "default_activities")]
    pub activities: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            watch_history: default_watch_history(),
            notifications: default_notifications(),
            activities: default_activities(),
        }
    }
}

fn default_watch_history() -> usize {
    crate::store::user::WATCH_HISTORY_CAP
}

fn default_notifications() -> usize {
    crate::store::notifications::NOTIFICATION_CAP
}

fn default_activities() -> usize {
    crate::store::social::ACTIVITY_CAP
}

/// Simulated payment configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Probability that a payment succeeds.
    #[serde(default = "default_success_rate")]
    pub success_rate: f64,

    /// Minimum simulated latency per step in milliseconds.
    #[serde(default = "default_min_delay")]
    pub min_delay_ms: u64,

    /// Maximum simulated latency per step in milliseconds.
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,

    /// Billing period length in days.
    #[serde(default = "default_period_days")]
    pub period_days: i64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            success_rate: default_success_rate(),
            min_delay_ms: default_min_delay(),
            max_delay_ms: default_max_delay(),
            period_days: default_period_days(),
        }
    }
}

fn default_success_rate() -> f64 {
    0.9
}

fn default_min_delay() -> u64 {
    1000
}

fn default_max_delay() -> u64 {
    3000
}

fn default_period_days() -> i64 {
    crate::store::subscription::BILLING_PERIOD_DAYS
}

/// Recommendation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Maximum number of recommendations.
    #[serde(default = "default_recommendation_limit")]
    pub limit: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            limit: default_recommendation_limit(),
        }
    }
}

fn default_recommendation_limit() -> usize {
    crate::selectors::RECOMMENDATION_LIMIT
}

impl Config {
    /// Load configuration from file.
    pub fn load(path: &PathBuf) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::error::AppError::Config(format!("Failed to read config file: {}", e))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            crate::error::AppError::Config(format!("Failed to parse config file: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(0.0..=1.0).contains(&self.payments.success_rate) {
            return Err(crate::error::AppError::Config(
                "payments.success_rate must be between 0 and 1".to_string(),
            ));
        }
        if self.payments.min_delay_ms > self.payments.max_delay_ms {
            return Err(crate::error::AppError::Config(
                "payments.min_delay_ms must not exceed payments.max_delay_ms".to_string(),
            ));
        }
        if !(1..=MAX_BILLING_PERIOD_DAYS).contains(&self.payments.period_days) {
            return Err(crate::error::AppError::Config(format!(
                "payments.period_days must be between 1 and {}",
                MAX_BILLING_PERIOD_DAYS
            )));
        }
        Ok(())
    }

    /// Find config file in default locations.
    pub fn find_config_file() -> Option<PathBuf> {
        let candidates = [
            PathBuf::from("config.toml"),
            PathBuf::from("reel-rs.toml"),
            dirs::config_dir()
                .map(|p| p.join("reel-rs").join("config.toml"))
                .unwrap_or_default(),
            PathBuf::from("/etc/reel-rs/config.toml"),
        ];

        candidates.into_iter().find(|p| p.exists())
    }

    /// Generate default config file content.
    pub fn generate_default() -> String {
        r#"# reel-rs configuration

[storage]
# Backend: "sqlite" or "memory"
backend = "sqlite"
path = "data/local-storage.db"

[catalog]
highlight_size = 10
continue_watching = 10

[history]
watch_history = 100
notifications = 100
activities = 50

[payments]
# Probability that a simulated payment succeeds
success_rate = 0.9
# Simulated latency per step
min_delay_ms = 1000
max_delay_ms = 3000
period_days = 30

[recommendations]
limit = 20
"#
        .to_string()
    }
}
