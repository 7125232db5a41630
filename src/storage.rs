//! Key-value persistence for user-scoped state.
//!
//! The platform keeps its durable state as JSON blobs under string keys, the
//! same way a browser keeps local storage. [`KeyValueStore`] is the raw byte
//! store; [`Persistence`] sits on top of it and never lets a storage or
//! serialization failure reach the caller.

mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::{AppError, Result};
use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;

/// Storage keys used by the platform.
pub mod keys {
    /// Id of the last authenticated user.
    pub const USER: &str = "user";
    /// Theme preference (not user-scoped).
    pub const THEME: &str = "theme";
    /// Recent search queries (not user-scoped).
    pub const RECENT_SEARCHES: &str = "recent_searches";

    /// Active subscription of a user.
    pub fn subscription(user_id: &str) -> String {
        format!("subscription_{}", user_id)
    }

    /// Transaction history of a user.
    pub fn transactions(user_id: &str) -> String {
        format!("transactions_{}", user_id)
    }

    /// Saved payment methods of a user.
    pub fn payment_methods(user_id: &str) -> String {
        format!("payment_methods_{}", user_id)
    }

    /// Settings of a user.
    pub fn settings(user_id: &str) -> String {
        format!("settings_{}", user_id)
    }

    /// Watch progress of a user.
    pub fn watch_progress(user_id: &str) -> String {
        format!("watch_progress_{}", user_id)
    }

    /// Profile (favorites, watchlist, history) of a user.
    pub fn profile(user_id: &str) -> String {
        format!("profile_{}", user_id)
    }

    /// Notifications created for a user.
    pub fn notifications(user_id: &str) -> String {
        format!("notifications_{}", user_id)
    }

    /// Ids of notifications a user has read.
    pub fn notifications_read(user_id: &str) -> String {
        format!("notifications_read_{}", user_id)
    }

    /// Achievement progress of a user.
    pub fn achievements(user_id: &str) -> String {
        format!("achievements_{}", user_id)
    }
}

/// A raw key-value byte store.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Delete the entry under `key`. Missing keys are not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// List all stored keys.
    fn keys(&self) -> Result<Vec<String>>;
}

/// In-memory store, optionally limited to a byte quota.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Create an unbounded in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects writes once `quota` bytes are used.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            quota: Some(quota),
        }
    }

    fn used_bytes_without(entries: &HashMap<String, Vec<u8>>, key: &str) -> usize {
        entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut entries = self.entries.write();

        if let Some(quota) = self.quota {
            let needed = Self::used_bytes_without(&entries, key) + key.len() + value.len();
            if needed > quota {
                return Err(AppError::Storage(format!(
                    "Quota exceeded: {} of {} bytes",
                    needed, quota
                )));
            }
        }

        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.entries.read().keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

/// Fail-soft JSON persistence over a [`KeyValueStore`].
#[derive(Clone)]
pub struct Persistence {
    store: Arc<dyn KeyValueStore>,
}

impl Persistence {
    /// Wrap a key-value store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Persistence backed by a fresh in-memory store.
    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Access the underlying store.
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Serialize `value` and store it under `key`.
    ///
    /// Failures are logged and swallowed.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to serialize value");
                return;
            }
        };

        if let Err(e) = self.store.set(key, &bytes) {
            tracing::warn!(key, error = %e, "Failed to save value");
        }
    }

    /// Load the value under `key`, or `default` if it is missing or unreadable.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_load(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to load value, using default");
                default
            }
        }
    }

    /// Load the value under `key`, reporting failures.
    pub fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Check whether a value exists under `key`.
    pub fn contains(&self, key: &str) -> bool {
        matches!(self.store.get(key), Ok(Some(_)))
    }

    /// Delete the entry under `key`. Failures are logged and swallowed.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            tracing::warn!(key, error = %e, "Failed to remove value");
        }
    }
}
