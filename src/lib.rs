//! reel-rs: client-side state store for a video streaming platform.
//!
//! This crate holds the whole application state of a streaming client in
//! memory and persists the user-scoped parts as JSON blobs in a key-value
//! store (in memory or SQLite).
//!
//! # Features
//!
//! - Catalog of movies, series and games with trending/top-rated/new rows
//! - Watch progress, history, favorites and watchlist
//! - Genre-based recommendations and continue-watching
//! - Simulated subscription checkout with a payment state machine
//! - Notifications, achievements, reels and social features
//! - Typed settings patches with JSON persistence per user

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Startup seeding.
pub mod bootstrap;
/// Time sources.
pub mod clock;
/// Configuration and CLI.
pub mod config;
/// Error types.
pub mod error;
/// Built-in demo data.
pub mod mock;
/// Domain models.
pub mod models;
/// Simulated checkout.
pub mod payment;
/// Derived views.
pub mod selectors;
/// Key-value persistence.
pub mod storage;
/// State slices and the store controller.
pub mod store;

#[cfg(test)]
mod tests;

pub use bootstrap::bootstrap;
pub use config::{Cli, Command, Config};
pub use error::{AppError, Result};
pub use storage::{KeyValueStore, MemoryStore, Persistence, SqliteStore};
pub use store::{AppStore, SharedStore};
