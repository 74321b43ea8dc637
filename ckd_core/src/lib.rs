#![forbid(unsafe_code)]

//! Core domain model and business logic for the CKD Active exercise tracker.
//!
//! This crate provides:
//! - Domain types (exercises, phases, catalog)
//! - Calendar date keys
//! - The daily completion log and its persistence
//! - Streak derivation with a one-day grace tolerance
//! - Derived views (progress, 7-day window)

pub mod types;
pub mod error;
pub mod date;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod log_store;
pub mod storage;
pub mod streak;
pub mod views;
pub mod session;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use date::DateKey;
pub use catalog::{build_default_catalog, default_catalog};
pub use config::Config;
pub use log_store::LogStore;
pub use storage::{JsonFileStorage, LogStorage, MemoryStorage};
pub use streak::{compute_streak, streak_anchor, StreakAnchor};
pub use views::{get_progress, is_completed, seven_day_window, DayCell};
pub use session::{DaySummary, Tracker};
