// src/models/mod.rs

//! Domain models for the gazette watcher.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod finding;

// Re-export all public types
pub use config::{Config, EmailConfig, HttpConfig, PathsConfig, WatchConfig};
pub use finding::{Finding, MatchRecord};
