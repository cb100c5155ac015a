//! # lumo-core
//!
//! Core library for lumo - usage analytics for an AI coding assistant.
//!
//! This library provides:
//! - Domain types for sessions and per-range stats, validated at the boundary
//! - Derived metrics: rest state, health insights, session patterns,
//!   efficiency, cost insights and weekly deltas
//! - Snapshot loading from backend JSON exports
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Example
//!
//! ```rust,no_run
//! use lumo_core::analytics::{InsightsReport, SystemClock};
//! use lumo_core::{Config, Snapshot, TimeRange};
//! use std::path::Path;
//!
//! let config = Config::load().expect("failed to load config");
//! let snapshot = Snapshot::load(Path::new("snapshot.json")).expect("failed to load snapshot");
//!
//! let report = InsightsReport::build(
//!     &snapshot,
//!     TimeRange::Week,
//!     &config.rest_preferences(),
//!     &SystemClock,
//! );
//! println!("{}", report.rest.status.label());
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use snapshot::{RangeStats, Snapshot};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod snapshot;
pub mod types;
