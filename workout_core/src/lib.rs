#![forbid(unsafe_code)]

//! Core data layer for the Brutal Workout tracker.
//!
//! This crate provides:
//! - Domain types (exercises, plans, sessions, stats)
//! - Exercise and plan catalogs with seed data
//! - The workout session state machine and rest timer
//! - Key-value persistence of whole collections as JSON
//! - The [`WorkoutApp`] handle that frontends drive

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod store;
pub mod exercises;
pub mod plans;
pub mod session;
pub mod timer;
pub mod stats;
pub mod app;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use exercises::{ExerciseCatalog, ExerciseQuery, SortField};
pub use plans::PlanCatalog;
pub use session::{Advance, SessionProgress};
pub use timer::{RestTimer, Tick};
pub use app::WorkoutApp;
