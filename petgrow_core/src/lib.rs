#![forbid(unsafe_code)]

//! Simulation core for the PetGrow virtual pet.
//!
//! This crate provides:
//! - Domain types (pet stats, inventory, game state, shop items)
//! - Stat model and derived classifications
//! - Live tick engine and care-action resolver
//! - Offline catch-up for time spent away
//! - Snapshot persistence and the game session that ties it together

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod stats;
pub mod tick;
pub mod actions;
pub mod offline;
pub mod store;
pub mod session;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog};
pub use config::{Config, Rules};
pub use stats::{CareRating, VisualState};
pub use tick::advance;
pub use actions::{apply, ActionOutcome};
pub use offline::{reconcile, Reconciliation};
pub use store::{JsonFileStore, MemoryStore, SnapshotStore};
pub use session::{GameSession, OfflineReport};
