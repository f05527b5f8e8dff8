//! Error types for the petgrow_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for petgrow_core operations
///
/// The simulation itself never fails; these cover the edges around it
/// (files, config, the shop).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// Snapshot persistence error
    #[error("State error: {0}")]
    State(String),

    /// Shop lookup for an id that is not in the catalog
    #[error("Unknown shop item: {0}")]
    UnknownItem(String),
}
