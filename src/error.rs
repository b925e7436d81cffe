//! Error types for geozset.

use thiserror::Error;

/// Result type alias for geozset operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur while indexing or searching coordinates.
#[derive(Debug, Error)]
pub enum GeoError {
    /// The storage bit depth is too coarse to hold the search cells.
    #[error(
        "storage bit depth {storage} is lower than search bit depth {search}; \
         cannot rescale search ranges"
    )]
    Precision { search: u8, storage: u8 },

    /// Failure reported by the backing store.
    #[error("store error: {0}")]
    Store(String),

    /// Invalid coordinates, radius or bit depth.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "toml")]
    #[error("TOML error: {0}")]
    Toml(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
