//! Common error types for the period poverty service

use thiserror::Error;

use crate::analytics::AnalyticsError;

/// Common result type for store and configuration operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the stores, configuration and seeding
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested dataset row or basket item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Uniqueness constraint violated (e.g. duplicate basket item name)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Stored value could not be decoded (e.g. malformed decimal text)
    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    /// Analytics engine failure
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
}
