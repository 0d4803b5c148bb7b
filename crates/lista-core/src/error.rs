//! Error types for lista-core

use thiserror::Error;

/// Result type alias using lista-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in lista-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// `SQLite` error
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Backup file failed validation and cannot be previewed
    #[error("Invalid backup: {0}")]
    Validation(String),

    /// A rename target still collides with an existing record
    #[error("Name already in use: {0}")]
    NameCollision(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
