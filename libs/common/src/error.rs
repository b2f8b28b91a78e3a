//! Custom error types for the common library
//!
//! This module defines the errors raised by the persistence gateway and the
//! shared configuration loaders.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Error occurred while creating a collection table
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),

    /// A document could not be converted to or from its record type
    #[error("Document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A document with the same identifier already exists
    #[error("Duplicate document id: {0}")]
    DuplicateId(uuid::Uuid),

    /// The operation did not complete within the configured query timeout
    #[error("Database operation timed out after {0} seconds")]
    Timeout(u64),

    /// The in-memory store lock was poisoned by a panicking writer
    #[error("In-memory store is unavailable")]
    Poisoned,
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Error raised while loading service configuration
#[derive(Error, Debug)]
#[error("Configuration error: {0}")]
pub struct ConfigError(#[from] ::config::ConfigError);
