//! Error types for the database client

use thiserror::Error;
use webinarsync_common::WebinarSyncError;

/// Errors that can occur when working with the database client
#[derive(Debug, Error)]
pub enum DbError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database URL parsing
    #[error("Database URL error: {0}")]
    UrlError(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// Error with database query
    #[error("Database query error: {0}")]
    QueryError(String),

    /// Error with database transaction
    #[error("Database transaction error: {0}")]
    TransactionError(String),

    /// A row addressed by id does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<DbError> for WebinarSyncError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConfigError(msg) | DbError::UrlError(msg) => WebinarSyncError::ConfigError(msg),
            other => WebinarSyncError::DatabaseError(other.to_string()),
        }
    }
}
