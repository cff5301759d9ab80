//! Error types for reliefdesk.
//!
//! This module defines all error types used throughout the reliefdesk crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::{Role, TableName};

/// The main error type for reliefdesk operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Operation Errors ===
    /// A required field was empty or a value could not be accepted.
    #[error("invalid {field}: {message}")]
    Validation {
        /// Name of the offending field.
        field: String,
        /// Description of the problem.
        message: String,
    },

    /// A referenced record does not exist.
    #[error("{table} has no record with id {id}")]
    NotFound {
        /// Table that was searched.
        table: TableName,
        /// The missing identifier.
        id: i64,
    },

    /// Login credentials did not match any record.
    #[error("invalid credentials for {role}")]
    Authentication {
        /// Role the login was attempted for.
        role: Role,
    },

    /// Writing the table snapshot failed; the triggering operation was aborted.
    #[error("failed to persist tables: {source}")]
    Persistence {
        /// The underlying store error.
        #[source]
        source: Box<Error>,
    },

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// A persisted row could not be converted into a record.
    #[error("invalid record {id} in {table}: {message}")]
    InvalidRecord {
        /// Table holding the row.
        table: TableName,
        /// Identifier of the row.
        id: i64,
        /// Description of the problem.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for reliefdesk operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a validation error for the given field.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a validation error for an empty required field.
    #[must_use]
    pub fn required(field: impl Into<String>) -> Self {
        Self::validation(field, "required field is empty")
    }

    /// Create a not-found error.
    #[must_use]
    pub fn not_found(table: TableName, id: i64) -> Self {
        Self::NotFound { table, id }
    }

    /// Wrap a store failure as a persistence error.
    #[must_use]
    pub fn persistence(source: Error) -> Self {
        Self::Persistence {
            source: Box::new(source),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error is a rejected input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this error is a missing record.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error is a failed snapshot write.
    #[must_use]
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence { .. })
    }
}
