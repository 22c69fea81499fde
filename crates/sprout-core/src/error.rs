//! Error types for the journey tracker.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all journey tracking operations.
#[derive(Error, Debug)]
pub enum JourneyError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// The backend could not be reached or the call did not complete
    #[error("Backend error: {message}")]
    Backend { message: String },
    /// A backend payload was missing required data or had the wrong shape
    #[error("Malformed payload field '{field}': {reason}")]
    MalformedPayload { field: String, reason: String },
    /// The operation is not valid for the journey's current state
    #[error("Invalid state: {reason}")]
    InvalidState { reason: String },
    /// No journey is active for the current user
    #[error("No active journey")]
    NoActiveJourney,
    /// Crop not found in the library
    #[error("Crop '{name}' not found")]
    CropNotFound { name: String },
    /// No session, or the session token is unknown
    #[error("Not signed in")]
    Unauthorized,
    /// The signed-in user lacks the role required for the operation
    #[error("Operation '{operation}' requires an admin account")]
    Forbidden { operation: String },
    /// The account has been blocked by an admin
    #[error("Account '{name}' is blocked")]
    AccountBlocked { name: String },
    /// No account with the given id
    #[error("User {id} not found")]
    UserNotFound { id: i64 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> JourneyError {
        JourneyError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> JourneyError {
        JourneyError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl JourneyError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a malformed payload error for a field.
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid state error.
    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState {
            reason: reason.into(),
        }
    }

    /// Wraps a failed blocking task join as a backend error.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        Self::Backend {
            message: format!("Task join error: {error}"),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| JourneyError::database(message).with_source(e))
    }
}

/// Result type alias for journey operations
pub type Result<T> = std::result::Result<T, JourneyError>;
