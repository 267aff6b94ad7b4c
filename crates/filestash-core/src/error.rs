//! Unified application error types for FileStash.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Client-facing failures each have
//! a dedicated [`ErrorKind`] with a fixed message; infrastructure
//! failures carry a free-form message and an optional source.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// No valid session token was supplied.
    Unauthenticated,
    /// A created item has no name.
    MissingName,
    /// A created item has no type, or an unknown one.
    MissingType,
    /// A non-folder item was created without content.
    MissingData,
    /// The referenced parent does not exist or is not a folder.
    ParentNotFound,
    /// An identifier is not well-formed.
    InvalidId,
    /// The requested item does not exist or is hidden from the caller.
    NotFound,
    /// The item exists but the caller may not act on it.
    PermissionDenied,
    /// Content was requested for a folder.
    NoContent,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry, concurrent modification, etc.).
    Conflict,
    /// An internal server error occurred.
    Internal,
    /// A database error occurred.
    Database,
    /// A cache error occurred.
    Cache,
    /// A storage I/O error occurred.
    Storage,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
}

impl ErrorKind {
    /// The fixed client-facing message for this kind.
    ///
    /// Infrastructure kinds return a generic message; their detailed
    /// message lives on the [`AppError`] itself.
    pub fn default_message(self) -> &'static str {
        match self {
            Self::Unauthenticated => "Unauthorized",
            Self::MissingName => "Missing name",
            Self::MissingType => "Missing type",
            Self::MissingData => "Missing data",
            Self::ParentNotFound => "Parent not found",
            Self::InvalidId => "Invalid id",
            Self::NotFound => "Not found",
            Self::PermissionDenied => "Forbidden",
            Self::NoContent => "A folder doesn't have content",
            Self::Validation => "Invalid request",
            Self::Conflict => "Conflict",
            Self::Internal
            | Self::Database
            | Self::Cache
            | Self::Storage
            | Self::Configuration
            | Self::Serialization => "Internal server error",
        }
    }

    /// Whether this kind is caused by the server rather than the client.
    pub fn is_server_error(self) -> bool {
        matches!(
            self,
            Self::Internal
                | Self::Database
                | Self::Cache
                | Self::Storage
                | Self::Configuration
                | Self::Serialization
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "UNAUTHENTICATED"),
            Self::MissingName => write!(f, "MISSING_NAME"),
            Self::MissingType => write!(f, "MISSING_TYPE"),
            Self::MissingData => write!(f, "MISSING_DATA"),
            Self::ParentNotFound => write!(f, "PARENT_NOT_FOUND"),
            Self::InvalidId => write!(f, "INVALID_ID"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::PermissionDenied => write!(f, "PERMISSION_DENIED"),
            Self::NoContent => write!(f, "NO_CONTENT"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Database => write!(f, "DATABASE"),
            Self::Cache => write!(f, "CACHE"),
            Self::Storage => write!(f, "STORAGE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
        }
    }
}

/// The unified application error used throughout FileStash.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an error carrying the kind's fixed message.
    pub fn from_kind(kind: ErrorKind) -> Self {
        Self::new(kind, kind.default_message())
    }

    /// Create an unauthenticated error.
    pub fn unauthenticated() -> Self {
        Self::from_kind(ErrorKind::Unauthenticated)
    }

    /// Create a not-found error.
    pub fn not_found() -> Self {
        Self::from_kind(ErrorKind::NotFound)
    }

    /// Create a permission-denied error.
    pub fn permission_denied() -> Self {
        Self::from_kind(ErrorKind::PermissionDenied)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a cache error.
    pub fn cache(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cache, message)
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// The message that may be shown to clients.
    ///
    /// Server-side failures never leak their internal detail.
    pub fn public_message(&self) -> &str {
        if self.kind.is_server_error() {
            self.kind.default_message()
        } else {
            &self.message
        }
    }
}

impl From<ErrorKind> for AppError {
    fn from(kind: ErrorKind) -> Self {
        Self::from_kind(kind)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
