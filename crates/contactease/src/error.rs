//! Error types for contactease.
//!
//! Every failure a caller can observe is a variant of [`Error`]. None of them
//! are fatal to the process: the presentation layer is expected to report
//! each kind to the user and carry on.

use std::path::PathBuf;
use thiserror::Error;

use crate::contact::Contact;
use crate::validation::Field;

/// The main error type for contactease operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Record Errors ===
    /// A field failed its format check.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// The offending field.
        field: Field,
        /// Why the value was rejected.
        reason: String,
    },

    /// The contact collides with one already in the address book.
    #[error("contact already exists: {existing}")]
    Duplicate {
        /// The record the new values collide with.
        existing: Box<Contact>,
    },

    /// No contact matched the lookup query.
    #[error("no contacts found matching '{query}'")]
    NotFound {
        /// The query that matched nothing.
        query: String,
    },

    /// The address book holds no contacts at all.
    #[error("no contacts available")]
    NoContacts,

    /// Several contacts matched and no selection was supplied.
    #[error("{} contacts match; select one by its 1-based index", .candidates.len())]
    Ambiguous {
        /// Every matching contact, in collection order.
        candidates: Vec<Contact>,
    },

    /// The selection index does not point into the candidate list.
    #[error("invalid selection {index}: expected a number between 1 and {count}")]
    Selection {
        /// The index the caller supplied.
        index: usize,
        /// How many candidates there were.
        count: usize,
    },

    // === Store Errors ===
    /// The store exists but its contents cannot be trusted.
    #[error("contacts file {path} is corrupt: {message}")]
    CorruptStore {
        /// Path to the store file.
        path: PathBuf,
        /// Description of what could not be parsed.
        message: String,
    },

    /// Writing the store failed; the previous file is left in place.
    #[error("failed to save contacts to {path}: {source}")]
    Persistence {
        /// Path to the store file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
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

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for contactease operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a validation error for the given field.
    #[must_use]
    pub fn validation(field: Field, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Create a duplicate error pointing at the existing record.
    #[must_use]
    pub fn duplicate(existing: Contact) -> Self {
        Self::Duplicate {
            existing: Box::new(existing),
        }
    }

    /// Create a not-found error for the given query.
    #[must_use]
    pub fn not_found(query: impl Into<String>) -> Self {
        Self::NotFound {
            query: query.into(),
        }
    }

    /// Create a corrupt store error.
    #[must_use]
    pub fn corrupt_store(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::CorruptStore {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Check if this error is a field validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this error is a duplicate collision.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Check if this error means nothing matched (or there is nothing at all).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NoContacts)
    }

    /// Check if this error asks the caller to pick one of several candidates.
    #[must_use]
    pub fn needs_selection(&self) -> bool {
        matches!(self, Self::Ambiguous { .. })
    }

    /// Check if this error is a store read or write failure.
    #[must_use]
    pub fn is_store_error(&self) -> bool {
        matches!(self, Self::CorruptStore { .. } | Self::Persistence { .. })
    }
}
