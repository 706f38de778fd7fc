//! Custom error types for library-cli
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Every rejected user action maps onto one
//! variant, so the presentation layer can show the reason and carry on.

use thiserror::Error;

/// The main error type for library operations
#[derive(Error, Debug)]
pub enum LibraryError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV encoding/decoding errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Uniqueness conflicts (isbn, email)
    #[error("{entity_type} with {field} '{value}' already exists")]
    Duplicate {
        entity_type: &'static str,
        field: &'static str,
        value: String,
    },

    /// Delete blocked by open borrowings
    #[error("{entity_type} {identifier} has {open_borrowings} open borrowing(s) and cannot be deleted")]
    Referenced {
        entity_type: &'static str,
        identifier: String,
        open_borrowings: usize,
    },

    /// Book is already out on loan
    #[error("Book '{title}' is already borrowed")]
    AlreadyBorrowed { title: String },

    /// Borrowing was already closed
    #[error("Borrowing {0} has already been returned")]
    AlreadyReturned(String),

    /// Stored records contradict each other
    #[error("Data inconsistency: {0}")]
    Inconsistent(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Login rejected
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LibraryError {
    /// Create a "not found" error for books
    pub fn book_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Book",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for members
    pub fn member_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Member",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for borrowings
    pub fn borrowing_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Borrowing",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LibraryError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for library operations
pub type LibraryResult<T> = Result<T, LibraryError>;
