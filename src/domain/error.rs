//! Error types for the Bookshelf plugin.
//!
//! This module defines the centralized error type [`BookshelfError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for Bookshelf plugin operations.
///
/// Load failures are the only fatal class: they replace the catalog view with an
/// error notice. Everything else is logged and the plugin keeps running.
///
/// # Examples
///
/// ```
/// use bookshelf::BookshelfError;
///
/// let err = BookshelfError::Fetch {
///     url: "http://localhost:8000/books.json".to_string(),
///     reason: "HTTP 404".to_string(),
/// };
/// assert_eq!(
///     err.to_string(),
///     "Failed to fetch http://localhost:8000/books.json: HTTP 404"
/// );
/// ```
#[derive(Debug, Error)]
pub enum BookshelfError {
    /// A catalog source could not be reached or answered with a non-success status.
    #[error("Failed to fetch {url}: {reason}")]
    Fetch {
        /// URL that was requested.
        url: String,
        /// Transport failure or HTTP status description.
        reason: String,
    },

    /// A catalog source answered, but the body is not a JSON array of records.
    #[error("Invalid catalog data: {0}")]
    Parse(String),

    /// Both the primary and the fallback source failed.
    ///
    /// Carries the rendered cause of each attempt so the error notice can show both.
    #[error("Catalog unavailable (primary: {primary}; fallback: {fallback})")]
    CatalogUnavailable {
        /// Why the primary source failed.
        primary: String,
        /// Why the fallback source failed.
        fallback: String,
    },

    /// The user denied the permissions needed to reach the catalog.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),
}

impl From<serde_json::Error> for BookshelfError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// A specialized `Result` type for Bookshelf operations.
///
/// This is a type alias for `std::result::Result<T, BookshelfError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, BookshelfError>;
