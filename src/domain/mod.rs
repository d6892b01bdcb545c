//! Domain layer for the Bookshelf plugin.
//!
//! This module contains the core domain types for the plugin, independent of
//! Zellij-specific APIs or infrastructure concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`book`]: Book record model
//!
//! # Examples
//!
//! ```
//! use bookshelf::domain::{Book, Result};
//!
//! fn first_book() -> Result<Book> {
//!     Ok(Book::new("1", "The Left Hand of Darkness"))
//! }
//! # assert_eq!(first_book().unwrap().title, "The Left Hand of Darkness");
//! ```

pub mod book;
pub mod error;

pub use book::{Book, PLACEHOLDER_LINK};
pub use error::{BookshelfError, Result};
