//! Actions representing side effects to be executed by the plugin runtime.
//!
//! This module defines the [`Action`] type, which represents imperative commands
//! produced by the event handler after processing user input or system events.
//! Actions bridge pure state transformations and effectful operations like
//! web requests or opening links on the host.
//!
//! # Example
//!
//! ```rust
//! use bookshelf::app::Action;
//! use bookshelf::catalog::{CatalogSource, FetchRequest};
//!
//! let actions = vec![Action::FetchCatalog(FetchRequest {
//!     source: CatalogSource::Primary,
//!     url: "http://localhost:8000/books.json".to_string(),
//! })];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::catalog::FetchRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues an HTTP GET for a catalog source.
    ///
    /// The runtime tags the request with the source so the response can be routed
    /// back as a `CatalogResponse` event.
    FetchCatalog(FetchRequest),

    /// Opens a URL with the host's default handler (a new browser context).
    OpenUrl {
        /// Absolute URL to open.
        url: String,
    },
}
