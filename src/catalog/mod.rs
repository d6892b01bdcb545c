//! Record store and data source handling for the book catalog.
//!
//! - `store`: immutable [`Catalog`] with derived category labels
//! - `source`: primary/fallback endpoints and the [`CatalogLoader`] state machine

pub mod source;
pub mod store;

pub use source::{
    evaluate_response, join_url, CatalogEndpoints, CatalogLoader, CatalogSource, FetchRequest,
    LoadOutcome, LoadState, SOURCE_CONTEXT_KEY,
};
pub use store::{Catalog, ALL_CATEGORY};
