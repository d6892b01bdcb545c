//! Application layer coordinating state, events, and actions.
//!
//! This module defines the core application logic layer, sitting between the
//! plugin runtime (main.rs) and the catalog/domain layers. It implements the
//! event-driven architecture that powers the interactive UI.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Catalog Responses ───────┘
//! ```
//!
//! Every render runs the same pipeline over the current state:
//!
//! ```text
//! Catalog → filter (query) → paginate (page size) → view model
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`filter`]: Category gate and multi-term search
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input mode
//! - [`pagination`]: Page bounds and viewport-driven page size
//! - [`query`]: Search text, active category, requested page
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use bookshelf::app::{handle_event, AppState, Event};
//!
//! let mut state = AppState::default();
//! let (render, _actions) = handle_event(&mut state, &Event::SearchMode)?;
//! assert!(render);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod actions;
pub mod filter;
pub mod handler;
pub mod modes;
pub mod pagination;
pub mod query;
pub mod state;

pub use actions::Action;
pub use filter::filter_books;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use pagination::{paginate, Breakpoint, FixedPageSize, Page, PageSizeProvider};
pub use query::QueryState;
pub use state::AppState;
