//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input,
//! viewport changes, and catalog responses, translating them into state changes
//! and action sequences. It serves as the primary control flow coordinator
//! for the application.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` and `QueryState` methods
//! 4. The requested page and card cursor are re-clamped
//! 5. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! Events fall into several categories:
//! - **Loading**: `LoadCatalog`, `CatalogResponse`, `PermissionsDenied`
//! - **Query**: `Char`, `Backspace`, `ClearSearch`, `SetSearch`, category events
//! - **Paging**: `PrevPage`, `NextPage`, `Resize`
//! - **Cards**: `CursorDown`, `CursorUp`, `ToggleDetails`, `OpenPurchase`, `OpenDetail`
//!
//! # Example
//!
//! ```rust
//! use bookshelf::app::{handle_event, Action, AppState, Event};
//!
//! let mut state = AppState::default();
//! let (_render, actions) = handle_event(&mut state, &Event::LoadCatalog)?;
//! assert!(matches!(actions.as_slice(), [Action::FetchCatalog(_)]));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::app::{Action, AppState, InputMode};
use crate::catalog::{CatalogSource, LoadOutcome, ALL_CATEGORY};
use crate::domain::error::{BookshelfError, Result};

/// Events triggered by user input, host responses, or pane changes.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The event handler processes these sequentially,
/// ensuring deterministic state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Starts loading the catalog from the primary source.
    LoadCatalog,

    /// Delivers the host's answer to a catalog web request.
    CatalogResponse {
        source: CatalogSource,
        status: u16,
        body: Vec<u8>,
    },

    /// Web access was refused; the catalog can never load.
    PermissionsDenied,

    /// The pane was resized to `cols` columns.
    Resize { cols: usize },

    /// Focuses the search bar.
    SearchMode,
    /// Returns to grid navigation, keeping the query.
    ExitSearch,
    /// Appends a character to the search text.
    Char(char),
    /// Removes the last character from the search text.
    Backspace,
    /// Empties the search text.
    ClearSearch,
    /// Replaces the search text.
    SetSearch(String),

    /// Activates a category by label. `"All"` disables the category filter.
    SelectCategory(String),
    /// Activates the next category chip (wraps).
    NextCategory,
    /// Activates the previous category chip (wraps).
    PrevCategory,

    PrevPage,
    NextPage,

    /// Moves the card cursor forward (wraps within the page).
    CursorDown,
    /// Moves the card cursor back (wraps within the page).
    CursorUp,
    /// Opens or closes the selected card's details.
    ToggleDetails,
    /// Opens the selected card's purchase link.
    OpenPurchase,
    /// Opens the selected card's full-description page.
    OpenDetail,

    /// Hides the plugin pane.
    CloseFocus,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(render, actions)`: whether the view changed, and side effects to execute
/// in order.
///
/// # Errors
///
/// Currently infallible for all events; the `Result` carries state errors the
/// runtime should log.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let before = (
        state.query.search_text().to_string(),
        state.query.active_category().to_string(),
        state.query.current_page(),
    );

    let outcome = dispatch(state, event)?;

    state.settle();
    let after = (
        state.query.search_text(),
        state.query.active_category(),
        state.query.current_page(),
    );
    if (before.0.as_str(), before.1.as_str(), before.2) != after {
        state.reset_page_local_state();
    }

    Ok(outcome)
}

#[allow(clippy::too_many_lines)]
fn dispatch(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    match event {
        Event::LoadCatalog => {
            let request = state.loader.start();
            tracing::info!(url = %request.url, "loading catalog");
            Ok((true, vec![Action::FetchCatalog(request)]))
        }
        Event::CatalogResponse {
            source,
            status,
            body,
        } => match state.loader.on_response(*source, *status, body) {
            LoadOutcome::Loaded(catalog) => {
                state.set_catalog(catalog);
                Ok((true, vec![]))
            }
            LoadOutcome::Retry(request) => Ok((false, vec![Action::FetchCatalog(request)])),
            LoadOutcome::Failed(_) => Ok((true, vec![])),
            LoadOutcome::Ignored => Ok((false, vec![])),
        },
        Event::PermissionsDenied => {
            state.loader.abort(&BookshelfError::PermissionDenied(
                "web access is required to load the catalog".to_string(),
            ));
            Ok((true, vec![]))
        }
        Event::Resize { cols } => {
            if state.viewport_cols == *cols {
                return Ok((false, vec![]));
            }
            let old_size = state.page_size();
            state.viewport_cols = *cols;
            if old_size != state.page_size() {
                tracing::debug!(cols, page_size = state.page_size(), "page size changed");
            }
            Ok((true, vec![]))
        }
        Event::SearchMode => {
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.query.search_text(), "leaving search bar");
            state.input_mode = InputMode::Browse;
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if !state.input_mode.is_typing() {
                return Ok((false, vec![]));
            }
            state.query.push_search_char(*c);
            tracing::trace!(query = %state.query.search_text(), char = %c, "search query updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if !state.input_mode.is_typing() {
                return Ok((false, vec![]));
            }
            Ok((state.query.pop_search_char(), vec![]))
        }
        Event::ClearSearch => {
            if state.query.search_text().is_empty() {
                return Ok((false, vec![]));
            }
            state.query.set_search(String::new());
            Ok((true, vec![]))
        }
        Event::SetSearch(text) => {
            state.query.set_search(text.clone());
            Ok((true, vec![]))
        }
        Event::SelectCategory(label) => {
            if state.query.active_category() == label {
                return Ok((false, vec![]));
            }
            tracing::debug!(category = %label, "category selected");
            state.query.set_category(label.clone());
            Ok((true, vec![]))
        }
        Event::NextCategory => Ok((cycle_category(state, true), vec![])),
        Event::PrevCategory => Ok((cycle_category(state, false), vec![])),
        Event::PrevPage => {
            if !state.current_page().has_prev() {
                return Ok((false, vec![]));
            }
            state.query.prev_page();
            Ok((true, vec![]))
        }
        Event::NextPage => {
            if !state.current_page().has_next() {
                return Ok((false, vec![]));
            }
            state.query.next_page();
            Ok((true, vec![]))
        }
        Event::CursorDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::CursorUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::ToggleDetails => Ok((state.toggle_details(), vec![])),
        Event::OpenPurchase => {
            let Some(book) = state.selected_book() else {
                return Ok((false, vec![]));
            };
            match book.purchase_link() {
                Some(url) => {
                    tracing::debug!(book_id = %book.id, url = %url, "opening purchase link");
                    Ok((false, vec![Action::OpenUrl { url: url.to_string() }]))
                }
                None => {
                    tracing::debug!(book_id = %book.id, "purchase link is a placeholder");
                    Ok((false, vec![]))
                }
            }
        }
        Event::OpenDetail => {
            let Some(book) = state.selected_book() else {
                return Ok((false, vec![]));
            };
            let url = state.detail_url(book);
            tracing::debug!(book_id = %book.id, url = %url, "opening detail page");
            Ok((false, vec![Action::OpenUrl { url }]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
    }
}

/// Moves the active category one chip forward or back. Returns whether it moved.
fn cycle_category(state: &mut AppState, forward: bool) -> bool {
    let categories = state.catalog.get_categories();
    if categories.len() < 2 {
        return false;
    }
    let active = state.query.active_category().to_lowercase();
    let current = categories
        .iter()
        .position(|label| label.to_lowercase() == active)
        .unwrap_or(0);
    let next = if forward {
        (current + 1) % categories.len()
    } else {
        (current + categories.len() - 1) % categories.len()
    };
    let label = categories
        .get(next)
        .cloned()
        .unwrap_or_else(|| ALL_CATEGORY.to_string());
    state.query.set_category(label);
    true
}
