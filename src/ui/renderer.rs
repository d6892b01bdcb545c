//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `CatalogView`
//! 2. **Component Rendering**: Delegate to specialized component renderers
//!
//! Every render recomputes the filtered list and the page from current state,
//! so what is painted always matches the query and the pane width.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// # Parameters
///
/// * `state` - Current application state
/// * `rows` - Terminal height in rows
/// * `cols` - Terminal width in columns
///
/// # Output
///
/// Prints ANSI-styled output to stdout using `print!` macros.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let view = state.compute_view(rows, cols);
    components::render_catalog(&view, &state.theme, cols, rows);
}
