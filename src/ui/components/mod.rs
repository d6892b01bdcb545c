//! Composable UI component renderers.
//!
//! This module provides specialized rendering components for different UI
//! elements, following a component-based architecture. Each component is
//! responsible for rendering a specific part of the interface.
//!
//! # Components
//!
//! - [`header`]: Title bar with the result count
//! - [`search`]: Search input box (border, query text)
//! - [`chips`]: Category chip row
//! - [`grid`]: Book cards laid out in a grid
//! - [`notice`]: Loading, failure, and zero-result messages
//! - [`pager`]: Prev/Next controls and the "Showing" line
//! - [`footer`]: Help text and keybinding hints

mod chips;
mod footer;
mod grid;
mod header;
mod notice;
mod pager;
mod search;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CatalogView;

use chips::render_chips;
use footer::render_footer;
use grid::render_grid;
use header::render_header;
use notice::render_notice;
use pager::render_pager;
use search::render_search_bar;

/// Renders a horizontal border line at the specified row.
///
/// Used to separate UI sections (header/body, body/footer).
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "\u{2500}".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full catalog layout.
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search Bar - 3 lines]
/// [Category chips]
/// [blank line]
/// [Card grid | Notice]
/// [Blank padding to fill screen]
/// [Pager]
/// [Border]
/// [Footer]
/// ```
///
/// The pager and footer are anchored to the bottom of the pane; the grid gets
/// whatever is left in between.
pub fn render_catalog(vm: &CatalogView, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);
    if !vm.chips.is_empty() {
        current_row = render_chips(current_row, &vm.chips, theme, cols);
    }
    current_row += 1;

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);
    let pager_row = border_row.saturating_sub(1);
    let body_last_row = pager_row.saturating_sub(2);

    if let Some(notice) = &vm.notice {
        render_notice(current_row, notice, theme, cols);
    } else if body_last_row >= current_row {
        render_grid(current_row, body_last_row, &vm.cards, vm.columns, theme, cols);
    }

    if let Some(pager) = &vm.pager {
        render_pager(pager_row, pager, theme, cols);
    }
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}
