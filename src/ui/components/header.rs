//! Header component renderer.
//!
//! This module renders the plugin title bar: the title centered, the result
//! count right-aligned once the catalog is loaded.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header title bar at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Layout
///
/// ```text
/// [left padding] TITLE [right padding] 3 of 10 books
/// ```
///
/// The summary is dropped when the pane is too narrow to show it next to the
/// title.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = header.title.chars().count();
    let padding = (cols.saturating_sub(title_len)) / 2;

    let summary = header
        .summary
        .as_deref()
        .map(|s| format!("{s} "))
        .filter(|s| padding + title_len + s.chars().count() < cols);
    let summary_len = summary.as_ref().map_or(0, |s| s.chars().count());

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{}", header.title);
    print!(
        "{}",
        " ".repeat(cols.saturating_sub(padding + title_len + summary_len))
    );

    if let Some(summary) = summary {
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_dim));
        if let Some(bg) = &theme.colors.header_bg {
            print!("{}", Theme::bg(bg));
        }
        print!("{summary}");
    }

    print!("{}", Theme::reset());
    row + 1
}
