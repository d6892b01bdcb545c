//! Notice component renderer.
//!
//! This module renders the message shown in place of the card grid: the
//! loading indicator, the load failure, or the zero-result message.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Notice, NoticeKind};

/// Renders a notice centered horizontally, starting at `row`.
///
/// # Layout
///
/// ```text
/// [blank line]
/// [left padding] MESSAGE [right padding]
/// [left padding] subtitle [right padding]
/// ```
///
/// A load failure uses the `error_fg` color and bold styling, so it cannot be
/// mistaken for an empty result. The subtitle uses `text_dim` with dim styling.
///
/// # Returns
///
/// The next available row position.
pub fn render_notice(row: usize, notice: &Notice, theme: &Theme, cols: usize) -> usize {
    let (color, prefix) = match notice.kind {
        NoticeKind::Loading | NoticeKind::NoMatches => (&theme.colors.empty_state_fg, ""),
        NoticeKind::LoadFailed => (&theme.colors.error_fg, "\u{2716} "),
    };

    let message = format!("{prefix}{}", notice.message);
    let row = row + 1;
    print_centered(row, &message, cols, || {
        if notice.kind == NoticeKind::LoadFailed {
            print!("{}", Theme::bold());
        }
        print!("{}", Theme::fg(color));
    });

    print_centered(row + 1, &notice.subtitle, cols, || {
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.text_dim));
    });

    row + 2
}

fn print_centered(row: usize, text: &str, cols: usize, style: impl FnOnce()) {
    let text = if text.chars().count() > cols {
        fit(text, cols)
    } else {
        text.to_string()
    };
    let len = text.chars().count();
    let padding = (cols.saturating_sub(len)) / 2;

    position_cursor(row, 1);
    style();
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
    print!("{}", Theme::reset());
}
