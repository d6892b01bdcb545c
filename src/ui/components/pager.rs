//! Pager line renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PagerInfo;

const PREV_LABEL: &str = "\u{2039} Prev";
const NEXT_LABEL: &str = "Next \u{203a}";

/// Renders `‹ Prev   Showing a–b of t (page p/n)   Next ›` centered.
///
/// Disabled controls are drawn in `disabled_fg` and dimmed.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_pager(row: usize, pager: &PagerInfo, theme: &Theme, cols: usize) -> usize {
    let len = PREV_LABEL.chars().count()
        + 3
        + pager.summary.chars().count()
        + 3
        + NEXT_LABEL.chars().count();
    let padding = (cols.saturating_sub(len)) / 2;

    position_cursor(row, 1);
    print!("{}", " ".repeat(padding));
    print_control(PREV_LABEL, pager.prev_disabled, theme);
    print!("   ");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{}", pager.summary);
    print!("{}", Theme::reset());
    print!("   ");
    print_control(NEXT_LABEL, pager.next_disabled, theme);
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
    row + 1
}

fn print_control(label: &str, disabled: bool, theme: &Theme) {
    if disabled {
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.disabled_fg));
    } else {
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.link_fg));
    }
    print!("{label}");
    print!("{}", Theme::reset());
}
