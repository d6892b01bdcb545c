//! Category chip row renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ChipInfo;

/// Left margin of the chip row.
const CHIP_MARGIN: usize = 2;

/// Renders the category chips on one line, `All` first.
///
/// The active chip is drawn with the `chip_active_*` colors. Chips that do not
/// fit the pane width are replaced by a trailing `+N`.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_chips(row: usize, chips: &[ChipInfo], theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", " ".repeat(CHIP_MARGIN));

    let mut used = CHIP_MARGIN;
    for (index, chip) in chips.iter().enumerate() {
        let text = format!(" {} ", chip.label);
        let width = text.chars().count() + 1;
        let remaining = chips.len() - index;
        let more = format!("+{remaining}");
        if used + width + more.len() + 1 > cols && remaining > 1 {
            print!("{}", Theme::fg(&theme.colors.text_dim));
            print!("{more}");
            used += more.len();
            break;
        }

        if chip.active {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.chip_active_fg));
            print!("{}", Theme::bg(&theme.colors.chip_active_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.chip_fg));
        }
        print!("{text}");
        print!("{}", Theme::reset());
        print!(" ");
        used += width;
    }

    print!("{}", Theme::reset());
    print!("{}", " ".repeat(cols.saturating_sub(used)));
    row + 1
}
