//! Card grid renderer.
//!
//! Cards are laid out left to right, `columns` per row. Each card is a framed
//! block: title, a two-line blurb, cover, tags, and a details toggle. An
//! expanded card adds a note and its two links, so rows may differ in height.

use crate::ui::helpers::{fit, highlighted, hyperlink, position_cursor, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardInfo, PurchaseLink};

/// Left and right margin around the grid.
const GRID_MARGIN: usize = 2;

/// Blank columns between neighbouring cards.
const CARD_GAP: usize = 1;

/// Lines of the short description shown on a card.
const SHORT_LINES: usize = 2;

const DETAIL_NOTE: &str = "Read the full description, then check the latest price on Amazon.";
const DETAIL_LINK_LABEL: &str = "Full description";
const PURCHASE_LINK_LABEL: &str = "View on Amazon";

/// Renders the cards from `row` down to `last_row` (inclusive).
///
/// Grid rows that would cross `last_row` are not drawn; a dimmed marker tells
/// the user that more cards are on the page than fit the pane.
///
/// # Returns
///
/// The next available row position.
pub fn render_grid(
    row: usize,
    last_row: usize,
    cards: &[CardInfo],
    columns: usize,
    theme: &Theme,
    cols: usize,
) -> usize {
    let columns = columns.max(1);
    let usable = cols.saturating_sub(GRID_MARGIN * 2);
    let card_width = (usable.saturating_sub(CARD_GAP * (columns - 1)) / columns).max(8);

    let mut current_row = row;
    for (index, chunk) in cards.chunks(columns).enumerate() {
        let blocks: Vec<Vec<String>> = chunk
            .iter()
            .map(|card| card_lines(card, theme, card_width))
            .collect();
        let height = blocks.iter().map(Vec::len).max().unwrap_or(0);

        if current_row + height > last_row + 1 {
            let hidden = cards.len() - index * columns;
            position_cursor(current_row.min(last_row), GRID_MARGIN + 1);
            print!("{}", Theme::dim());
            print!("{}", Theme::fg(&theme.colors.text_dim));
            print!("\u{2026} {hidden} more on this page (enlarge the pane)");
            print!("{}", Theme::reset());
            return current_row + 1;
        }

        for (slot, block) in blocks.iter().enumerate() {
            let col = GRID_MARGIN + 1 + slot * (card_width + CARD_GAP);
            for (offset, line) in block.iter().enumerate() {
                position_cursor(current_row + offset, col);
                print!("{line}");
            }
        }
        current_row += height;
    }
    current_row
}

/// Builds the styled lines of one card, each `width` columns wide.
pub(crate) fn card_lines(card: &CardInfo, theme: &Theme, width: usize) -> Vec<String> {
    let inner = width.saturating_sub(4);
    let border_color = if card.is_selected {
        &theme.colors.card_selected_border
    } else {
        &theme.colors.card_border
    };
    let border = Theme::fg(border_color);
    let frame = |content: String| {
        format!(
            "{border}\u{2502}{} {content}{border} \u{2502}{}",
            Theme::reset(),
            Theme::reset()
        )
    };
    let styled = |style: String, text: &str| format!("{style}{}{}", fit(text, inner), Theme::reset());

    let mut lines = Vec::with_capacity(12);
    lines.push(format!(
        "{border}\u{250c}{}\u{2510}{}",
        "\u{2500}".repeat(width.saturating_sub(2)),
        Theme::reset()
    ));

    let title_style = if card.is_selected {
        format!(
            "{}{}{}",
            Theme::bold(),
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.text_normal))
    };
    let title = highlighted(
        &fit(&card.title, inner),
        &visible_ranges(&card.highlight_ranges, card.title.chars().count(), inner),
        theme,
        &title_style,
    );
    lines.push(frame(format!("{title_style}{title}{}", Theme::reset())));

    let mut short = wrap(&card.short, inner, SHORT_LINES);
    short.resize(SHORT_LINES, String::new());
    for text in &short {
        lines.push(frame(styled(Theme::fg(&theme.colors.text_normal), text)));
    }

    let cover = if card.cover.is_empty() {
        String::new()
    } else {
        format!("cover: {}", card.cover)
    };
    lines.push(frame(styled(
        format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim)),
        &cover,
    )));

    let tags = card
        .tags
        .iter()
        .map(|tag| format!("#{tag}"))
        .collect::<Vec<_>>()
        .join("  ");
    lines.push(frame(styled(Theme::fg(&theme.colors.tag_fg), &tags)));

    let toggle = if card.expanded {
        "[-] Hide details"
    } else {
        "[+] More details"
    };
    lines.push(frame(styled(Theme::fg(&theme.colors.link_fg), toggle)));

    if card.expanded {
        let mut note = wrap(DETAIL_NOTE, inner, 2);
        note.resize(2, String::new());
        for text in &note {
            lines.push(frame(styled(
                format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim)),
                text,
            )));
        }
        lines.push(frame(links_line(card, theme, inner)));
    }

    lines.push(format!(
        "{border}\u{2514}{}\u{2518}{}",
        "\u{2500}".repeat(width.saturating_sub(2)),
        Theme::reset()
    ));
    lines
}

/// `Full description  View on Amazon`, both as terminal hyperlinks.
///
/// The purchase label is drawn disabled, without a link, for a placeholder.
fn links_line(card: &CardInfo, theme: &Theme, inner: usize) -> String {
    let visible = DETAIL_LINK_LABEL.len() + 2 + PURCHASE_LINK_LABEL.len();
    if visible > inner {
        return format!(
            "{}{}{}",
            Theme::fg(&theme.colors.link_fg),
            fit(DETAIL_LINK_LABEL, inner),
            Theme::reset()
        );
    }

    let link_style = format!("{}{}", Theme::underline(), Theme::fg(&theme.colors.link_fg));
    let detail = hyperlink(&card.detail_url, DETAIL_LINK_LABEL);
    let purchase = match &card.purchase {
        PurchaseLink::Available(url) => {
            format!("{link_style}{}{}", hyperlink(url, PURCHASE_LINK_LABEL), Theme::reset())
        }
        PurchaseLink::Placeholder => format!(
            "{}{}{PURCHASE_LINK_LABEL}{}",
            Theme::dim(),
            Theme::fg(&theme.colors.disabled_fg),
            Theme::reset()
        ),
    };

    format!(
        "{link_style}{detail}{}  {purchase}{}",
        Theme::reset(),
        " ".repeat(inner - visible)
    )
}

/// Clips match ranges to the characters `fit` keeps, never covering the ellipsis.
fn visible_ranges(ranges: &[(usize, usize)], len: usize, width: usize) -> Vec<(usize, usize)> {
    let kept = if len > width {
        width.saturating_sub(1)
    } else {
        len
    };
    ranges
        .iter()
        .filter(|&&(start, _)| start < kept)
        .map(|&(start, end)| (start, end.min(kept)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Removes CSI and OSC escape sequences, leaving the visible text.
    fn visible(line: &str) -> String {
        let mut out = String::new();
        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '\u{1b}' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('[') => {
                    for c in chars.by_ref() {
                        if c.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
                Some(']') => {
                    while let Some(c) = chars.next() {
                        if c == '\u{1b}' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
        }
        out
    }

    fn card() -> CardInfo {
        CardInfo {
            id: "7".to_string(),
            title: "Atomic Habits".to_string(),
            short: "Tiny changes, remarkable results.".to_string(),
            cover: "covers/atomic.jpg".to_string(),
            tags: vec!["habits".to_string(), "self-help".to_string()],
            detail_url: "http://shelf.test/book/7/detail.html".to_string(),
            purchase: PurchaseLink::Available("https://store.test/7".to_string()),
            expanded: false,
            is_selected: false,
            highlight_ranges: vec![(0, 6)],
        }
    }

    #[test]
    fn collapsed_card_has_fixed_layout() {
        let lines: Vec<String> = card_lines(&card(), &Theme::default(), 40)
            .iter()
            .map(|l| visible(l))
            .collect();

        assert_eq!(lines.len(), 8);
        assert!(lines.iter().all(|l| l.chars().count() == 40), "{lines:#?}");
        assert!(lines[1].contains("Atomic Habits"));
        assert!(lines[2].contains("Tiny changes, remarkable results."));
        assert!(lines[4].contains("cover: covers/atomic.jpg"));
        assert!(lines[5].contains("#habits  #self-help"));
        assert!(lines[6].contains("[+] More details"));
    }

    #[test]
    fn expanded_card_shows_note_and_links() {
        let mut info = card();
        info.expanded = true;
        let raw = card_lines(&info, &Theme::default(), 40);
        let lines: Vec<String> = raw.iter().map(|l| visible(l)).collect();

        assert_eq!(lines.len(), 11);
        assert!(lines[6].contains("[-] Hide details"));
        assert!(lines[7].starts_with("\u{2502} Read the full description"));
        assert!(lines[9].contains("Full description  View on Amazon"));
        assert!(raw[9].contains("\u{1b}]8;;http://shelf.test/book/7/detail.html"));
        assert!(raw[9].contains("\u{1b}]8;;https://store.test/7"));
    }

    #[test]
    fn placeholder_purchase_is_not_a_link() {
        let mut info = card();
        info.expanded = true;
        info.purchase = PurchaseLink::Placeholder;
        let raw = card_lines(&info, &Theme::default(), 40);

        assert!(visible(&raw[9]).contains("View on Amazon"));
        assert_eq!(raw[9].matches("\u{1b}]8;;").count(), 2);
    }

    #[test]
    fn truncated_title_never_highlights_the_ellipsis() {
        assert_eq!(visible_ranges(&[(0, 6), (8, 14)], 14, 10), [(0, 6), (8, 9)]);
        assert_eq!(visible_ranges(&[(9, 14)], 14, 10), []);
        assert_eq!(visible_ranges(&[(0, 13)], 13, 20), [(0, 13)]);

        let theme = Theme::default();
        let mut info = card();
        info.title = "Atomic Habits and More".to_string();
        info.highlight_ranges = vec![(7, 13)];
        let title_line = &card_lines(&info, &theme, 16)[1];
        assert!(visible(title_line).contains("Atomic Habi\u{2026}"));
        assert!(
            title_line.contains(&format!("Habi{}", Theme::reset())),
            "{title_line:?}"
        );

        info.highlight_ranges = vec![(14, 22)];
        let title_line = &card_lines(&info, &theme, 16)[1];
        let marker = Theme::bg(&theme.colors.match_highlight_bg);
        assert!(!title_line.contains(&marker), "{title_line:?}");
    }
}
