//! Shared rendering utilities and helpers.
//!
//! This module provides low-level rendering utilities used across multiple UI
//! components: cursor positioning, width fitting, word wrapping, search match
//! highlighting, and terminal hyperlinks.
//!
//! The string-producing helpers operate on character indices, not byte indices,
//! so titles with multi-byte characters are cut and highlighted correctly.
//!
//! # Example
//!
//! ```rust
//! use bookshelf::ui::helpers::{fit, wrap};
//!
//! assert_eq!(fit("Dune Messiah", 6), "Dune \u{2026}");
//! assert_eq!(fit("Dune", 6), "Dune  ");
//! assert_eq!(wrap("a quick brown fox", 7, 2), vec!["a quick", "brown\u{2026}"]);
//! ```

use crate::ui::theme::Theme;

const ELLIPSIS: char = '\u{2026}';

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H` to move the cursor.
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Truncates or pads `text` to exactly `width` characters.
///
/// Truncated text ends with an ellipsis.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        let mut out = text.to_string();
        out.extend(std::iter::repeat(' ').take(width - len));
        return out;
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push(ELLIPSIS);
    out
}

/// Greedy word wrap into at most `max_lines` lines of `width` characters.
///
/// Text that does not fit is cut and the last line ends with an ellipsis.
/// Lines are not padded.
#[must_use]
pub fn wrap(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return vec![];
    }

    let mut lines: Vec<String> = vec![];
    let mut current = String::new();
    let mut overflow = false;

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if lines.len() == max_lines {
            overflow = true;
            break;
        }
        if word.chars().count() > width {
            current = fit(word, width);
        } else {
            current.push_str(word);
        }
    }

    if !overflow && !current.is_empty() {
        if lines.len() == max_lines {
            overflow = true;
        } else {
            lines.push(current);
        }
    }

    if overflow {
        if let Some(last) = lines.last_mut() {
            let trimmed: String = last.chars().take(width.saturating_sub(1)).collect();
            *last = format!("{trimmed}{ELLIPSIS}");
        }
    }
    lines
}

/// Wraps `label` in an OSC 8 terminal hyperlink to `url`.
///
/// Terminals without hyperlink support show the label only.
///
/// ```rust
/// use bookshelf::ui::helpers::hyperlink;
///
/// assert_eq!(
///     hyperlink("https://a.test", "buy"),
///     "\u{1b}]8;;https://a.test\u{1b}\\buy\u{1b}]8;;\u{1b}\\"
/// );
/// ```
#[must_use]
pub fn hyperlink(url: &str, label: &str) -> String {
    format!("\u{1b}]8;;{url}\u{1b}\\{label}\u{1b}]8;;\u{1b}\\")
}

/// Styles character ranges of `text` as search matches.
///
/// Ranges are `(start, end)` character indices (inclusive start, exclusive
/// end), sorted and non-overlapping; parts past the end of `text` are ignored.
/// After each highlighted section `restore` is emitted so the surrounding
/// style (for example the selection colors) continues.
#[must_use]
pub fn highlighted(text: &str, ranges: &[(usize, usize)], theme: &Theme, restore: &str) -> String {
    if ranges.is_empty() {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + ranges.len() * 48);
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.max(current_pos).min(chars.len());
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }

        out.extend(&chars[current_pos..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(restore);

        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
    out
}
