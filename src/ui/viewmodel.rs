//! View model types representing renderable UI state.
//!
//! A [`CatalogView`] is the complete description of one frame. It is computed
//! from application state by `AppState::compute_view()` and painted by the
//! renderer; it carries no behaviour of its own, only display-ready data.
//!
//! # Example
//!
//! ```rust
//! use bookshelf::ui::viewmodel::{ChipInfo, PurchaseLink};
//!
//! let chip = ChipInfo { label: "All".to_string(), active: true };
//! assert!(chip.active);
//! assert!(PurchaseLink::Placeholder.url().is_none());
//! ```

use crate::domain::PLACEHOLDER_LINK;

/// Complete UI view model for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView {
    /// Title bar with the result summary.
    pub header: HeaderInfo,

    /// Search input box.
    pub search_bar: SearchBarInfo,

    /// Category chips, `"All"` first. Empty until the catalog is loaded.
    pub chips: Vec<ChipInfo>,

    /// Cards on the current page, in display order.
    pub cards: Vec<CardInfo>,

    /// Number of cards per grid row.
    pub columns: usize,

    /// Pager line; `None` while loading or after a load failure.
    pub pager: Option<PagerInfo>,

    /// Loading, failure, or zero-result notice shown in place of the grid.
    pub notice: Option<Notice>,

    /// Footer information (keybindings, help text).
    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,

    /// `"{filtered} of {total} books"`, present once the catalog is loaded.
    pub summary: Option<String>,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current search query text.
    pub query: String,

    /// Whether keystrokes currently go to the search bar.
    pub focused: bool,
}

/// One category chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipInfo {
    pub label: String,
    pub active: bool,
}

/// Purchase target of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseLink {
    /// External store URL.
    Available(String),
    /// No link in the record; rendered disabled.
    Placeholder,
}

impl PurchaseLink {
    /// URL to open, `None` for the placeholder.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Available(url) => Some(url),
            Self::Placeholder => None,
        }
    }

    /// Link target as written in the card (`#` for the placeholder).
    #[must_use]
    pub fn href(&self) -> &str {
        self.url().unwrap_or(PLACEHOLDER_LINK)
    }
}

/// Display information for a single book card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardInfo {
    pub id: String,
    pub title: String,
    pub short: String,
    pub cover: String,

    /// At most four tags.
    pub tags: Vec<String>,

    /// Absolute URL of the full-description page.
    pub detail_url: String,

    pub purchase: PurchaseLink,

    /// Whether the "More details" region is open.
    pub expanded: bool,

    /// Whether the card cursor is on this card.
    pub is_selected: bool,

    /// Character ranges of the title matched by search terms.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Pager line information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerInfo {
    /// `Showing {start}–{end} of {total} (page {page}/{pages})`.
    pub summary: String,
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

/// Kind of notice replacing the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Loading,
    LoadFailed,
    NoMatches,
}

/// Message shown in place of the card grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,

    /// Primary message (e.g., "No books match your search").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}
