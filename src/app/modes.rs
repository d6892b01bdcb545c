//! Input mode state for the application.
//!
//! The plugin is either browsing the grid or typing into the search bar. The mode
//! decides how keys are interpreted and which help text the footer shows.
//!
//! # Example
//!
//! ```rust
//! use bookshelf::app::InputMode;
//!
//! let mode = InputMode::default();
//! assert_eq!(mode, InputMode::Browse);
//! assert!(!mode.is_typing());
//! ```

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Grid navigation and commands.
    ///
    /// Available keybindings: / (search), Tab/Shift+Tab (category), h/l (page),
    /// j/k (card), Enter (details), o (buy), d (detail page), q (quit).
    #[default]
    Browse,

    /// Search bar has focus; printable keys edit the query.
    ///
    /// Enter or Esc return to [`InputMode::Browse`] keeping the query.
    Search,
}

impl InputMode {
    /// Whether printable keys should be treated as search input.
    #[must_use]
    pub const fn is_typing(self) -> bool {
        matches!(self, Self::Search)
    }
}
