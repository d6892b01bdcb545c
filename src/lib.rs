//! Bookshelf: a Zellij plugin for browsing a book catalog.
//!
//! Bookshelf loads a JSON catalog over HTTP and shows it as a paged card grid:
//! - Free-text search across titles, blurbs, tags, keywords, and slugs
//! - Category chips derived from the catalog itself
//! - Page size that follows the pane width
//! - Per-card details with links to a description page and a store
//! - Primary/fallback catalog sources with a visible failure state

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, query state                      │
//! │  - Filter → paginate pipeline                       │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                    │
//! ┌───────────────────────┐        ┌───────────────────────┐
//! │ UI Layer (ui/)        │        │ Catalog Layer         │
//! │ - Rendering           │        │ (catalog/)            │
//! │ - Theming             │        │ - Record store        │
//! │ - Components          │        │ - Primary/fallback    │
//! └───────────────────────┘        └───────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Error types, Book record (domain/)               │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/bookshelf.wasm" {
//!         base_url "http://localhost:8000"
//!         catalog_path "/books.json"
//!         fallback_path "/ebooks/books.json"
//!         wide_threshold "140"
//!         wide_page_size "8"
//!         narrow_page_size "4"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Plugin Load**: parse configuration, initialize tracing, build `AppState`,
//!    request web access permission.
//! 2. **Permission Granted**: `Event::LoadCatalog` issues a web request for the
//!    primary catalog URL.
//! 3. **Response**: a failed primary response triggers one request to the
//!    fallback URL; a second failure puts the view into its failure state.
//! 4. **Interaction**: every key or resize event updates the query and the
//!    viewport; each render re-runs filter and pagination over current state.
//!
//! # Example
//!
//! ```rust
//! use bookshelf::{handle_event, initialize, Config, Event};
//! use bookshelf::catalog::CatalogSource;
//!
//! let mut state = initialize(&Config::default());
//! handle_event(&mut state, &Event::LoadCatalog)?;
//! handle_event(&mut state, &Event::CatalogResponse {
//!     source: CatalogSource::Primary,
//!     status: 200,
//!     body: br#"[{"id": 1, "title": "Dune", "filter": "Fiction"}]"#.to_vec(),
//! })?;
//!
//! let view = state.compute_view(24, 80);
//! assert_eq!(view.cards.len(), 1);
//! # Ok::<(), bookshelf::BookshelfError>(())
//! ```
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Terminal**: Any ANSI-capable terminal emulator; OSC 8 hyperlinks where supported

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{Book, BookshelfError, Result};
pub use ui::Theme;

use app::pagination::{
    Breakpoint, DEFAULT_NARROW_PAGE_SIZE, DEFAULT_WIDE_PAGE_SIZE, DEFAULT_WIDE_THRESHOLD,
};
use catalog::{CatalogEndpoints, CatalogLoader};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Default origin the catalog and detail pages are served from.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default path of the primary catalog.
pub const DEFAULT_CATALOG_PATH: &str = "/books.json";

/// Default path of the fallback catalog.
pub const DEFAULT_FALLBACK_PATH: &str = "/ebooks/books.json";

const DEFAULT_THEME: &str = "catppuccin-mocha";
const DEFAULT_TRACE_LEVEL: &str = "info";

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Configuration values are provided via Zellij's KDL layout configuration
/// and passed to the plugin during initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Origin of the catalog and the detail pages.
    pub base_url: String,

    /// Primary catalog path (or absolute URL).
    pub catalog_path: String,

    /// Fallback catalog path (or absolute URL), tried once if the primary fails.
    pub fallback_path: String,

    /// Page size breakpoint: panes at least `wide_threshold` columns wide use
    /// `wide_page_size`, narrower ones `narrow_page_size`.
    pub page_sizes: Breakpoint,

    /// Built-in theme name to use. Ignored if `theme_file` is set.
    pub theme_name: String,

    /// Path to a custom TOML theme file, `~` already expanded.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing, e.g. `debug`.
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            catalog_path: DEFAULT_CATALOG_PATH.to_string(),
            fallback_path: DEFAULT_FALLBACK_PATH.to_string(),
            page_sizes: Breakpoint::default(),
            theme_name: DEFAULT_THEME.to_string(),
            theme_file: None,
            trace_level: DEFAULT_TRACE_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Missing, blank, or unparsable values fall back to their defaults. Page
    /// sizes of zero are rejected the same way.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use bookshelf::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("base_url".to_string(), "https://books.example.com".to_string());
    /// map.insert("wide_page_size".to_string(), "12".to_string());
    /// map.insert("narrow_page_size".to_string(), "lots".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.base_url, "https://books.example.com");
    /// assert_eq!(config.page_sizes.wide_page_size, 12);
    /// assert_eq!(config.page_sizes.narrow_page_size, 4);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let text = |key: &str, default: &str| {
            config
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .unwrap_or(default)
                .to_string()
        };

        Self {
            base_url: text("base_url", DEFAULT_BASE_URL),
            catalog_path: text("catalog_path", DEFAULT_CATALOG_PATH),
            fallback_path: text("fallback_path", DEFAULT_FALLBACK_PATH),
            page_sizes: Breakpoint {
                wide_threshold: positive(config, "wide_threshold", DEFAULT_WIDE_THRESHOLD),
                wide_page_size: positive(config, "wide_page_size", DEFAULT_WIDE_PAGE_SIZE),
                narrow_page_size: positive(config, "narrow_page_size", DEFAULT_NARROW_PAGE_SIZE),
            },
            theme_name: text("theme", DEFAULT_THEME),
            theme_file: config
                .get("theme_file")
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(infrastructure::expand_tilde),
            trace_level: text("trace_level", DEFAULT_TRACE_LEVEL),
        }
    }

    /// Primary and fallback catalog URLs.
    #[must_use]
    pub fn endpoints(&self) -> CatalogEndpoints {
        CatalogEndpoints::resolve(&self.base_url, &self.catalog_path, &self.fallback_path)
    }

    /// Loads the configured theme, falling back to the default on any error.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            return Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }
        Theme::from_name(&self.theme_name).unwrap_or_else(|| {
            tracing::warn!(theme_name = %self.theme_name, "unknown theme, using default");
            Theme::default()
        })
    }
}

fn positive<T: FromStr + PartialOrd + Default>(
    config: &BTreeMap<String, String>,
    key: &str,
    default: T,
) -> T {
    match config.get(key).map(|s| s.trim().parse::<T>()) {
        Some(Ok(value)) if value > T::default() => value,
        Some(_) => {
            tracing::warn!(key, "invalid numeric option, using default");
            default
        }
        None => default,
    }
}

/// Initializes the plugin state from configuration.
///
/// The catalog is empty and the loader idle; loading starts with
/// [`Event::LoadCatalog`] once web access is granted.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(base_url = %config.base_url, "initializing bookshelf plugin");

    AppState::new(
        CatalogLoader::new(config.endpoints()),
        Box::new(config.page_sizes),
        config.theme(),
        config.base_url.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn endpoints_resolve_against_base_url() {
        let config = Config::from_zellij(&map(&[
            ("base_url", "https://shelf.example/"),
            ("fallback_path", "https://mirror.example/books.json"),
        ]));
        let endpoints = config.endpoints();
        assert_eq!(endpoints.primary, "https://shelf.example/books.json");
        assert_eq!(endpoints.fallback, "https://mirror.example/books.json");
    }

    #[test]
    fn zero_and_garbage_page_sizes_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("wide_threshold", "100"),
            ("wide_page_size", "0"),
            ("narrow_page_size", "-3"),
        ]));
        assert_eq!(config.page_sizes.wide_threshold, 100);
        assert_eq!(config.page_sizes.wide_page_size, 8);
        assert_eq!(config.page_sizes.narrow_page_size, 4);
    }

    #[test]
    fn theme_file_is_tilde_expanded() {
        let config = Config::from_zellij(&map(&[("theme_file", "~/themes/mine.toml")]));
        assert_eq!(config.theme_file.as_deref(), Some("/host/themes/mine.toml"));
    }

    #[test]
    fn unknown_theme_uses_default() {
        let config = Config::from_zellij(&map(&[("theme", "neon")]));
        assert_eq!(config.theme().name, "catppuccin-mocha");
    }

    #[test]
    fn initialize_uses_configured_breakpoint() {
        let config = Config::from_zellij(&map(&[("wide_threshold", "100"), ("wide_page_size", "6")]));
        let mut state = initialize(&config);
        state.viewport_cols = 120;
        assert_eq!(state.page_size(), 6);
        state.viewport_cols = 80;
        assert_eq!(state.page_size(), 4);
    }
}
