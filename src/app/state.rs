//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the single owner of everything the plugin
//! knows between events: the loaded catalog, the load progress, the query, the
//! viewport width, and the card cursor. Derived data (filtered list, page
//! bounds) is never stored; it is recomputed from these inputs whenever it is
//! needed, so a render always reflects the current query and pane width.
//!
//! # View Model Computation
//!
//! [`AppState::compute_view`] produces a complete [`CatalogView`] for one frame.
//! The renderer paints that description and nothing else.
//!
//! # Example
//!
//! ```rust
//! use bookshelf::app::AppState;
//! use bookshelf::catalog::Catalog;
//! use bookshelf::Book;
//!
//! let mut state = AppState::default();
//! state.set_catalog(Catalog::from_books(vec![Book::new("1", "Dune")]));
//! let view = state.compute_view(24, 80);
//! assert_eq!(view.header.summary.as_deref(), Some("1 of 1 books"));
//! ```

use super::filter::{filter_books, highlight_ranges, search_terms};
use super::modes::InputMode;
use super::pagination::{paginate, Breakpoint, Page, PageSizeProvider};
use super::query::QueryState;
use crate::catalog::{join_url, Catalog, CatalogEndpoints, CatalogLoader, LoadState};
use crate::domain::Book;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CardInfo, CatalogView, ChipInfo, FooterInfo, HeaderInfo, Notice, NoticeKind, PagerInfo,
    PurchaseLink, SearchBarInfo,
};
use std::collections::BTreeSet;
use std::fmt;

/// Maximum number of tags shown on a card.
pub const MAX_CARD_TAGS: usize = 4;

/// Narrowest card the grid will lay out, in columns.
const MIN_CARD_WIDTH: usize = 24;

/// Number of card rows a full page is laid out in.
const GRID_ROWS: usize = 2;

/// Central application state container.
pub struct AppState {
    /// Loaded catalog; empty until the load succeeds.
    pub catalog: Catalog,

    /// Primary/fallback load sequence and its progress.
    pub loader: CatalogLoader,

    /// Search text, active category, requested page.
    pub query: QueryState,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Pane width in columns, as last reported by a resize.
    pub viewport_cols: usize,

    /// Index of the card cursor within the current page.
    pub selected_card: usize,

    /// Page positions of cards whose "More details" region is open.
    pub expanded: BTreeSet<usize>,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Base URL used to resolve detail links.
    pub base_url: String,

    page_sizes: Box<dyn PageSizeProvider>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("books", &self.catalog.len())
            .field("load_state", self.loader.state())
            .field("query", &self.query)
            .field("input_mode", &self.input_mode)
            .field("viewport_cols", &self.viewport_cols)
            .field("selected_card", &self.selected_card)
            .finish_non_exhaustive()
    }
}

impl Default for AppState {
    fn default() -> Self {
        let base_url = crate::DEFAULT_BASE_URL.to_string();
        let endpoints = CatalogEndpoints::resolve(
            &base_url,
            crate::DEFAULT_CATALOG_PATH,
            crate::DEFAULT_FALLBACK_PATH,
        );
        Self::new(
            CatalogLoader::new(endpoints),
            Box::new(Breakpoint::default()),
            Theme::default(),
            base_url,
        )
    }
}

impl AppState {
    /// Creates a state with an empty catalog waiting to be loaded.
    #[must_use]
    pub fn new(
        loader: CatalogLoader,
        page_sizes: Box<dyn PageSizeProvider>,
        theme: Theme,
        base_url: String,
    ) -> Self {
        Self {
            catalog: Catalog::default(),
            loader,
            query: QueryState::default(),
            input_mode: InputMode::Browse,
            viewport_cols: 0,
            selected_card: 0,
            expanded: BTreeSet::new(),
            theme,
            base_url,
            page_sizes,
        }
    }

    /// Installs a loaded catalog and resets per-page state.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.reset_page_local_state();
        self.settle();
    }

    /// Whether the catalog has loaded successfully.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self.loader.state(), LoadState::Ready) || !self.catalog.is_empty()
    }

    /// Items per page for the current viewport width.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_sizes.page_size(self.viewport_cols).max(1)
    }

    /// Books passing the current query, in catalog order.
    #[must_use]
    pub fn filtered(&self) -> Vec<&Book> {
        filter_books(self.catalog.get_all(), &self.query)
    }

    /// Pagination of the current filtered result at the current page size.
    #[must_use]
    pub fn current_page(&self) -> Page {
        paginate(
            self.filtered().len(),
            self.page_size(),
            self.query.current_page(),
        )
    }

    /// Books shown on the current page.
    #[must_use]
    pub fn page_books(&self) -> Vec<&Book> {
        let filtered = self.filtered();
        let page = paginate(filtered.len(), self.page_size(), self.query.current_page());
        filtered[page.start..page.end].to_vec()
    }

    /// Book under the card cursor, if the page has any.
    #[must_use]
    pub fn selected_book(&self) -> Option<&Book> {
        self.page_books().get(self.selected_card).copied()
    }

    /// Clamps the requested page and the card cursor to the current result.
    ///
    /// Called after every state change so that the stored page always lies in
    /// `[1, total_pages]` before a render.
    pub fn settle(&mut self) {
        let page = self.current_page();
        if page.page != self.query.current_page() {
            tracing::debug!(
                requested = self.query.current_page(),
                clamped = page.page,
                total_pages = page.total_pages,
                "page clamped"
            );
            self.query.clamp_page(page.page);
        }

        let on_page = page.end - page.start;
        if on_page == 0 {
            self.selected_card = 0;
        } else {
            self.selected_card = self.selected_card.min(on_page - 1);
        }
    }

    /// Closes all detail regions and puts the cursor on the first card.
    pub fn reset_page_local_state(&mut self) {
        self.selected_card = 0;
        self.expanded.clear();
    }

    /// Moves the card cursor forward, wrapping to the first card.
    pub fn move_selection_down(&mut self) {
        let count = self.page_books().len();
        if count == 0 {
            return;
        }
        self.selected_card = (self.selected_card + 1) % count;
    }

    /// Moves the card cursor back, wrapping to the last card.
    pub fn move_selection_up(&mut self) {
        let count = self.page_books().len();
        if count == 0 {
            return;
        }
        if self.selected_card == 0 {
            self.selected_card = count - 1;
        } else {
            self.selected_card -= 1;
        }
    }

    /// Opens or closes the selected card's "More details" region.
    ///
    /// Returns `false` when there is no card to toggle.
    pub fn toggle_details(&mut self) -> bool {
        if self.selected_book().is_none() {
            return false;
        }
        if !self.expanded.remove(&self.selected_card) {
            self.expanded.insert(self.selected_card);
        }
        true
    }

    /// Absolute URL of a book's full-description page.
    #[must_use]
    pub fn detail_url(&self, book: &Book) -> String {
        join_url(&self.base_url, &book.detail_path())
    }

    /// Computes the complete view model for one frame.
    ///
    /// # Parameters
    ///
    /// * `rows` - Terminal height in character cells
    /// * `cols` - Terminal width in character cells
    #[must_use]
    pub fn compute_view(&self, rows: usize, cols: usize) -> CatalogView {
        let _span = tracing::debug_span!("compute_view", rows, cols).entered();

        let search_bar = SearchBarInfo {
            query: self.query.search_text().to_string(),
            focused: self.input_mode.is_typing(),
        };
        let footer = self.compute_footer();

        match self.loader.state() {
            LoadState::Failed(reason) => {
                return CatalogView {
                    header: Self::compute_header(None),
                    search_bar,
                    chips: vec![],
                    cards: vec![],
                    columns: 1,
                    pager: None,
                    notice: Some(Notice {
                        kind: NoticeKind::LoadFailed,
                        message: "Could not load the catalog".to_string(),
                        subtitle: reason.clone(),
                    }),
                    footer,
                };
            }
            LoadState::Idle | LoadState::Pending(_) if !self.is_ready() => {
                return CatalogView {
                    header: Self::compute_header(None),
                    search_bar,
                    chips: vec![],
                    cards: vec![],
                    columns: 1,
                    pager: None,
                    notice: Some(Notice {
                        kind: NoticeKind::Loading,
                        message: "Loading catalog...".to_string(),
                        subtitle: self.loader.endpoints().primary.clone(),
                    }),
                    footer,
                };
            }
            _ => {}
        }

        let filtered = self.filtered();
        let page_size = self.page_size();
        let page = paginate(filtered.len(), page_size, self.query.current_page());
        let terms = search_terms(self.query.search_text());

        let cards: Vec<CardInfo> = filtered[page.start..page.end]
            .iter()
            .enumerate()
            .map(|(index, book)| self.compute_card(book, index, &terms))
            .collect();

        let notice = if cards.is_empty() {
            Some(self.compute_no_matches())
        } else {
            None
        };

        CatalogView {
            header: Self::compute_header(Some(format!(
                "{} of {} books",
                filtered.len(),
                self.catalog.len()
            ))),
            search_bar,
            chips: self.compute_chips(),
            cards,
            columns: Self::grid_columns(page_size, cols),
            pager: Some(PagerInfo {
                summary: page.summary(),
                prev_disabled: !page.has_prev(),
                next_disabled: !page.has_next(),
            }),
            notice,
            footer,
        }
    }

    fn compute_card(&self, book: &Book, index: usize, terms: &[String]) -> CardInfo {
        CardInfo {
            id: book.id.clone(),
            title: book.title.clone(),
            short: book.short.clone(),
            cover: book.cover.clone(),
            tags: book.tags.iter().take(MAX_CARD_TAGS).cloned().collect(),
            detail_url: self.detail_url(book),
            purchase: book
                .purchase_link()
                .map_or(PurchaseLink::Placeholder, |url| {
                    PurchaseLink::Available(url.to_string())
                }),
            expanded: self.expanded.contains(&index),
            is_selected: index == self.selected_card,
            highlight_ranges: highlight_ranges(&book.title, terms),
        }
    }

    fn compute_chips(&self) -> Vec<ChipInfo> {
        let active = self.query.active_category().to_lowercase();
        self.catalog
            .get_categories()
            .iter()
            .map(|label| ChipInfo {
                label: label.clone(),
                active: label.to_lowercase() == active,
            })
            .collect()
    }

    fn compute_no_matches(&self) -> Notice {
        let subtitle = if self.catalog.is_empty() {
            "The catalog is empty".to_string()
        } else if self.query.search_text().trim().is_empty() {
            format!("Nothing filed under \"{}\"", self.query.active_category())
        } else {
            "Try fewer or different words, or press Ctrl+u to clear the search".to_string()
        };
        Notice {
            kind: NoticeKind::NoMatches,
            message: "No books match your search".to_string(),
            subtitle,
        }
    }

    fn compute_header(summary: Option<String>) -> HeaderInfo {
        HeaderInfo {
            title: " Bookshelf ".to_string(),
            summary,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Search => "Type to filter  Ctrl+u: clear  Enter/Esc: done".to_string(),
            InputMode::Browse => {
                "/: search  Tab: category  h/l: page  j/k: select  Enter: details  o: buy  d: open  q: quit"
                    .to_string()
            }
        };
        FooterInfo { keybindings }
    }

    /// Cards per grid row: a full page fills two rows, limited by pane width.
    const fn grid_columns(page_size: usize, cols: usize) -> usize {
        let wanted = page_size.div_ceil(GRID_ROWS);
        let fits = cols / MIN_CARD_WIDTH;
        let columns = if wanted < fits { wanted } else { fits };
        if columns == 0 {
            1
        } else {
            columns
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pagination::FixedPageSize;
    use crate::catalog::CatalogSource;

    fn fiction_catalog() -> Catalog {
        let books = (1..=10)
            .map(|i| {
                let mut book = Book::new(i.to_string(), format!("Book {i}"));
                book.category = Some(if i <= 3 { "Fiction" } else { "Business" }.to_string());
                book.tags = vec!["a", "b", "c", "d", "e"].into_iter().map(String::from).collect();
                if i == 1 {
                    book.buy_url = Some("https://store.example/1".to_string());
                }
                book
            })
            .collect();
        Catalog::from_books(books)
    }

    fn state_with(page_size: usize, catalog: Catalog) -> AppState {
        let loader = CatalogLoader::new(CatalogEndpoints::resolve(
            "http://shelf.test",
            "/books.json",
            "/ebooks/books.json",
        ));
        let mut state = AppState::new(
            loader,
            Box::new(FixedPageSize(page_size)),
            Theme::default(),
            "http://shelf.test".to_string(),
        );
        state.set_catalog(catalog);
        state
    }

    #[test]
    fn loading_view_has_no_counts() {
        let mut state = AppState::default();
        state.loader.start();
        let view = state.compute_view(24, 80);
        assert_eq!(view.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Loading));
        assert!(view.header.summary.is_none());
        assert!(view.pager.is_none());
    }

    #[test]
    fn failed_load_is_distinct_from_empty_result() {
        let mut state = AppState::default();
        state.loader.start();
        state.loader.on_response(CatalogSource::Primary, 404, b"");
        state.loader.on_response(CatalogSource::Fallback, 503, b"");

        let view = state.compute_view(24, 80);
        let notice = view.notice.expect("failure notice");
        assert_eq!(notice.kind, NoticeKind::LoadFailed);
        assert!(notice.subtitle.contains("HTTP 503"));
        assert!(view.header.summary.is_none());
        assert!(view.pager.is_none());
        assert!(view.cards.is_empty());
    }

    #[test]
    fn fiction_filter_fits_one_page() {
        let mut state = state_with(4, fiction_catalog());
        state.query.set_category("Fiction");
        state.settle();

        let view = state.compute_view(24, 80);
        assert_eq!(view.cards.len(), 3);
        assert_eq!(view.header.summary.as_deref(), Some("3 of 10 books"));
        let pager = view.pager.expect("pager");
        assert_eq!(pager.summary, "Showing 1\u{2013}3 of 3 (page 1/1)");
        assert!(pager.prev_disabled);
        assert!(pager.next_disabled);
        let active: Vec<&str> = view
            .chips
            .iter()
            .filter(|c| c.active)
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(active, ["Fiction"]);
    }

    #[test]
    fn no_match_view_keeps_counts() {
        let mut state = state_with(4, fiction_catalog());
        state.query.set_search("zzz-no-match");
        state.settle();

        let view = state.compute_view(24, 80);
        assert!(view.cards.is_empty());
        assert_eq!(view.header.summary.as_deref(), Some("0 of 10 books"));
        assert_eq!(
            view.pager.map(|p| p.summary).as_deref(),
            Some("Showing 0\u{2013}0 of 0 (page 1/1)")
        );
        assert_eq!(view.notice.map(|n| n.kind), Some(NoticeKind::NoMatches));
    }

    #[test]
    fn settle_clamps_requested_page() {
        let mut state = state_with(4, fiction_catalog());
        state.query.set_category("Business");
        for _ in 0..4 {
            state.query.next_page();
        }
        assert_eq!(state.query.current_page(), 5);
        state.settle();
        assert_eq!(state.query.current_page(), 2);
        let view = state.compute_view(24, 80);
        assert_eq!(view.pager.unwrap().summary, "Showing 5\u{2013}7 of 7 (page 2/2)");
    }

    #[test]
    fn cards_expose_links_and_cap_tags() {
        let state = state_with(4, fiction_catalog());
        let view = state.compute_view(24, 80);

        let first = &view.cards[0];
        assert_eq!(first.tags.len(), MAX_CARD_TAGS);
        assert_eq!(first.detail_url, "http://shelf.test/book/1/detail.html");
        assert_eq!(first.purchase.url(), Some("https://store.example/1"));
        assert!(first.is_selected);

        let second = &view.cards[1];
        assert_eq!(second.purchase, PurchaseLink::Placeholder);
        assert_eq!(second.purchase.href(), "#");
        assert!(!second.is_selected);
    }

    #[test]
    fn toggle_details_marks_card_expanded() {
        let mut state = state_with(4, fiction_catalog());
        state.move_selection_down();
        assert!(state.toggle_details());
        let view = state.compute_view(24, 80);
        assert!(!view.cards[0].expanded);
        assert!(view.cards[1].expanded);

        assert!(state.toggle_details());
        assert!(!state.compute_view(24, 80).cards[1].expanded);
    }

    #[test]
    fn duplicate_ids_expand_independently() {
        let books = vec![
            Book::new("7", "First printing"),
            Book::new("7", "Second printing"),
        ];
        let mut state = state_with(4, Catalog::from_books(books));
        assert!(state.toggle_details());

        let view = state.compute_view(24, 80);
        assert!(view.cards[0].expanded);
        assert!(!view.cards[1].expanded);
    }

    #[test]
    fn selection_wraps_within_page() {
        let mut state = state_with(4, fiction_catalog());
        state.move_selection_up();
        assert_eq!(state.selected_card, 3);
        state.move_selection_down();
        assert_eq!(state.selected_card, 0);
        assert_eq!(state.selected_book().map(|b| b.id.as_str()), Some("1"));
    }

    #[test]
    fn grid_columns_follow_page_size_and_width() {
        assert_eq!(AppState::grid_columns(8, 200), 4);
        assert_eq!(AppState::grid_columns(4, 100), 2);
        assert_eq!(AppState::grid_columns(8, 50), 2);
        assert_eq!(AppState::grid_columns(4, 10), 1);
    }
}
