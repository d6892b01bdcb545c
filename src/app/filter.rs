//! Filter engine: category gate plus multi-term substring search.
//!
//! Filtering is a pure, order-preserving function of the book list and the query.
//! Each book's searchable fields are lowercased and joined with a newline; since
//! search terms are whitespace-split they can never contain the delimiter, so a
//! term cannot match across two fields.

use super::query::QueryState;
use crate::domain::Book;

/// Separator placed between haystack fields.
pub const HAYSTACK_DELIMITER: char = '\n';

/// Lowercased search haystack for a book.
///
/// Fields, in order: title, short description, tags (space-joined), keywords, slug.
///
/// # Examples
///
/// ```
/// use bookshelf::app::filter::haystack;
/// use bookshelf::Book;
///
/// let mut book = Book::new("1", "Dune");
/// book.tags = vec!["Sci-Fi".to_string(), "Classic".to_string()];
/// assert_eq!(haystack(&book), "dune\n\nsci-fi classic\n\n");
/// ```
#[must_use]
pub fn haystack(book: &Book) -> String {
    let tags = book.tags.join(" ");
    let fields = [
        book.title.as_str(),
        book.short.as_str(),
        tags.as_str(),
        book.keywords.as_deref().unwrap_or(""),
        book.slug.as_deref().unwrap_or(""),
    ];
    let mut joined = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            joined.push(HAYSTACK_DELIMITER);
        }
        joined.push_str(&field.to_lowercase());
    }
    joined
}

/// Lowercased whitespace-separated terms of a search query.
#[must_use]
pub fn search_terms(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

/// Whether `book` passes the category gate for `category`.
#[must_use]
pub fn matches_category(book: &Book, category: &str, all_categories: bool) -> bool {
    all_categories || book.category_label().to_lowercase() == category.to_lowercase()
}

/// Whether every term occurs in the book's haystack. No terms means a match.
#[must_use]
pub fn matches_terms(book: &Book, terms: &[String]) -> bool {
    if terms.is_empty() {
        return true;
    }
    let hay = haystack(book);
    terms.iter().all(|term| hay.contains(term.as_str()))
}

/// Applies both gates to `books`, preserving source order.
///
/// # Examples
///
/// ```
/// use bookshelf::app::filter::filter_books;
/// use bookshelf::app::QueryState;
/// use bookshelf::Book;
///
/// let mut dune = Book::new("1", "Dune");
/// dune.category = Some("Fiction".to_string());
/// let mut ledger = Book::new("2", "The Ledger");
/// ledger.category = Some("Business".to_string());
/// let books = vec![dune, ledger];
///
/// let mut query = QueryState::default();
/// query.set_category("fiction");
/// let hits = filter_books(&books, &query);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].title, "Dune");
/// ```
#[must_use]
pub fn filter_books<'a>(books: &'a [Book], query: &QueryState) -> Vec<&'a Book> {
    let _span = tracing::debug_span!(
        "filter_books",
        total_books = books.len(),
        query_len = query.search_text().len(),
        category = %query.active_category()
    )
    .entered();

    let terms = search_terms(query.search_text());
    let all_categories = query.is_all_categories();

    let filtered: Vec<&Book> = books
        .iter()
        .filter(|book| matches_category(book, query.active_category(), all_categories))
        .filter(|book| matches_terms(book, &terms))
        .collect();

    tracing::debug!(filtered_count = filtered.len(), "filter applied");
    filtered
}

/// Character ranges in `text` covered by any of `terms`, merged and sorted.
///
/// Used to highlight matches in rendered titles. Ranges are `(start, end)` in
/// character indices with an exclusive end.
#[must_use]
pub fn highlight_ranges(text: &str, terms: &[String]) -> Vec<(usize, usize)> {
    let chars: Vec<char> = text.chars().collect();
    let lowered: Vec<String> = chars.iter().map(|c| c.to_lowercase().collect()).collect();

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for term in terms.iter().filter(|t| !t.is_empty()) {
        for start in 0..chars.len() {
            let mut candidate = String::new();
            for (end, piece) in lowered.iter().enumerate().skip(start) {
                candidate.push_str(piece);
                if candidate.len() >= term.len() {
                    if candidate == *term {
                        ranges.push((start, end + 1));
                    }
                    break;
                }
            }
        }
    }

    ranges.sort_unstable();
    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(ranges.len());
    for (start, end) in ranges {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn book(id: &str, title: &str, category: &str) -> Book {
        let mut book = Book::new(id, title);
        book.category = Some(category.to_string());
        book
    }

    fn library() -> Vec<Book> {
        let mut dune = book("1", "Dune", "Fiction");
        dune.short = "Desert planet politics".to_string();
        dune.tags = vec!["sci-fi".to_string(), "classic".to_string()];
        dune.slug = Some("dune".to_string());

        let mut ledger = book("2", "The Ledger", "Business");
        ledger.keywords = Some("accounting finance".to_string());

        let mut poems = book("3", "Night Poems", "Poetry");
        poems.tags = vec!["night".to_string()];

        vec![dune, ledger, poems]
    }

    fn query(search: &str, category: &str) -> QueryState {
        let mut q = QueryState::default();
        q.set_search(search);
        q.set_category(category);
        q
    }

    fn ids<'a>(books: &[&'a Book]) -> Vec<&'a str> {
        books.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let books = library();
        assert_eq!(ids(&filter_books(&books, &QueryState::default())), ["1", "2", "3"]);
        assert_eq!(ids(&filter_books(&books, &query("   ", "All"))), ["1", "2", "3"]);
    }

    #[test]
    fn category_gate_is_case_insensitive() {
        let books = library();
        assert_eq!(ids(&filter_books(&books, &query("", "fiction"))), ["1"]);
        assert_eq!(ids(&filter_books(&books, &query("", "POETRY"))), ["3"]);
        assert!(filter_books(&books, &query("", "Cooking")).is_empty());
    }

    #[test]
    fn all_terms_must_match() {
        let books = library();
        assert_eq!(ids(&filter_books(&books, &query("DESERT classic", "All"))), ["1"]);
        assert!(filter_books(&books, &query("desert finance", "All")).is_empty());
        assert_eq!(ids(&filter_books(&books, &query("finance", "All"))), ["2"]);
    }

    #[test]
    fn both_gates_apply() {
        let books = library();
        assert!(filter_books(&books, &query("night", "Fiction")).is_empty());
        assert_eq!(ids(&filter_books(&books, &query("night", "Poetry"))), ["3"]);
    }

    #[test]
    fn terms_do_not_match_across_field_boundaries() {
        let mut book = Book::new("1", "abc");
        book.short = "def".to_string();
        let books = vec![book];
        assert!(filter_books(&books, &query("cde", "All")).is_empty());
        assert!(filter_books(&books, &query("c|d", "All")).is_empty());
    }

    #[test]
    fn uncategorised_books_only_show_under_all() {
        let books = vec![Book::new("1", "Loose")];
        assert_eq!(filter_books(&books, &query("", "All")).len(), 1);
        assert!(filter_books(&books, &query("", "Fiction")).is_empty());
    }

    #[test]
    fn highlight_ranges_merge_overlaps() {
        let terms = search_terms("du une");
        assert_eq!(highlight_ranges("Dune Dunes", &terms), vec![(0, 4), (5, 9)]);
        assert!(highlight_ranges("Dune", &[]).is_empty());
    }

    fn arb_book() -> impl Strategy<Value = Book> {
        (
            "[a-z]{1,6}",
            "[a-zA-Z ]{0,12}",
            prop::collection::vec("[a-z]{1,5}", 0..3),
            prop::option::of("[A-C]"),
        )
            .prop_map(|(title, short, tags, category)| {
                let mut book = Book::new(title.clone(), title);
                book.short = short;
                book.tags = tags;
                book.category = category;
                book
            })
    }

    proptest! {
        #[test]
        fn prop_results_contain_every_term(
            books in prop::collection::vec(arb_book(), 0..12),
            search in "[a-zA-Z ]{0,8}",
        ) {
            let q = query(&search, "All");
            let terms = search_terms(&search);
            for hit in filter_books(&books, &q) {
                let hay = haystack(hit);
                prop_assert!(terms.iter().all(|t| hay.contains(t.as_str())));
            }
        }

        #[test]
        fn prop_filter_is_stable_and_idempotent(
            books in prop::collection::vec(arb_book(), 0..12),
            search in "[a-z ]{0,4}",
            category in prop_oneof![Just("All"), Just("A"), Just("b")],
        ) {
            let q = query(&search, category);
            let first = filter_books(&books, &q);
            let second = filter_books(&books, &q);
            prop_assert_eq!(&first, &second);

            let positions: Vec<usize> = first
                .iter()
                .map(|hit| books.iter().position(|b| std::ptr::eq(b, *hit)).unwrap_or(usize::MAX))
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
