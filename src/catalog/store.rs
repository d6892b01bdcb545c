//! In-memory record store for the loaded catalog.
//!
//! The store is built once from a data source response and never mutated
//! afterwards. It owns the full book list and the derived category labels.

use crate::domain::error::{BookshelfError, Result};
use crate::domain::Book;
use std::collections::BTreeMap;

/// Synthetic category label meaning "no category filter".
pub const ALL_CATEGORY: &str = "All";

/// Immutable catalog of books plus the sorted category labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    books: Vec<Book>,
    categories: Vec<String>,
}

impl Catalog {
    /// Builds a catalog from already-parsed books, deriving the category set.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookshelf::catalog::Catalog;
    /// use bookshelf::Book;
    ///
    /// let mut a = Book::new("1", "A");
    /// a.category = Some("Fiction".to_string());
    /// let mut b = Book::new("2", "B");
    /// b.category = Some("Business".to_string());
    ///
    /// let catalog = Catalog::from_books(vec![a, b]);
    /// assert_eq!(catalog.get_categories(), ["All", "Business", "Fiction"]);
    /// ```
    #[must_use]
    pub fn from_books(books: Vec<Book>) -> Self {
        let categories = derive_categories(&books);
        Self { books, categories }
    }

    /// Parses a data source body into a catalog.
    ///
    /// The body must be a JSON array. Elements that cannot be read as a [`Book`]
    /// are skipped with a warning; the remaining records are kept in order.
    ///
    /// # Errors
    ///
    /// Returns [`BookshelfError::Parse`] if the body is not valid JSON or not an array.
    pub fn parse(body: &[u8]) -> Result<Self> {
        let _span = tracing::debug_span!("parse_catalog", body_len = body.len()).entered();

        let value: serde_json::Value = serde_json::from_slice(body)?;
        let serde_json::Value::Array(entries) = value else {
            return Err(BookshelfError::Parse(
                "expected a JSON array of book records".to_string(),
            ));
        };

        let total = entries.len();
        let books: Vec<Book> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<Book>(entry) {
                Ok(book) => Some(book),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping malformed book record");
                    None
                }
            })
            .collect();

        tracing::debug!(
            total_records = total,
            loaded = books.len(),
            skipped = total - books.len(),
            "catalog parsed"
        );

        Ok(Self::from_books(books))
    }

    /// Full book list in source order.
    #[must_use]
    pub fn get_all(&self) -> &[Book] {
        &self.books
    }

    /// Category labels for the chip bar, `"All"` first.
    #[must_use]
    pub fn get_categories(&self) -> &[String] {
        &self.categories
    }

    /// Number of books in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

/// Distinct non-empty labels, sorted case-insensitively with `"All"` prepended.
///
/// Labels that differ only by case collapse into one chip, spelled the way the
/// first record carrying it spells it.
fn derive_categories(books: &[Book]) -> Vec<String> {
    let mut distinct: BTreeMap<String, &str> = BTreeMap::new();
    for label in books.iter().map(Book::category_label) {
        if label.trim().is_empty() {
            continue;
        }
        let key = label.to_lowercase();
        if key == ALL_CATEGORY.to_lowercase() {
            continue;
        }
        distinct.entry(key).or_insert(label);
    }

    std::iter::once(ALL_CATEGORY)
        .chain(distinct.into_values())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: &str, category: Option<&str>) -> Book {
        let mut book = Book::new(id, format!("Book {id}"));
        book.category = category.map(String::from);
        book
    }

    #[test]
    fn categories_are_distinct_sorted_and_prefixed() {
        let catalog = Catalog::from_books(vec![
            book("1", Some("fiction")),
            book("2", Some("Business")),
            book("3", Some("fiction")),
            book("4", None),
            book("5", Some("")),
            book("6", Some("Art")),
        ]);
        assert_eq!(catalog.get_categories(), ["All", "Art", "Business", "fiction"]);
    }

    #[test]
    fn labels_differing_by_case_share_one_chip() {
        let catalog = Catalog::from_books(vec![
            book("1", Some("Fiction")),
            book("2", Some("fiction")),
            book("3", Some("Zed")),
            book("4", Some("FICTION")),
        ]);
        assert_eq!(catalog.get_categories(), ["All", "Fiction", "Zed"]);
    }

    #[test]
    fn literal_all_label_is_not_duplicated() {
        let catalog = Catalog::from_books(vec![book("1", Some("all")), book("2", Some("Poetry"))]);
        assert_eq!(catalog.get_categories(), ["All", "Poetry"]);
    }

    #[test]
    fn empty_catalog_still_offers_all() {
        let catalog = Catalog::from_books(vec![]);
        assert_eq!(catalog.get_categories(), ["All"]);
        assert!(catalog.is_empty());
    }

    #[test]
    fn parse_keeps_order_and_skips_malformed_records() {
        let body = br#"[
            {"id": "b", "title": "Second", "filter": "Fiction"},
            {"title": "no id"},
            {"id": 3, "title": "Third", "tags": ["x", "y"]},
            "not an object",
            {"id": "d", "title": "Fourth", "buy_url": null}
        ]"#;
        let catalog = Catalog::parse(body).unwrap();
        let ids: Vec<&str> = catalog.get_all().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["b", "3", "d"]);
        assert_eq!(catalog.get_categories(), ["All", "Fiction"]);
    }

    #[test]
    fn parse_rejects_non_array_bodies() {
        assert!(matches!(
            Catalog::parse(br#"{"books": []}"#),
            Err(BookshelfError::Parse(_))
        ));
        assert!(matches!(
            Catalog::parse(b"<html>not found</html>"),
            Err(BookshelfError::Parse(_))
        ));
    }

    #[test]
    fn parse_accepts_empty_array() {
        let catalog = Catalog::parse(b"[]").unwrap();
        assert_eq!(catalog.len(), 0);
    }
}
