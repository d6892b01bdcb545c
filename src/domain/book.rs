//! Book domain model.
//!
//! A [`Book`] is one catalog entry as published by the data source. Only `id` and
//! `title` are required; every other field degrades to an empty or absent value so
//! that a sparse record still renders.

use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder target used when a record has no purchase link.
pub const PLACEHOLDER_LINK: &str = "#";

/// One catalog entry.
///
/// Field names follow the JSON published by the data source; `filter` carries the
/// category label used by the category chips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub short: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cover: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, rename = "filter")]
    pub category: Option<String>,
    #[serde(default)]
    pub buy_url: Option<String>,
    #[serde(default)]
    pub detail_id: Option<String>,
}

impl Book {
    /// Creates a book with only the required fields set.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookshelf::Book;
    ///
    /// let book = Book::new("42", "Dune");
    /// assert_eq!(book.detail_path(), "/book/42/detail.html");
    /// assert!(book.purchase_link().is_none());
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            short: String::new(),
            cover: String::new(),
            tags: Vec::new(),
            keywords: None,
            slug: None,
            category: None,
            buy_url: None,
            detail_id: None,
        }
    }

    /// Category label, or `""` when the record has none.
    #[must_use]
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }

    /// Path of the full-description page for this book.
    ///
    /// Uses `detail_id` when present, otherwise the record identifier.
    #[must_use]
    pub fn detail_path(&self) -> String {
        let key = self.detail_id.as_deref().unwrap_or(&self.id);
        format!("/book/{key}/detail.html")
    }

    /// Purchase link, if the record carries a usable one.
    ///
    /// Blank strings and the `#` placeholder count as absent.
    #[must_use]
    pub fn purchase_link(&self) -> Option<&str> {
        self.buy_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty() && *url != PLACEHOLDER_LINK)
    }
}

/// Accepts identifiers published either as JSON strings or as integers.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_are_accepted() {
        let book: Book = serde_json::from_str(r#"{"id": 7, "title": "Seven"}"#).unwrap();
        assert_eq!(book.id, "7");
        assert_eq!(book.detail_path(), "/book/7/detail.html");
    }

    #[test]
    fn sparse_record_gets_neutral_defaults() {
        let book: Book = serde_json::from_str(
            r#"{"id": "a", "title": "A", "tags": null, "short": null, "filter": null}"#,
        )
        .unwrap();
        assert!(book.tags.is_empty());
        assert_eq!(book.short, "");
        assert_eq!(book.category_label(), "");
        assert!(book.keywords.is_none());
    }

    #[test]
    fn placeholder_purchase_link_counts_as_absent() {
        let mut book = Book::new("1", "One");
        book.buy_url = Some("#".to_string());
        assert!(book.purchase_link().is_none());

        book.buy_url = Some("  ".to_string());
        assert!(book.purchase_link().is_none());

        book.buy_url = Some("https://example.com/dp/1".to_string());
        assert_eq!(book.purchase_link(), Some("https://example.com/dp/1"));
    }

    #[test]
    fn detail_id_overrides_identifier() {
        let mut book = Book::new("1", "One");
        book.detail_id = Some("one-book".to_string());
        assert_eq!(book.detail_path(), "/book/one-book/detail.html");
    }

    #[test]
    fn missing_title_is_rejected() {
        assert!(serde_json::from_str::<Book>(r#"{"id": "x"}"#).is_err());
    }
}
