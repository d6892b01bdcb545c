//! Catalog data sources and the primary/fallback load sequence.
//!
//! Zellij performs web requests on the host and reports the result later as an
//! event, so loading is modelled as a small state machine: request the primary
//! source, fall back to the secondary one once, then either hold a [`Catalog`] or
//! a fatal error.

use super::store::Catalog;
use crate::domain::error::{BookshelfError, Result};
use std::fmt;

/// Context key used to tag web requests with the source they target.
pub const SOURCE_CONTEXT_KEY: &str = "bookshelf_source";

/// Longest body excerpt quoted in fetch error messages.
const ERROR_BODY_EXCERPT: usize = 80;

/// Which of the two configured catalog URLs a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    Primary,
    Fallback,
}

impl CatalogSource {
    /// Stable tag stored in the web request context.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Fallback => "fallback",
        }
    }

    /// Parses a tag produced by [`CatalogSource::as_str`].
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "primary" => Some(Self::Primary),
            "fallback" => Some(Self::Fallback),
            _ => None,
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Absolute URLs of the primary and fallback catalog sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEndpoints {
    pub primary: String,
    pub fallback: String,
}

impl CatalogEndpoints {
    /// Resolves the two catalog paths against a base URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookshelf::catalog::CatalogEndpoints;
    ///
    /// let endpoints = CatalogEndpoints::resolve(
    ///     "http://localhost:8000/",
    ///     "/books.json",
    ///     "https://mirror.example.com/ebooks/books.json",
    /// );
    /// assert_eq!(endpoints.primary, "http://localhost:8000/books.json");
    /// assert_eq!(endpoints.fallback, "https://mirror.example.com/ebooks/books.json");
    /// ```
    #[must_use]
    pub fn resolve(base_url: &str, primary_path: &str, fallback_path: &str) -> Self {
        Self {
            primary: join_url(base_url, primary_path),
            fallback: join_url(base_url, fallback_path),
        }
    }

    /// URL for the given source.
    #[must_use]
    pub fn url(&self, source: CatalogSource) -> &str {
        match source {
            CatalogSource::Primary => &self.primary,
            CatalogSource::Fallback => &self.fallback,
        }
    }
}

/// Joins a base URL and a path, leaving absolute `http(s)` paths untouched.
#[must_use]
pub fn join_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// A web request the plugin runtime should issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub source: CatalogSource,
    pub url: String,
}

/// Progress of the catalog load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet (permissions still pending).
    Idle,
    /// Waiting for the response from `source`.
    Pending(CatalogSource),
    /// Catalog is available.
    Ready,
    /// Both sources failed, or loading could not start. Fatal for the view.
    Failed(String),
}

/// Result of feeding a web response into the loader.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The response produced a catalog.
    Loaded(Catalog),
    /// The primary source failed; the fallback must be requested.
    Retry(FetchRequest),
    /// Both sources failed.
    Failed(BookshelfError),
    /// The response does not belong to the pending request.
    Ignored,
}

/// Drives the primary → fallback load sequence.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    endpoints: CatalogEndpoints,
    state: LoadState,
    primary_error: Option<String>,
}

impl CatalogLoader {
    #[must_use]
    pub const fn new(endpoints: CatalogEndpoints) -> Self {
        Self {
            endpoints,
            state: LoadState::Idle,
            primary_error: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &LoadState {
        &self.state
    }

    #[must_use]
    pub const fn endpoints(&self) -> &CatalogEndpoints {
        &self.endpoints
    }

    /// Starts (or restarts) loading from the primary source.
    pub fn start(&mut self) -> FetchRequest {
        self.primary_error = None;
        self.request(CatalogSource::Primary)
    }

    /// Marks the load as failed without issuing any request.
    pub fn abort(&mut self, error: &BookshelfError) {
        tracing::warn!(error = %error, "catalog load aborted");
        self.state = LoadState::Failed(error.to_string());
    }

    /// Consumes a web response for `source`.
    ///
    /// Success on either source yields [`LoadOutcome::Loaded`]. A primary failure
    /// yields exactly one [`LoadOutcome::Retry`]; a fallback failure is final.
    pub fn on_response(&mut self, source: CatalogSource, status: u16, body: &[u8]) -> LoadOutcome {
        if self.state != LoadState::Pending(source) {
            tracing::debug!(source = %source, state = ?self.state, "ignoring unexpected catalog response");
            return LoadOutcome::Ignored;
        }

        let url = self.endpoints.url(source).to_string();
        match evaluate_response(&url, status, body) {
            Ok(catalog) => {
                tracing::info!(source = %source, books = catalog.len(), "catalog loaded");
                self.state = LoadState::Ready;
                LoadOutcome::Loaded(catalog)
            }
            Err(e) => match source {
                CatalogSource::Primary => {
                    tracing::warn!(url = %url, error = %e, "primary catalog source failed, trying fallback");
                    self.primary_error = Some(e.to_string());
                    LoadOutcome::Retry(self.request(CatalogSource::Fallback))
                }
                CatalogSource::Fallback => {
                    let error = BookshelfError::CatalogUnavailable {
                        primary: self
                            .primary_error
                            .take()
                            .unwrap_or_else(|| "not attempted".to_string()),
                        fallback: e.to_string(),
                    };
                    tracing::error!(error = %error, "catalog load failed");
                    self.state = LoadState::Failed(error.to_string());
                    LoadOutcome::Failed(error)
                }
            },
        }
    }

    fn request(&mut self, source: CatalogSource) -> FetchRequest {
        self.state = LoadState::Pending(source);
        FetchRequest {
            source,
            url: self.endpoints.url(source).to_string(),
        }
    }
}

/// Turns an HTTP status and body into a catalog or a fetch/parse error.
///
/// # Errors
///
/// Returns [`BookshelfError::Fetch`] for non-2xx statuses and
/// [`BookshelfError::Parse`] for bodies that are not a JSON array.
pub fn evaluate_response(url: &str, status: u16, body: &[u8]) -> Result<Catalog> {
    if !(200..300).contains(&status) {
        let excerpt: String = String::from_utf8_lossy(body)
            .chars()
            .take(ERROR_BODY_EXCERPT)
            .collect();
        let reason = if excerpt.trim().is_empty() {
            format!("HTTP {status}")
        } else {
            format!("HTTP {status} ({})", excerpt.trim())
        };
        return Err(BookshelfError::Fetch {
            url: url.to_string(),
            reason,
        });
    }
    Catalog::parse(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader() -> CatalogLoader {
        CatalogLoader::new(CatalogEndpoints::resolve(
            "http://shelf.test",
            "/books.json",
            "/ebooks/books.json",
        ))
    }

    const GOOD: &[u8] = br#"[{"id": "1", "title": "One"}]"#;

    #[test]
    fn primary_success_loads_catalog() {
        let mut loader = loader();
        let request = loader.start();
        assert_eq!(request.url, "http://shelf.test/books.json");
        assert_eq!(loader.state(), &LoadState::Pending(CatalogSource::Primary));

        let outcome = loader.on_response(CatalogSource::Primary, 200, GOOD);
        assert!(matches!(outcome, LoadOutcome::Loaded(ref c) if c.len() == 1));
        assert_eq!(loader.state(), &LoadState::Ready);
    }

    #[test]
    fn primary_failure_retries_fallback_once() {
        let mut loader = loader();
        loader.start();

        let outcome = loader.on_response(CatalogSource::Primary, 404, b"");
        let LoadOutcome::Retry(request) = outcome else {
            panic!("expected fallback retry, got {outcome:?}");
        };
        assert_eq!(request.source, CatalogSource::Fallback);
        assert_eq!(request.url, "http://shelf.test/ebooks/books.json");

        let outcome = loader.on_response(CatalogSource::Fallback, 200, GOOD);
        assert!(matches!(outcome, LoadOutcome::Loaded(_)));
    }

    #[test]
    fn unparsable_primary_also_falls_back() {
        let mut loader = loader();
        loader.start();
        let outcome = loader.on_response(CatalogSource::Primary, 200, b"{not json");
        assert!(matches!(outcome, LoadOutcome::Retry(_)));
    }

    #[test]
    fn both_failures_are_fatal_and_carry_both_causes() {
        let mut loader = loader();
        loader.start();
        loader.on_response(CatalogSource::Primary, 500, b"boom");
        let outcome = loader.on_response(CatalogSource::Fallback, 200, b"oops");

        let LoadOutcome::Failed(error) = outcome else {
            panic!("expected failure, got {outcome:?}");
        };
        let message = error.to_string();
        assert!(message.contains("HTTP 500 (boom)"), "{message}");
        assert!(message.contains("Invalid catalog data"), "{message}");
        assert!(matches!(loader.state(), LoadState::Failed(_)));
    }

    #[test]
    fn stray_responses_are_ignored() {
        let mut loader = loader();
        assert!(matches!(
            loader.on_response(CatalogSource::Primary, 200, GOOD),
            LoadOutcome::Ignored
        ));

        loader.start();
        assert!(matches!(
            loader.on_response(CatalogSource::Fallback, 200, GOOD),
            LoadOutcome::Ignored
        ));
    }

    #[test]
    fn join_url_handles_slashes() {
        assert_eq!(join_url("http://a/", "/b.json"), "http://a/b.json");
        assert_eq!(join_url("http://a", "b.json"), "http://a/b.json");
        assert_eq!(join_url("http://a", "https://c/d.json"), "https://c/d.json");
    }

    #[test]
    fn source_tags_round_trip() {
        assert_eq!(CatalogSource::from_tag("primary"), Some(CatalogSource::Primary));
        assert_eq!(CatalogSource::from_tag(CatalogSource::Fallback.as_str()), Some(CatalogSource::Fallback));
        assert_eq!(CatalogSource::from_tag("other"), None);
    }
}
