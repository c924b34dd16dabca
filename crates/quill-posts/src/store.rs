//! Post model, store trait and error types.

use std::path::PathBuf;

use quill_compose::Locale;
use serde::Deserialize;

/// Per-locale post content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PostFields {
    /// Post title.
    pub title: String,
    /// Short summary for listings.
    #[serde(default)]
    pub excerpt: String,
    /// Raw document body, composed at render time.
    pub body: String,
}

/// A bilingual post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// URL slug (`[a-z0-9-]+`).
    pub slug: String,
    /// Publication date (`YYYY-MM-DD`).
    pub date: String,
    /// Category label.
    pub category: String,
    /// Japanese content.
    pub ja: PostFields,
    /// English content.
    pub en: PostFields,
}

impl Post {
    /// Content for the given locale.
    #[must_use]
    pub fn fields(&self, locale: Locale) -> &PostFields {
        match locale {
            Locale::Ja => &self.ja,
            Locale::En => &self.en,
        }
    }
}

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorKind {
    /// Post does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Slug is not `[a-z0-9-]+`.
    InvalidSlug,
    /// Record could not be parsed.
    Parse,
    /// Other/unknown error category.
    Other,
}

/// Store error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StoreError {
    /// Semantic error category.
    pub kind: StoreErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StoreError {
    /// Create a new store error.
    #[must_use]
    pub fn new(kind: StoreErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StoreErrorKind::NotFound).with_path(path)
    }

    /// Create a store error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StoreErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StoreErrorKind::PermissionDenied,
            _ => StoreErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StoreErrorKind::NotFound => "Not found",
            StoreErrorKind::PermissionDenied => "Permission denied",
            StoreErrorKind::InvalidSlug => "Invalid slug",
            StoreErrorKind::Parse => "Parse error",
            StoreErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Check that `slug` is non-empty and only `[a-z0-9-]`.
///
/// Slugs become file names, so this also rules out path traversal.
///
/// # Errors
///
/// Returns [`StoreErrorKind::InvalidSlug`] otherwise.
pub fn validate_slug(slug: &str) -> Result<(), StoreError> {
    let valid = !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::new(StoreErrorKind::InvalidSlug).with_path(slug))
    }
}

/// Source of post records.
pub trait PostStore: Send + Sync {
    /// Load one post by slug.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the slug is invalid, the post doesn't exist,
    /// or its record can't be read.
    fn get(&self, slug: &str) -> Result<Post, StoreError>;

    /// Load every post, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend can't be listed or a record
    /// can't be read.
    fn list(&self) -> Result<Vec<Post>, StoreError>;
}

/// Order posts newest first, then by slug.
pub(crate) fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
}
