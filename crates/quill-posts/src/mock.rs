//! Mock post store for testing.
//!
//! Provides [`MockPostStore`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::store::{Post, PostStore, StoreError, sort_newest_first, validate_slug};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// In-memory post store.
///
/// # Example
///
/// ```
/// use quill_posts::{MockPostStore, Post, PostFields, PostStore};
///
/// let store = MockPostStore::new().with_post(Post {
///     slug: "hello".into(),
///     date: "2024-01-01".into(),
///     category: "note".into(),
///     ja: PostFields::default(),
///     en: PostFields::default(),
/// });
///
/// assert_eq!(store.get("hello").unwrap().date, "2024-01-01");
/// assert!(store.get("missing").is_err());
/// ```
#[derive(Debug, Default)]
pub struct MockPostStore {
    posts: RwLock<HashMap<String, Post>>,
}

impl MockPostStore {
    /// Create a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a post.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_post(self, post: Post) -> Self {
        self.posts.write().unwrap().insert(post.slug.clone(), post);
        self
    }

    /// Remove a post, returning it if present.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn remove(&self, slug: &str) -> Option<Post> {
        self.posts.write().unwrap().remove(slug)
    }
}

impl PostStore for MockPostStore {
    fn get(&self, slug: &str) -> Result<Post, StoreError> {
        validate_slug(slug).map_err(|e| e.with_backend(BACKEND))?;
        self.posts
            .read()
            .unwrap()
            .get(slug)
            .cloned()
            .ok_or_else(|| StoreError::not_found(slug).with_backend(BACKEND))
    }

    fn list(&self) -> Result<Vec<Post>, StoreError> {
        let mut posts: Vec<Post> = self.posts.read().unwrap().values().cloned().collect();
        sort_newest_first(&mut posts);
        Ok(posts)
    }
}
